//! Schema, validation and canonicalization for neuropod package configs.
//!
//! A neuropod package carries a `config.json` naming the model, its platform,
//! and the name, dtype and shape of every input and output tensor. This crate
//! decides whether such a document is well-formed, normalizes dtype aliases to
//! canonical names, and reads/writes the file so that no invalid config is
//! ever persisted or handed to a caller.

pub mod error;
pub mod serialize;
pub mod spec;

pub use error::{ConfigError, Result};
pub use serialize::{CONFIG_FILENAME, read_config_file, read_neuropod_config, write_neuropod_config};
pub use spec::{
    ALLOWED_DTYPES, DType, Dim, NeuropodConfig, RawNeuropodConfig, RawTensorSpec, TensorSpec,
    canonicalize, canonicalize_tensor_spec, validate_neuropod_config, validate_tensor_spec,
};
