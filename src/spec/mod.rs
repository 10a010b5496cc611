//! Spec layer: the config.json schema and its validated in-memory structures.
//!
//! Each document type comes in two forms:
//! - a raw serde shape holding whatever JSON the author supplied
//! - a validated shape produced by `validate_and_build`
//!
//! This module does no I/O; reading and writing config files lives in
//! `crate::serialize`.

pub mod config;
pub mod dim;
pub mod dtype;
pub mod tensor;

pub use config::{NeuropodConfig, RawNeuropodConfig, validate_neuropod_config};
pub use dim::Dim;
pub use dtype::{ALLOWED_DTYPES, DType, canonicalize, canonicalize_value};
pub use tensor::{RawTensorSpec, TensorSpec, canonicalize_tensor_spec, validate_tensor_spec};
