//! Reading and writing `config.json` inside a neuropod package directory.
//!
//! Write: canonicalize dtypes -> assemble -> validate -> encode.
//! Read:  parse -> validate.
//!
//! Nothing touches the file system until the config has validated, so a
//! failed write leaves the directory as it was. Concurrent writers to the
//! same package are not coordinated here.

use crate::error::{ConfigError, Result};
use crate::spec::{NeuropodConfig, RawNeuropodConfig, RawTensorSpec, canonicalize_tensor_spec};

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the config file at the root of a neuropod package.
pub const CONFIG_FILENAME: &str = "config.json";

pub fn config_path(neuropod_path: impl AsRef<Path>) -> PathBuf {
    neuropod_path.as_ref().join(CONFIG_FILENAME)
}

/// Create the config file of the package at `neuropod_path`.
///
/// `model_name` is e.g. "my_addition_model"; `platform` is the model type
/// ("python", "torchscript", "tensorflow", ...). Each spec item looks like
/// `{"name": "x", "dtype": "float32", "shape": [null]}`; dtypes may be any
/// alias `canonicalize` understands.
///
/// Identical arguments always produce a byte-identical file.
pub fn write_neuropod_config(
    neuropod_path: impl AsRef<Path>,
    model_name: impl Into<Value>,
    platform: impl Into<Value>,
    input_spec: &[RawTensorSpec],
    output_spec: &[RawTensorSpec],
) -> Result<()> {
    let raw = RawNeuropodConfig {
        name: model_name.into(),
        platform: platform.into(),
        input_spec: canonicalize_tensor_spec(input_spec)?,
        output_spec: canonicalize_tensor_spec(output_spec)?,
    };
    let config = raw.validate_and_build()?;
    let bytes = config.to_pretty_json()?;

    let path = config_path(neuropod_path);
    fs::write(&path, bytes).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::debug!(
        path = %path.display(),
        name = %config.name,
        platform = %config.platform,
        inputs = config.input_spec.len(),
        outputs = config.output_spec.len(),
        "wrote neuropod config"
    );
    Ok(())
}

/// Read and validate the config of the package at `neuropod_path`.
pub fn read_neuropod_config(neuropod_path: impl AsRef<Path>) -> Result<NeuropodConfig> {
    read_config_file(config_path(neuropod_path))
}

/// Read and validate a config document stored at an arbitrary path.
pub fn read_config_file(path: impl AsRef<Path>) -> Result<NeuropodConfig> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let raw: RawNeuropodConfig = serde_json::from_str(&text).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let config = raw.validate_and_build()?;

    tracing::debug!(
        path = %path.display(),
        name = %config.name,
        platform = %config.platform,
        "read neuropod config"
    );
    Ok(config)
}
