//! Error types for neuropod config handling.

use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

/// Everything that can go wrong while canonicalizing, validating, writing or
/// reading a neuropod config.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The dtype is not one of the canonical element types.
    #[error("{got} is not an allowed data type! Allowed: [{allowed}]")]
    InvalidDtype { got: String, allowed: String },

    /// The dtype name could not be resolved to any known element type.
    #[error("unrecognized data type {0}")]
    UnrecognizedDtype(String),

    /// A field holds a value of the wrong JSON type (or an empty string).
    #[error("Field '{field}' must be {expected}! Got value {value} of type {kind}.")]
    InvalidFieldType {
        field: &'static str,
        expected: &'static str,
        value: String,
        kind: &'static str,
    },

    /// A shape entry is not null, a string, or a positive integer.
    #[error("All items in 'shape' must either be null, a string, or a positive integer! Got {0}")]
    InvalidDimension(String),

    /// Reading or writing the config file failed.
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not a well-formed config document.
    #[error("malformed config {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Encoding a validated config as JSON failed.
    #[error("failed to encode config: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn invalid_field(field: &'static str, expected: &'static str, value: &Value) -> Self {
        ConfigError::InvalidFieldType {
            field,
            expected,
            value: value.to_string(),
            kind: json_kind(value),
        }
    }
}

/// Name of the JSON type of `value`, used in error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Result type alias for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
