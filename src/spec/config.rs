//! Top-level neuropod config (config.json).
//!
//! JSON shape:
//! {
//!     "name": "addition_model",
//!     "platform": "python",
//!     "input_spec": [ { "name": "x", "dtype": "float32", "shape": [null] } ],
//!     "output_spec": [ { "name": "out", "dtype": "float32", "shape": [null] } ]
//! }

use crate::error::{ConfigError, Result};
use crate::spec::{RawTensorSpec, TensorSpec, validate_tensor_spec};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

/// Config document as authored or as found on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNeuropodConfig {
    pub name: Value,
    pub platform: Value,
    pub input_spec: Vec<RawTensorSpec>,
    pub output_spec: Vec<RawTensorSpec>,
}

/// Validated config. Field order here is the key order on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNeuropodConfig")]
pub struct NeuropodConfig {
    pub name: String,
    pub platform: String,
    pub input_spec: Vec<TensorSpec>,
    pub output_spec: Vec<TensorSpec>,
}

impl RawNeuropodConfig {
    /// Check name, platform, input_spec, then output_spec; the first failure
    /// is returned.
    pub fn validate_and_build(&self) -> Result<NeuropodConfig> {
        let name = text_field("name", &self.name)?;
        let platform = text_field("platform", &self.platform)?;
        let input_spec = validate_tensor_spec(&self.input_spec)?;
        let output_spec = validate_tensor_spec(&self.output_spec)?;

        Ok(NeuropodConfig {
            name,
            platform,
            input_spec,
            output_spec,
        })
    }
}

fn text_field(field: &'static str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) if !s.is_empty() => Ok(s.clone()),
        other => Err(ConfigError::invalid_field(field, "a non-empty string", other)),
    }
}

impl TryFrom<RawNeuropodConfig> for NeuropodConfig {
    type Error = ConfigError;

    fn try_from(raw: RawNeuropodConfig) -> Result<Self> {
        raw.validate_and_build()
    }
}

impl From<&NeuropodConfig> for RawNeuropodConfig {
    fn from(config: &NeuropodConfig) -> Self {
        Self {
            name: Value::from(config.name.as_str()),
            platform: Value::from(config.platform.as_str()),
            input_spec: config.input_spec.iter().map(RawTensorSpec::from).collect(),
            output_spec: config.output_spec.iter().map(RawTensorSpec::from).collect(),
        }
    }
}

impl NeuropodConfig {
    /// Encode as JSON indented by four spaces. Equal configs always encode to
    /// identical bytes.
    pub fn to_pretty_json(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(buf)
    }
}

/// Validate a config document.
pub fn validate_neuropod_config(config: &RawNeuropodConfig) -> Result<NeuropodConfig> {
    config.validate_and_build()
}
