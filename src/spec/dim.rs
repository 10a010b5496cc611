//! Shape dimensions.
//!
//! JSON mapping:
//!   null      => Dim::Unbound   (size known only at execution time)
//!   "batch"   => Dim::Symbol    (size shared with every dim of the same label)
//!   5         => Dim::Fixed     (strictly positive)

use crate::error::{ConfigError, Result};

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::num::NonZeroU64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Dim {
    Unbound,
    Symbol(String),
    Fixed(NonZeroU64),
}

impl Dim {
    /// Interpret one raw shape entry.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Dim::Unbound),
            Value::String(label) => Ok(Dim::Symbol(label.clone())),
            // Never a size, even in encodings that store booleans as 0/1.
            Value::Bool(_) => Err(ConfigError::InvalidDimension(value.to_string())),
            Value::Number(n) => match n.as_u64() {
                Some(size) => NonZeroU64::new(size)
                    .map(Dim::Fixed)
                    .ok_or_else(|| ConfigError::InvalidDimension(value.to_string())),
                // Integer literals past u64::MAX arrive here as lossy floats.
                None => match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f >= u64::MAX as f64 => {
                        Err(ConfigError::InvalidDimension(format!(
                            "{value} (exceeds the largest supported size {})",
                            u64::MAX
                        )))
                    }
                    _ => Err(ConfigError::InvalidDimension(value.to_string())),
                },
            },
            Value::Array(_) | Value::Object(_) => {
                Err(ConfigError::InvalidDimension(value.to_string()))
            }
        }
    }

    pub fn fixed(size: u64) -> Option<Self> {
        NonZeroU64::new(size).map(Dim::Fixed)
    }

    pub fn symbol(label: impl Into<String>) -> Self {
        Dim::Symbol(label.into())
    }

    pub fn to_value(&self) -> Value {
        match self {
            Dim::Unbound => Value::Null,
            Dim::Symbol(label) => Value::String(label.clone()),
            Dim::Fixed(n) => Value::from(n.get()),
        }
    }
}

impl Serialize for Dim {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Dim::Unbound => serializer.serialize_none(),
            Dim::Symbol(label) => serializer.serialize_str(label),
            Dim::Fixed(n) => serializer.serialize_u64(n.get()),
        }
    }
}

impl<'de> Deserialize<'de> for Dim {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Dim::from_value(&value).map_err(de::Error::custom)
    }
}
