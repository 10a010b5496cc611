//! Element types and dtype name canonicalization.
//!
//! User-facing dtype names follow numpy's spelling rules: canonical names
//! ("float32"), named aliases ("double", "long"), single-character type codes
//! ("d", "q") and array-protocol type strings ("<f8", "|u1"). All of them are
//! resolved to the numpy canonical name before validation.
//!
//! Resolution and membership are separate steps. `canonicalize` knows about a
//! few types numpy has but neuropods do not support (float16, bool, complex);
//! those resolve fine and are then rejected by `DType::from_str` with
//! `InvalidDtype`.

use crate::error::{ConfigError, Result};

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Canonical tensor element types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    Float32,
    Float64,
    String,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
}

/// Every dtype a tensor spec may carry, in display order.
pub const ALLOWED_DTYPES: [DType; 11] = [
    DType::Float32,
    DType::Float64,
    DType::String,
    DType::Int8,
    DType::Int16,
    DType::Int32,
    DType::Int64,
    DType::Uint8,
    DType::Uint16,
    DType::Uint32,
    DType::Uint64,
];

impl DType {
    pub const fn name(self) -> &'static str {
        match self {
            DType::Float32 => "float32",
            DType::Float64 => "float64",
            DType::String => "string",
            DType::Int8 => "int8",
            DType::Int16 => "int16",
            DType::Int32 => "int32",
            DType::Int64 => "int64",
            DType::Uint8 => "uint8",
            DType::Uint16 => "uint16",
            DType::Uint32 => "uint32",
            DType::Uint64 => "uint64",
        }
    }

    /// Check a raw dtype value against the canonical set.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => s.parse(),
            other => Err(invalid_dtype(other.to_string())),
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        ALLOWED_DTYPES
            .iter()
            .copied()
            .find(|d| d.name() == s)
            .ok_or_else(|| invalid_dtype(s.to_string()))
    }
}

fn invalid_dtype(got: String) -> ConfigError {
    let allowed = ALLOWED_DTYPES
        .iter()
        .map(|d| d.name())
        .collect::<Vec<_>>()
        .join(", ");
    ConfigError::InvalidDtype { got, allowed }
}

// [<>=|] byte order, then kind and item size in bytes.
static TYPESTRING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[<>=|]?([fiucbSUa])(\d+)$").expect("dtype typestring pattern is valid")
});

/// Resolve a dtype name or alias to its canonical name.
///
/// Canonical names map to themselves. Fails with `UnrecognizedDtype` when the
/// name does not denote any element type.
pub fn canonicalize(name: &str) -> Result<&'static str> {
    let bare = name
        .strip_prefix("numpy.")
        .or_else(|| name.strip_prefix("np."))
        .unwrap_or(name);

    let resolved = named_alias(bare)
        .or_else(|| type_code(bare))
        .or_else(|| typestring(bare))
        .ok_or_else(|| ConfigError::UnrecognizedDtype(name.to_string()))?;

    if resolved != name {
        tracing::debug!(alias = name, canonical = resolved, "resolved dtype alias");
    }
    Ok(resolved)
}

/// `canonicalize` for a raw JSON dtype. Non-string values are unrecognized.
pub fn canonicalize_value(value: &Value) -> Result<&'static str> {
    match value {
        Value::String(s) => canonicalize(s),
        other => Err(ConfigError::UnrecognizedDtype(other.to_string())),
    }
}

fn named_alias(name: &str) -> Option<&'static str> {
    let canonical = match name {
        "float32" | "single" => "float32",
        "float64" | "double" | "float" | "float_" => "float64",
        "float16" | "half" => "float16",
        "string" | "str" | "bytes" | "unicode" | "string_" | "bytes_" | "str_" | "unicode_" => {
            "string"
        }
        "int8" | "byte" => "int8",
        "int16" | "short" => "int16",
        "int32" | "intc" => "int32",
        "int64" | "int" | "int_" | "long" | "longlong" | "intp" => "int64",
        "uint8" | "ubyte" => "uint8",
        "uint16" | "ushort" => "uint16",
        "uint32" | "uintc" => "uint32",
        "uint64" | "uint" | "ulong" | "ulonglong" | "uintp" => "uint64",
        "bool" | "bool_" | "bool8" => "bool",
        "complex64" | "csingle" => "complex64",
        "complex128" | "complex" | "cdouble" | "complex_" => "complex128",
        _ => return None,
    };
    Some(canonical)
}

fn type_code(name: &str) -> Option<&'static str> {
    let canonical = match name {
        "f" => "float32",
        "d" => "float64",
        "e" => "float16",
        "b" => "int8",
        "B" => "uint8",
        "h" => "int16",
        "H" => "uint16",
        "i" => "int32",
        "I" => "uint32",
        "l" | "q" => "int64",
        "L" | "Q" => "uint64",
        "?" => "bool",
        "F" => "complex64",
        "D" => "complex128",
        "S" | "U" | "a" => "string",
        _ => return None,
    };
    Some(canonical)
}

fn typestring(name: &str) -> Option<&'static str> {
    let caps = TYPESTRING_RE.captures(name)?;
    let size: u32 = caps.get(2)?.as_str().parse().ok()?;

    let canonical = match (caps.get(1)?.as_str(), size) {
        ("f", 2) => "float16",
        ("f", 4) => "float32",
        ("f", 8) => "float64",
        ("i", 1) => "int8",
        ("i", 2) => "int16",
        ("i", 4) => "int32",
        ("i", 8) => "int64",
        ("u", 1) => "uint8",
        ("u", 2) => "uint16",
        ("u", 4) => "uint32",
        ("u", 8) => "uint64",
        ("b", 1) => "bool",
        ("c", 8) => "complex64",
        ("c", 16) => "complex128",
        // Fixed-width strings carry their length, not an item size.
        ("S" | "U" | "a", _) => "string",
        _ => return None,
    };
    Some(canonical)
}
