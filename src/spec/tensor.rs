//! Tensor specs: one named, typed, shaped model input or output.
//!
//! JSON shape:
//! { "name": "x", "dtype": "float32", "shape": [null, "batch", 3] }
//!
//! `RawTensorSpec` holds the fields exactly as supplied (any JSON value), so
//! malformed input can be reported precisely. `TensorSpec` only comes out of
//! validation and is well-formed by construction.

use crate::error::{ConfigError, Result};
use crate::spec::{DType, Dim, canonicalize_value};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tensor spec as authored or as found on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTensorSpec {
    pub name: Value,
    pub dtype: Value,
    pub shape: Value,
}

/// Validated tensor spec.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTensorSpec")]
pub struct TensorSpec {
    pub name: String,
    pub dtype: DType,
    pub shape: Vec<Dim>,
}

impl RawTensorSpec {
    pub fn new(name: impl Into<Value>, dtype: impl Into<Value>, shape: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            dtype: dtype.into(),
            shape: shape.into(),
        }
    }

    /// Copy of this spec with its dtype replaced by the canonical name.
    pub fn canonicalized(&self) -> Result<Self> {
        Ok(Self {
            name: self.name.clone(),
            dtype: Value::from(canonicalize_value(&self.dtype)?),
            shape: self.shape.clone(),
        })
    }

    /// Check this item and build the validated spec.
    ///
    /// Checks run in a fixed order and stop at the first failure:
    /// dtype membership, name type, shape type, then each dimension.
    pub fn validate_and_build(&self) -> Result<TensorSpec> {
        let dtype = DType::from_value(&self.dtype)?;

        let name = match &self.name {
            Value::String(s) if !s.is_empty() => s.clone(),
            other => return Err(ConfigError::invalid_field("name", "a non-empty string", other)),
        };

        let dims = match &self.shape {
            Value::Array(dims) => dims,
            other => return Err(ConfigError::invalid_field("shape", "a list", other)),
        };
        let shape = dims.iter().map(Dim::from_value).collect::<Result<Vec<_>>>()?;

        Ok(TensorSpec { name, dtype, shape })
    }
}

impl TryFrom<RawTensorSpec> for TensorSpec {
    type Error = ConfigError;

    fn try_from(raw: RawTensorSpec) -> Result<Self> {
        raw.validate_and_build()
    }
}

impl From<&TensorSpec> for RawTensorSpec {
    fn from(spec: &TensorSpec) -> Self {
        Self {
            name: Value::from(spec.name.as_str()),
            dtype: Value::from(spec.dtype.name()),
            shape: Value::Array(spec.shape.iter().map(Dim::to_value).collect()),
        }
    }
}

/// Validate every item of a tensor spec, in order, stopping at the first
/// invalid one.
pub fn validate_tensor_spec(spec: &[RawTensorSpec]) -> Result<Vec<TensorSpec>> {
    spec.iter().map(RawTensorSpec::validate_and_build).collect()
}

/// Replace each item's dtype with its canonical name (e.g. "double" becomes
/// "float64"). Shapes and names are passed through untouched.
pub fn canonicalize_tensor_spec(spec: &[RawTensorSpec]) -> Result<Vec<RawTensorSpec>> {
    spec.iter().map(RawTensorSpec::canonicalized).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn item(name: Value, dtype: Value, shape: Value) -> RawTensorSpec {
        RawTensorSpec::new(name, dtype, shape)
    }

    #[test]
    fn accepts_mixed_dimensions() {
        let spec = validate_tensor_spec(&[item(
            json!("x"),
            json!("float32"),
            json!([null, "batch", 5]),
        )])
        .unwrap();

        assert_eq!(
            spec,
            vec![TensorSpec {
                name: "x".to_string(),
                dtype: DType::Float32,
                shape: vec![Dim::Unbound, Dim::symbol("batch"), Dim::fixed(5).unwrap()],
            }]
        );
    }

    #[test]
    fn empty_spec_and_scalar_shape_are_valid() {
        assert!(validate_tensor_spec(&[]).unwrap().is_empty());
        let spec = validate_tensor_spec(&[item(json!("s"), json!("string"), json!([]))]).unwrap();
        assert!(spec[0].shape.is_empty());
    }

    #[test]
    fn rejects_dtype_outside_canonical_set() {
        let err = validate_tensor_spec(&[item(json!("x"), json!("float16"), json!([1]))])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDtype { ref got, .. } if got == "float16"));

        // Aliases are only accepted after canonicalization.
        let err = validate_tensor_spec(&[item(json!("x"), json!("double"), json!([1]))])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDtype { .. }));
    }

    #[test]
    fn dtype_is_checked_before_shape() {
        let err = validate_tensor_spec(&[item(json!("x"), json!("bogus"), json!([0]))])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDtype { .. }));
    }

    #[test]
    fn name_must_be_non_empty_text() {
        let err = validate_tensor_spec(&[item(json!(7), json!("int32"), json!([]))]).unwrap_err();
        match err {
            ConfigError::InvalidFieldType { field, value, kind, .. } => {
                assert_eq!(field, "name");
                assert_eq!(value, "7");
                assert_eq!(kind, "number");
            }
            other => panic!("unexpected error {other:?}"),
        }

        let err = validate_tensor_spec(&[item(json!(""), json!("int32"), json!([]))]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFieldType { field: "name", .. }));
    }

    #[test]
    fn shape_must_be_a_list() {
        for shape in [json!(3), json!("batch"), json!({"0": 3}), json!(null)] {
            let err = validate_tensor_spec(&[item(json!("x"), json!("int64"), shape.clone())])
                .unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidFieldType { field: "shape", .. }),
                "{shape} should be rejected as a shape"
            );
        }
    }

    #[test]
    fn rejects_bad_dimensions() {
        for dim in [json!(0), json!(-3), json!(true), json!(1.5)] {
            let err = validate_tensor_spec(&[item(json!("x"), json!("uint8"), json!([2, dim]))])
                .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidDimension(_)), "{dim}");
        }
    }

    #[test]
    fn stops_at_first_invalid_item() {
        let err = validate_tensor_spec(&[
            item(json!("a"), json!("int8"), json!([false])),
            item(json!(1), json!("nope"), json!(1)),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDimension(ref v) if v == "false"));
    }

    #[test]
    fn name_is_checked_before_shape() {
        let err = validate_tensor_spec(&[item(json!(1), json!("int8"), json!(3))]).unwrap_err();
        match err {
            ConfigError::InvalidFieldType { field, value, kind, .. } => {
                assert_eq!((field, value.as_str(), kind), ("name", "1", "number"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn shape_type_is_checked_before_dimensions() {
        // An object shape holding an invalid dim still reports the shape itself.
        let err = validate_tensor_spec(&[item(json!("x"), json!("int8"), json!({"0": true}))])
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidFieldType { field: "shape", kind: "object", .. }
        ));
    }

    #[test]
    fn canonicalize_touches_only_dtype() {
        let raw = vec![item(json!("x"), json!("double"), json!([null, 0]))];
        let out = canonicalize_tensor_spec(&raw).unwrap();
        assert_eq!(out, vec![item(json!("x"), json!("float64"), json!([null, 0]))]);

        let err = canonicalize_tensor_spec(&[item(json!("x"), json!("f3"), json!([]))])
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnrecognizedDtype(_)));
    }

    #[test]
    fn validated_spec_converts_back_to_raw() {
        let raw = item(json!("y"), json!("uint64"), json!(["n", null, 4]));
        let spec = raw.validate_and_build().unwrap();
        assert_eq!(RawTensorSpec::from(&spec), raw);
    }
}
