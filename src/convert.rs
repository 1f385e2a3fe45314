//! Driver-boundary type coercion.
//!
//! A `convert<T>(value) -> T` in spirit, rendered as a `FromValue` trait so
//! each target type gets its own conversion rule rather than one giant
//! match. Nullable targets (`Option<T>`) strip nullability before
//! dispatching to `T`, per spec §4.8.

use crate::error::{ConversionError, ConversionResult};
use crate::value::{Guid, Value};
use base64::Engine;

pub trait FromValue: Sized {
    fn from_value(value: Value) -> ConversionResult<Self>;
}

pub fn convert<T: FromValue>(value: Value) -> ConversionResult<T> {
    T::from_value(value)
}

fn failed(from_type: &str, to_type: &str, reason: impl Into<String>) -> ConversionError {
    ConversionError::Failed {
        from_type: from_type.to_string(),
        to_type: to_type.to_string(),
        reason: reason.into(),
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> ConversionResult<Self> {
        match value {
            Value::I64(n) => Ok(n),
            Value::F64(n) => Ok(n as i64),
            Value::Bool(b) => Ok(b as i64),
            Value::Str(s) => s
                .parse()
                .map_err(|_| failed("String", "i64", format!("'{s}' is not an integer"))),
            Value::Null => Ok(0),
            other => Err(failed(value_type_name(&other), "i64", "unsupported source type")),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> ConversionResult<Self> {
        match value {
            Value::F64(n) => Ok(n),
            Value::I64(n) => Ok(n as f64),
            Value::Str(s) => s
                .parse()
                .map_err(|_| failed("String", "f64", format!("'{s}' is not a float"))),
            Value::Null => Ok(0.0),
            other => Err(failed(value_type_name(&other), "f64", "unsupported source type")),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> ConversionResult<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            Value::I64(n) => Ok(n != 0),
            Value::Str(s) => s
                .parse()
                .map_err(|_| failed("String", "bool", format!("'{s}' is not a boolean"))),
            Value::Null => Ok(false),
            other => Err(failed(value_type_name(&other), "bool", "unsupported source type")),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> ConversionResult<Self> {
        match value {
            Value::Str(s) => Ok(s),
            Value::I64(n) => Ok(n.to_string()),
            Value::F64(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Guid(g) => Ok(g.to_string()),
            Value::Null => Ok(String::new()),
            other => Err(failed(value_type_name(&other), "String", "unsupported source type")),
        }
    }
}

impl FromValue for Guid {
    fn from_value(value: Value) -> ConversionResult<Self> {
        match value {
            Value::Guid(g) => Ok(g),
            Value::Str(s) => Guid::parse(&s).ok_or_else(|| failed("String", "Guid", format!("'{s}' is not a valid Guid"))),
            Value::Bytes(bytes) => {
                let array: [u8; 16] = bytes
                    .try_into()
                    .map_err(|_| failed("Bytes", "Guid", "expected exactly 16 bytes"))?;
                Ok(Guid::from_bytes(array))
            }
            other => Err(failed(value_type_name(&other), "Guid", "unsupported source type")),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: Value) -> ConversionResult<Self> {
        match value {
            Value::Bytes(bytes) => Ok(bytes),
            Value::Guid(g) => Ok(g.0.to_vec()),
            Value::Str(s) => base64::engine::general_purpose::STANDARD
                .decode(&s)
                .map_err(|e| failed("String", "Vec<u8>", e.to_string())),
            other => Err(failed(value_type_name(&other), "Vec<u8>", "unsupported source type")),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> ConversionResult<Self> {
        match value {
            Value::Null => Ok(None),
            other => Ok(Some(T::from_value(other)?)),
        }
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "Null",
        Value::Bool(_) => "Bool",
        Value::I64(_) => "I64",
        Value::F64(_) => "F64",
        Value::Str(_) => "Str",
        Value::Bytes(_) => "Bytes",
        Value::Guid(_) => "Guid",
        Value::List(_) => "List",
    }
}

/// Encodes a byte array as base64, the inverse of the `String -> Vec<u8>`
/// conversion rule above.
pub fn bytes_to_base64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Resolves an enum from a `Value`: by underlying integer ordinal, or by
/// case-insensitive variant name, per spec §4.8 ("enum <-> integer via
/// underlying value, string -> enum by case-insensitive name").
pub fn enum_from_value<E: Copy>(value: &Value, variants: &[(&str, i64, E)]) -> ConversionResult<E> {
    match value {
        Value::Str(s) => variants
            .iter()
            .find(|(name, _, _)| name.eq_ignore_ascii_case(s))
            .map(|(_, _, e)| *e)
            .ok_or_else(|| failed("String", "enum", format!("no variant named '{s}'"))),
        Value::I64(n) => variants
            .iter()
            .find(|(_, ordinal, _)| ordinal == n)
            .map(|(_, _, e)| *e)
            .ok_or_else(|| failed("I64", "enum", format!("no variant with ordinal {n}"))),
        other => Err(failed(value_type_name(other), "enum", "unsupported source type")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_converts_to_target_default() {
        assert_eq!(convert::<i64>(Value::Null).unwrap(), 0);
        assert_eq!(convert::<String>(Value::Null).unwrap(), "");
        assert!(!convert::<bool>(Value::Null).unwrap());
    }

    #[test]
    fn nullable_target_strips_nullability() {
        assert_eq!(convert::<Option<i64>>(Value::Null).unwrap(), None);
        assert_eq!(convert::<Option<i64>>(Value::I64(5)).unwrap(), Some(5));
    }

    #[test]
    fn string_to_primitive_via_parse() {
        assert_eq!(convert::<i64>(Value::Str("42".to_string())).unwrap(), 42);
        let err = convert::<i64>(Value::Str("nope".to_string())).unwrap_err();
        assert!(matches!(err, ConversionError::Failed { .. }));
    }

    #[test]
    fn guid_round_trips_through_string_and_bytes() {
        let guid = Guid::from_bytes([1; 16]);
        let as_string = Value::Str(guid.to_string());
        assert_eq!(convert::<Guid>(as_string).unwrap(), guid);
        let as_bytes = Value::Bytes(guid.0.to_vec());
        assert_eq!(convert::<Guid>(as_bytes).unwrap(), guid);
    }

    #[test]
    fn base64_round_trips_to_bytes() {
        let encoded = bytes_to_base64(&[1, 2, 3]);
        assert_eq!(convert::<Vec<u8>>(Value::Str(encoded)).unwrap(), vec![1, 2, 3]);
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Status {
        Active,
        Inactive,
    }

    #[test]
    fn enum_from_case_insensitive_name_or_ordinal() {
        let variants = [("Active", 0i64, Status::Active), ("Inactive", 1i64, Status::Inactive)];
        assert_eq!(
            enum_from_value(&Value::Str("active".to_string()), &variants).unwrap(),
            Status::Active
        );
        assert_eq!(enum_from_value(&Value::I64(1), &variants).unwrap(), Status::Inactive);
    }
}
