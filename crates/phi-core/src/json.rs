//! Canonical conversions between `Value` and `serde_json::Value`.
//!
//! Two modes:
//! - **Strict** (`value_to_json`): errors on NaN/Infinity and uncodable types.
//! - **Lossy** (`value_to_json_lossy`): NaN/Infinity→null, uncodable→string.
//!
//! Diagnostics render through the lossy mode so an offending value always
//! has a readable, unicode-preserving form.

use crate::error::PhiError;
use crate::value::Value;

/// Convert a phi Value to JSON, erroring on NaN/Infinity and on values with
/// no JSON form (functions, errors, opaque objects).
pub fn value_to_json(val: &Value) -> Result<serde_json::Value, PhiError> {
    match val {
        Value::None => Ok(serde_json::Value::Null),
        Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
        Value::Int(n) => Ok(serde_json::Value::Number((*n).into())),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .ok_or_else(|| PhiError::domain("cannot encode NaN/Infinity as JSON", Value::None)),
        Value::String(s) => Ok(serde_json::Value::String(s.to_string())),
        Value::List(items) => {
            let arr: Result<Vec<_>, _> = items.iter().map(value_to_json).collect();
            Ok(serde_json::Value::Array(arr?))
        }
        Value::Dict(map) => {
            let mut obj = serde_json::Map::new();
            for (k, v) in map.iter() {
                obj.insert(k.clone(), value_to_json(v)?);
            }
            Ok(serde_json::Value::Object(obj))
        }
        other => Err(PhiError::domain(
            format!("cannot encode {} as JSON", other.type_name()),
            Value::None,
        )),
    }
}

/// Convert a phi Value to JSON without erroring. NaN/Infinity become null,
/// uncodable values become their display form.
pub fn value_to_json_lossy(val: &Value) -> serde_json::Value {
    match val {
        Value::None => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(n) => serde_json::Value::Number((*n).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.to_string()),
        Value::List(items) => {
            serde_json::Value::Array(items.iter().map(value_to_json_lossy).collect())
        }
        Value::Dict(map) => {
            let mut obj = serde_json::Map::new();
            for (k, v) in map.iter() {
                obj.insert(k.clone(), value_to_json_lossy(v));
            }
            serde_json::Value::Object(obj)
        }
        other => serde_json::Value::String(other.to_string()),
    }
}

/// Convert a JSON value to a phi Value. Objects pass through the canonical
/// classification rule, so `{"0": a, "1": b}` comes back as a List.
pub fn json_to_value(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::None,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::None
            }
        }
        serde_json::Value::String(s) => Value::string(s.as_str()),
        serde_json::Value::Array(arr) => Value::list(arr.iter().map(json_to_value).collect()),
        serde_json::Value::Object(obj) => {
            Value::from_entries(obj.iter().map(|(k, v)| (k.clone(), json_to_value(v))))
        }
    }
}

/// The diagnostic rendering of a value: lossy JSON, serialized compactly.
/// `serde_json` emits UTF-8 without escaping non-ASCII, so unicode survives.
pub fn render(val: &Value) -> String {
    serde_json::to_string(&value_to_json_lossy(val)).unwrap_or_else(|_| val.to_string())
}
