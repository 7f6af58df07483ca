//! Precondition checks shared by the descriptor builders.
//!
//! Typed descriptors only need presence checks. Loosely typed descriptors
//! (`serde_json::Value`) additionally get their scalar fields coerced to
//! strings in place.

use crate::error::{Error, Result};
use serde_json::{Map, Number, Value};

/// Fail with [`Error::MissingParameter`] if `value` is absent or empty.
pub fn require<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::missing(name)),
    }
}

/// Fail with [`Error::MissingParameter`] if `value` is empty.
pub fn require_non_empty<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    require(name, Some(value))
}

/// Borrow `value` as a JSON object.
///
/// `null` counts as a missing parameter, any other non-object is a type mismatch.
pub fn require_object<'a>(name: &str, value: &'a mut Value) -> Result<&'a mut Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Err(Error::missing(name)),
        _ => Err(Error::type_mismatch(name, "object")),
    }
}

/// Coerce a required field of `map` to a string in place.
pub fn coerce_required(map: &mut Map<String, Value>, field: &str) -> Result<()> {
    let slot = map.get_mut(field).ok_or_else(|| Error::missing(field))?;
    match coerce_scalar(field, slot)? {
        Some(s) if !s.is_empty() => {
            *slot = Value::String(s);
            Ok(())
        }
        _ => Err(Error::missing(field)),
    }
}

/// Coerce an optional field of `map` to a string in place. Absent or `null`
/// fields are left untouched.
pub fn coerce_optional(map: &mut Map<String, Value>, field: &str) -> Result<()> {
    if let Some(slot) = map.get_mut(field) {
        if let Some(s) = coerce_scalar(field, slot)? {
            *slot = Value::String(s);
        }
    }
    Ok(())
}

fn coerce_scalar(field: &str, value: &Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(number_to_string(n))),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(Error::type_mismatch(field, "string")),
    }
}

/// String form of a JSON number. Integral floats drop their fraction
/// (`1.0` -> `"1"`), other floats keep the shortest round-trip form.
fn number_to_string(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => f.to_string(),
        _ => n.to_string(),
    }
}
