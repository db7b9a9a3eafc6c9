//! Payload text to JSON value
//!
//! `serde_json` reads the literal `-0` as the float `-0.0`, which would then
//! mismatch an integer `0` under strict equality. Parsed payloads fold every
//! negative zero into the integer `0` so that `-0` and `0` compare equal.

use crate::errors::CompareError;
use serde_json::Value;

/// Parse submitted payload text
///
/// # Errors
///
/// `MalformedPayload` when the text is not a single JSON value.
pub fn parse_payload(text: &str) -> Result<Value, CompareError> {
    let mut value: Value =
        serde_json::from_str(text).map_err(|e| CompareError::MalformedPayload {
            reason: e.to_string(),
        })?;
    normalize_negative_zero(&mut value);
    Ok(value)
}

/// Replace every `-0.0` number in `value` with the integer `0`
pub fn normalize_negative_zero(value: &mut Value) {
    match value {
        Value::Number(n) => {
            let negative_zero =
                n.is_f64() && n.as_f64().is_some_and(|f| f == 0.0 && f.is_sign_negative());
            if negative_zero {
                *value = Value::from(0);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(normalize_negative_zero),
        Value::Object(members) => members.values_mut().for_each(normalize_negative_zero),
        Value::Null | Value::Bool(_) | Value::String(_) => {}
    }
}
