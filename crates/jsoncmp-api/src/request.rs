//! Store request decoding
//!
//! The body is decoded by hand rather than through a typed `Json<T>`
//! extractor so that every failure surfaces as a `CompareError` with the
//! service's own wording.

use jsoncmp_core::core_types::Sensitive;
use jsoncmp_core::errors::CompareError;
use serde_json::{Map, Value};

pub const SLOT_FIELD: &str = "slotNumber";
pub const PAYLOAD_FIELD: &str = "payload";

/// Older clients send `number` / `payload_to_compare`
const SLOT_ALIAS: &str = "number";
const PAYLOAD_ALIAS: &str = "payload_to_compare";

/// A decoded `POST /api/store` body
///
/// The slot number is not range checked here; the orchestrator does that.
#[derive(Debug)]
pub struct StoreRequest {
    pub slot_number: i64,
    pub payload: Sensitive<String>,
}

impl StoreRequest {
    /// Decode a request body
    ///
    /// # Errors
    ///
    /// - `InvalidRequest`: body is not a JSON object, or the slot number is
    ///   not an integer
    /// - `MissingField`: a required field is absent or null
    /// - `MalformedPayload`: `payload` is present but not a string
    pub fn from_body(body: &[u8]) -> Result<Self, CompareError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| CompareError::InvalidRequest {
                reason: format!("request body is not valid JSON: {}", e),
            })?;
        let Value::Object(fields) = value else {
            return Err(CompareError::InvalidRequest {
                reason: "request body must be a JSON object".to_string(),
            });
        };

        let slot = field(&fields, SLOT_FIELD, SLOT_ALIAS)?;
        let payload = field(&fields, PAYLOAD_FIELD, PAYLOAD_ALIAS)?;

        Ok(Self {
            slot_number: slot_number(slot)?,
            payload: payload_text(payload)?,
        })
    }
}

fn field<'a>(
    fields: &'a Map<String, Value>,
    name: &str,
    alias: &str,
) -> Result<&'a Value, CompareError> {
    fields
        .get(name)
        .or_else(|| fields.get(alias))
        .filter(|v| !v.is_null())
        .ok_or_else(|| CompareError::MissingField {
            field: name.to_string(),
        })
}

/// Integers, integral floats and decimal integer strings are accepted
fn slot_number(value: &Value) -> Result<i64, CompareError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| CompareError::InvalidRequest {
        reason: format!("The {} field must be an integer", SLOT_FIELD),
    })
}

fn payload_text(value: &Value) -> Result<Sensitive<String>, CompareError> {
    match value {
        Value::String(s) => Ok(Sensitive::new(s.clone())),
        other => Err(CompareError::MalformedPayload {
            reason: format!("expected a string of JSON text, got {}", type_label(other)),
        }),
    }
}

fn type_label(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
