//! Best-effort codec for the two TEXT-persisted task fields.
//!
//! `est_prev_hours` and `info` are stored as serialized JSON text. Historical
//! rows contain empty strings and otherwise malformed payloads, so decoding
//! never fails: anything unparseable collapses to the empty default and the
//! read path stays available. Encoding is strict JSON.

use serde_json::Value;

/// Decode the persisted estimate-history sequence. Malformed or empty text,
/// or JSON that is not an array of numbers, decodes to `[]`.
pub fn decode_est_prev_hours(raw: &str) -> Vec<f64> {
    serde_json::from_str(raw).unwrap_or_default()
}

/// Serialize an estimate-history sequence for storage.
pub fn encode_est_prev_hours(values: &[f64]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

/// Decode the persisted `info` document. Malformed or empty text decodes to
/// the empty JSON object.
pub fn decode_info(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::Object(Default::default()))
}

/// Serialize an `info` document for storage.
pub fn encode_info(value: &Value) -> String {
    value.to_string()
}
