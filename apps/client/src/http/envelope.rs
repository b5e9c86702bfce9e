//! The server's response envelope.
//!
//! Successful responses look like `{"success":true,"message":..,"data":..}` and
//! failures like `{"success":false,"error":{"code":..,"message":..,"details":{..}}}`.
//! Bare JSON bodies are accepted as well.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Option<BTreeMap<String, String>>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

/// Parse a 2xx body. An empty body is JSON `null`.
pub fn parse_success_body(body: &str) -> Result<Value, serde_json::Error> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body)
}

/// Deserialize the payload of a success response, unwrapping `data` when the
/// value is an envelope.
pub fn unwrap_data<T: DeserializeOwned>(value: Value) -> Result<T, serde_json::Error> {
    match value {
        Value::Object(mut map) if map.contains_key("success") => {
            let data = map.remove("data").unwrap_or(Value::Null);
            serde_json::from_value(data)
        }
        other => serde_json::from_value(other),
    }
}

/// Error details from a failed response body, if it is an error envelope.
pub fn parse_error_body(body: &str) -> Option<ErrorBody> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error)
}
