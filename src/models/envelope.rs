// ============================================================================
// ENVELOPE - Canonical response envelope
// ============================================================================
// Endpoint families disagree on field names (success/result/status,
// message/msg). They are normalized here and nowhere else.
// ============================================================================

use serde_json::{Map, Value};

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub success: bool,
    pub message: Option<String>,
    pub data: Value,
}

impl Envelope {
    /// Normalizes a decoded body. A body that is not an object, or an
    /// object without any success flag, is taken as a bare payload.
    pub fn from_value(body: Value) -> Self {
        let mut object = match body {
            Value::Object(object) => object,
            other => {
                return Self {
                    success: true,
                    message: None,
                    data: other,
                }
            }
        };

        let message = extract_message_from(&object);
        match success_flag(&object) {
            Some(success) => Self {
                success,
                message,
                data: object.remove("data").unwrap_or(Value::Null),
            },
            None => {
                let data = match object.remove("data") {
                    Some(data) => data,
                    None => Value::Object(object),
                };
                Self {
                    success: true,
                    message,
                    data,
                }
            }
        }
    }

    /// Failure envelopes become `ApiError::Http` with the HTTP status they came with
    pub fn into_data(self, http_status: u16) -> Result<Value, ApiError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(ApiError::http(http_status, self.message))
        }
    }
}

fn success_flag(object: &Map<String, Value>) -> Option<bool> {
    ["success", "result", "status"]
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_bool))
}

fn extract_message_from(object: &Map<String, Value>) -> Option<String> {
    let direct = ["message", "msg"]
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str));
    if let Some(message) = direct {
        return Some(message.to_string());
    }

    match object.get("error") {
        Some(Value::String(message)) => Some(message.clone()),
        Some(Value::Object(inner)) => inner
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

/// Server message from an error body (`message`, `msg`, then `error`)
pub fn extract_message(body: &Value) -> Option<String> {
    body.as_object()
        .and_then(extract_message_from)
        .filter(|m| !m.trim().is_empty())
}
