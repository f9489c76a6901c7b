//! JSON shapes exchanged with the backend and the single place that decides
//! whether a response counts as a failure.

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value};

use pdfchat_logging::chat_warn;

use crate::BackendError;

#[derive(Debug, Serialize)]
pub(crate) struct AskPayload<'a> {
    pub question: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<&'a str>,
}

/// Top-level fields of a JSON object reply. Any other body has no fields.
#[derive(Debug, Default)]
pub(crate) struct BackendReply {
    fields: Map<String, Value>,
}

impl BackendReply {
    fn parse(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(fields)) => Self { fields },
            Ok(other) => {
                chat_warn!("Backend returned a JSON {} instead of an object", kind(&other));
                Self::default()
            }
            Err(err) => {
                chat_warn!("Backend returned a non-JSON body ({} bytes): {}", body.len(), err);
                Self::default()
            }
        }
    }

    /// The backend's error message, if `error` is set to anything truthy.
    fn error_message(&self) -> Option<String> {
        match self.fields.get("error")? {
            Value::Null | Value::Bool(false) => None,
            Value::String(text) if text.is_empty() => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }

    pub(crate) fn into_answer(mut self) -> Result<String, BackendError> {
        match self.fields.remove("answer") {
            Some(Value::String(answer)) => Ok(answer),
            _ => Err(BackendError::MissingAnswer),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Classifies a finished HTTP exchange.
///
/// An `error` field wins over the status code; a non-2xx status without one
/// is reported by code. A 2xx body that is not a JSON object carries no error
/// and is treated as an empty reply. Repeated keys keep their last value.
pub(crate) fn interpret_reply(status: StatusCode, body: &[u8]) -> Result<BackendReply, BackendError> {
    let reply = BackendReply::parse(body);
    if let Some(message) = reply.error_message() {
        return Err(BackendError::Rejected(message));
    }
    if !status.is_success() {
        return Err(BackendError::HttpStatus(status.as_u16()));
    }
    Ok(reply)
}
