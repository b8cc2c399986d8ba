//! Wire types of the `POST /api/chat` proxy route.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Request body sent by the chat client.
///
/// `message` is kept as a raw JSON value so callers that send a number or a
/// boolean still get their text forwarded; `null` counts as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<Value>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(Value::String(message.into())),
        }
    }

    /// Parse a raw request body.
    ///
    /// The body must be JSON. Only an object carries a `message`; any other
    /// JSON value parses to a request without one.
    pub fn from_slice(body: &[u8]) -> Result<Self, CoreError> {
        let message = match serde_json::from_slice::<Value>(body)? {
            Value::Object(mut fields) => fields.remove("message"),
            _ => None,
        };
        Ok(Self { message })
    }

    /// Textual form of `message`, if any.
    pub fn message_text(&self) -> Option<String> {
        match self.message.as_ref()? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// The message to forward upstream.
    ///
    /// Fails with [`CoreError::EmptyMessage`] when the message is absent or
    /// blank after trimming. The returned text is not trimmed.
    pub fn validated_message(&self) -> Result<String, CoreError> {
        match self.message_text() {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(CoreError::EmptyMessage),
        }
    }
}

/// Successful proxy response. `reply` is whatever the inference service
/// produced; clients render non-string values as JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: Value,
}

impl ChatReply {
    /// The reply as display text.
    pub fn text(&self) -> String {
        crate::content::reply_to_text(&self.reply)
    }
}

/// Error response body. Only ever carries one of the fixed public messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
