//! The prediction call the proxy makes for every chat message.

use std::future::Future;
use std::pin::Pin;

use serde::Serialize;
use serde_json::{Value, json};

use crate::client::GradioClient;
use crate::error::GradioError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Hosted space answering the assistant's questions.
pub const SPACE_ID: &str = "DmbOran/Assistant_Immo";

/// Endpoint of the space that takes a message and returns a reply.
pub const PREDICT_ENDPOINT: &str = "/predict";

/// Sampling parameters sent with every prediction. Not configurable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationParams {
    pub tokens_max: u32,
    pub temperature: f64,
    pub top_p: f64,
}

impl GenerationParams {
    pub const FIXED: Self = Self {
        tokens_max: 1000,
        temperature: 0.1,
        top_p: 0.1,
    };

    /// Positional `data` array for the `/predict` endpoint, in the order the
    /// endpoint declares its inputs: message, tokens_max, temperature, top_p.
    pub fn to_data(&self, message: &str) -> Value {
        json!([message, self.tokens_max, self.temperature, self.top_p])
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::FIXED
    }
}

/// Something that can turn a user message into a raw prediction result.
///
/// The result is returned as the service produced it; use
/// [`extract_reply`] to pick the reply out of it.
pub trait Predictor: Send + Sync {
    fn predict<'a>(&'a self, message: &'a str) -> BoxFuture<'a, Result<Value, GradioError>>;
}

impl Predictor for GradioClient {
    fn predict<'a>(&'a self, message: &'a str) -> BoxFuture<'a, Result<Value, GradioError>> {
        Box::pin(async move {
            let data = GenerationParams::FIXED.to_data(message);
            self.call(PREDICT_ENDPOINT, data).await
        })
    }
}

/// Pick the reply out of a prediction result.
///
/// A sequence yields its first element; any other value is the reply
/// itself. `null`, an empty sequence, or a sequence starting with `null`
/// are rejected as malformed.
pub fn extract_reply(result: Value) -> Result<Value, GradioError> {
    let reply = match result {
        Value::Array(items) => items
            .into_iter()
            .next()
            .ok_or_else(|| GradioError::ResponseParse("empty result sequence".to_string()))?,
        other => other,
    };

    if reply.is_null() {
        return Err(GradioError::ResponseParse("null reply".to_string()));
    }

    Ok(reply)
}
