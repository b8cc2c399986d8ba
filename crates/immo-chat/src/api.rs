//! HTTP client for the proxy's `POST /api/chat` route.
//!
//! The chat client only ever talks to the proxy; it holds no credentials
//! and no connection to the hosted space.

use std::future::Future;
use std::pin::Pin;

use immo_core::messages::CHAT_PATH;
use immo_core::models::api::{ChatReply, ChatRequest};
use thiserror::Error;
use tracing::debug;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("proxy returned status {0}")]
    Status(u16),

    #[error("request task ended without a response")]
    Interrupted,
}

/// Sends one message and returns the reply as display text.
pub trait ChatApi: Send + Sync {
    fn send<'a>(&'a self, message: &'a str) -> BoxFuture<'a, Result<String, ApiClientError>>;
}

/// [`ChatApi`] backed by a running `immo-server`.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ProxyClient {
    /// Client for the proxy at `base_url`, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}{CHAT_PATH}", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ChatApi for ProxyClient {
    fn send<'a>(&'a self, message: &'a str) -> BoxFuture<'a, Result<String, ApiClientError>> {
        Box::pin(async move {
            let response = self
                .http
                .post(&self.endpoint)
                .json(&ChatRequest::new(message))
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(ApiClientError::Status(status.as_u16()));
            }

            let reply: ChatReply = response.json().await?;
            debug!(endpoint = %self.endpoint, "reply received");
            Ok(reply.text())
        })
    }
}
