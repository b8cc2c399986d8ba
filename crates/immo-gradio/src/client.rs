//! HTTP client for a hosted Gradio space.
//!
//! # Call protocol
//!
//! A space is addressed as `owner/name`. Its serving host is looked up on
//! the Hugging Face hub (`GET {hub}/{owner}/{name}/host`). A call to an
//! endpoint is then a two-step exchange:
//!
//! 1. `POST {host}/gradio_api/call/{endpoint}` with `{"data": [...]}`
//!    returns `{"event_id": "..."}`.
//! 2. `GET {host}/gradio_api/call/{endpoint}/{event_id}` streams server-sent
//!    events until a `complete` (or `error`) event arrives.
//!
//! Gradio 4 spaces serve the same API without the `gradio_api` prefix; a
//! 404 on the prefixed POST falls back to `{host}/call/{endpoint}`.
//!
//! The host is resolved again on every call so a space that restarts on a
//! new host is picked up without restarting the proxy.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};
use url::Url;

use crate::error::GradioError;
use crate::sse::read_call_result;

/// Hugging Face hub API for space metadata.
pub const HUB_SPACES_API: &str = "https://huggingface.co/api/spaces";

/// Path prefix of the call API on Gradio 5 spaces.
const CALL_API_PREFIX: &str = "gradio_api";

#[derive(Debug, Deserialize)]
struct SpaceHost {
    host: String,
}

#[derive(Debug, Deserialize)]
struct CallStarted {
    event_id: String,
}

/// Client for one Gradio space.
///
/// Holds no per-call state, so a single instance can serve concurrent
/// requests.
#[derive(Debug, Clone)]
pub struct GradioClient {
    http: reqwest::Client,
    space: String,
    hub_api: String,
}

impl GradioClient {
    /// Client for `space`, either an `owner/name` identifier or a direct
    /// `http(s)://` URL of the serving host.
    pub fn new(space: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            space: space.into(),
            hub_api: HUB_SPACES_API.to_string(),
        }
    }

    /// Use a different hub API base for host resolution.
    pub fn with_hub_api(mut self, hub_api: impl Into<String>) -> Self {
        self.hub_api = hub_api.into();
        self
    }

    pub fn space(&self) -> &str {
        &self.space
    }

    /// Resolve the serving host of the space.
    pub async fn resolve_host(&self) -> Result<Url, GradioError> {
        if self.space.starts_with("http://") || self.space.starts_with("https://") {
            return Ok(Url::parse(&self.space)?);
        }

        let (owner, name) = self
            .space
            .split_once('/')
            .filter(|(owner, name)| !owner.is_empty() && !name.is_empty())
            .ok_or_else(|| GradioError::SpaceResolution {
                space: self.space.clone(),
                reason: "expected `owner/name`".to_string(),
            })?;

        let url = format!("{}/{owner}/{name}/host", self.hub_api.trim_end_matches('/'));
        let info: SpaceHost = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| GradioError::SpaceResolution {
                space: self.space.clone(),
                reason: e.to_string(),
            })?
            .json()
            .await?;

        debug!(space = %self.space, host = %info.host, "resolved space host");
        Ok(Url::parse(&info.host)?)
    }

    /// Call `endpoint` (e.g. `/predict`) with positional `data` and return
    /// the result carried by the `complete` event.
    pub async fn call(&self, endpoint: &str, data: Value) -> Result<Value, GradioError> {
        let host = self.resolve_host().await?;
        let host = host.as_str().trim_end_matches('/');
        let endpoint = endpoint.trim_start_matches('/');
        let body = json!({ "data": data });

        info!(space = %self.space, endpoint, "calling space endpoint");

        let mut call_url = format!("{host}/{CALL_API_PREFIX}/call/{endpoint}");
        let mut response = self.http.post(&call_url).json(&body).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            // Gradio 4 spaces serve the call API at the root.
            debug!(url = %call_url, "call API not found, retrying without prefix");
            call_url = format!("{host}/call/{endpoint}");
            response = self.http.post(&call_url).json(&body).send().await?;
        }

        let started: CallStarted = response.error_for_status()?.json().await?;

        debug!(event_id = %started.event_id, "call accepted, reading result stream");

        let stream = self
            .http
            .get(format!("{call_url}/{}", started.event_id))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        read_call_result(&stream)
    }
}
