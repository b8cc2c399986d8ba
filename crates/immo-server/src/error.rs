use std::any::Any;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use immo_core::error::CoreError;
use immo_core::messages::{CONTACT_FAILURE_ERROR, EMPTY_MESSAGE_ERROR};
use immo_core::models::api::ErrorBody;
use immo_gradio::error::GradioError;

/// Unified API error type for all route handlers.
///
/// Internal and upstream failures are logged with full detail; the caller
/// only ever sees one of the fixed public messages.
#[derive(Debug)]
pub enum ApiError {
    EmptyMessage,
    Upstream(GradioError),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::EmptyMessage => (StatusCode::BAD_REQUEST, EMPTY_MESSAGE_ERROR),
            ApiError::Upstream(e) => {
                tracing::error!(error = %e, "assistant call failed");
                (StatusCode::INTERNAL_SERVER_ERROR, CONTACT_FAILURE_ERROR)
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, CONTACT_FAILURE_ERROR)
            }
        };

        (
            status,
            Json(ErrorBody {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::EmptyMessage => ApiError::EmptyMessage,
            CoreError::MalformedBody(err) => {
                ApiError::Internal(format!("chat body is not valid JSON: {err}"))
            }
        }
    }
}

impl From<GradioError> for ApiError {
    fn from(e: GradioError) -> Self {
        ApiError::Upstream(e)
    }
}

/// Response for a handler that panicked. Used with `CatchPanicLayer`.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}
