use axum::Json;
use axum::body::Bytes;
use axum::extract::State;

use immo_core::models::api::{ChatReply, ChatRequest};
use immo_gradio::predict::extract_reply;

use crate::error::ApiError;
use crate::state::AppState;

/// Forward one user message to the assistant space and relay its reply.
///
/// A body without a usable `message` gets `Empty message`; a body that is
/// not JSON gets the generic failure. Neither reaches the upstream service.
pub async fn chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatReply>, ApiError> {
    let message = ChatRequest::from_slice(&body)?.validated_message()?;

    let result = state.predictor.predict(&message).await?;
    let reply = extract_reply(result)?;

    Ok(Json(ChatReply { reply }))
}
