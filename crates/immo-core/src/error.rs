use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),
}
