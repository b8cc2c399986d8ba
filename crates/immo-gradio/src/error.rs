use thiserror::Error;

#[derive(Debug, Error)]
pub enum GradioError {
    #[error("failed to resolve space {space}: {reason}")]
    SpaceResolution { space: String, reason: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid host URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("prediction failed: {0}")]
    Prediction(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
