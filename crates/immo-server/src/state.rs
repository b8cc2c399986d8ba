use std::sync::Arc;

use immo_gradio::predict::Predictor;

/// Shared application state, injected into all route handlers via Axum state.
///
/// Read-only after startup; each request is independent.
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<dyn Predictor>,
}

impl AppState {
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        Self { predictor }
    }
}
