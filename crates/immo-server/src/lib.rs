//! immo-server
//!
//! HTTP proxy between the chat client and the hosted assistant space.
//! The library exposes the router so integration tests can drive it
//! in-process; `main.rs` only wires configuration, tracing and the listener.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::http::{Method, header};
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};

use immo_core::messages::{CHAT_PATH, HEALTH_PATH};

use crate::state::AppState;

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(HEALTH_PATH, get(routes::health::health_check))
        .route(CHAT_PATH, post(routes::chat::chat))
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
