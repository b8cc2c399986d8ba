//! immo-chat library root.
//!
//! Re-exports the client modules so integration tests can drive the
//! session, key handling and rendering without a real terminal.

pub mod api;
pub mod app;
pub mod handlers;
pub mod markdown;
pub mod session;
pub mod ui;
