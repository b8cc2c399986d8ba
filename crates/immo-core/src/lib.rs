//! immo-core
//!
//! Shared vocabulary of the assistant: chat messages, the proxy wire types,
//! fixed user-facing strings, and the text helpers used to display replies.
//! No network dependency; both the server and the chat client build on it.

pub mod content;
pub mod error;
pub mod messages;
pub mod models;
