//! immo-gradio
//!
//! Client for the hosted Gradio space that answers the assistant's
//! questions, plus the [`predict::Predictor`] seam the proxy calls through.

pub mod client;
pub mod error;
pub mod predict;
pub mod sse;
