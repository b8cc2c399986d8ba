//! Server-sent-event parsing for Gradio's `call/<endpoint>/<event_id>` stream.
//!
//! A finished call looks like:
//!
//! ```text
//! event: generating
//! data: ["partial"]
//!
//! event: complete
//! data: ["final answer"]
//! ```
//!
//! Only the `complete` and `error` events matter here; partial results and
//! heartbeats are skipped.

use serde_json::Value;

use crate::error::GradioError;

/// One dispatched event from the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    pub event: String,
    pub data: String,
}

/// Split an event-stream body into events.
///
/// Multiple `data:` lines in one event are joined with `\n`. Comment lines
/// and unknown fields are ignored. An event without an `event:` field is
/// named `message`.
pub fn parse_events(body: &str) -> Vec<SseEvent> {
    let mut events = Vec::new();
    let mut event: Option<String> = None;
    let mut data: Vec<&str> = Vec::new();

    for raw in body.lines() {
        let line = raw.trim_end_matches('\r');

        if line.is_empty() {
            if event.is_some() || !data.is_empty() {
                events.push(SseEvent {
                    event: event.take().unwrap_or_else(|| "message".to_string()),
                    data: data.join("\n"),
                });
                data.clear();
            }
            continue;
        }

        if line.starts_with(':') {
            continue;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "event" => event = Some(value.to_string()),
            "data" => data.push(value),
            _ => {}
        }
    }

    if event.is_some() || !data.is_empty() {
        events.push(SseEvent {
            event: event.unwrap_or_else(|| "message".to_string()),
            data: data.join("\n"),
        });
    }

    events
}

/// Read the final result of a call from its event stream.
pub fn read_call_result(body: &str) -> Result<Value, GradioError> {
    for event in parse_events(body) {
        match event.event.as_str() {
            "complete" => return Ok(serde_json::from_str(&event.data)?),
            "error" => {
                let detail = match event.data.trim() {
                    "" | "null" => "upstream reported an error".to_string(),
                    other => other.to_string(),
                };
                return Err(GradioError::Prediction(detail));
            }
            _ => {}
        }
    }

    Err(GradioError::ResponseParse(
        "event stream ended without a complete event".to_string(),
    ))
}
