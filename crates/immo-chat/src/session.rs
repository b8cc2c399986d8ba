//! Conversation state of the chat client.
//!
//! A send goes through two steps so the event loop stays responsive while
//! the proxy call is outstanding:
//!
//! ```text
//! idle --begin_send--> sending --finish_send(Ok)--> idle (+ reply)
//!                              --finish_send(Err)-> idle (+ apology)
//! ```
//!
//! Only one send can be in flight; `begin_send` returns `None` while
//! another one is pending.

use immo_core::messages::APOLOGY;
use immo_core::models::chat_message::{ChatMessage, Conversation};
use tracing::{debug, error};

use crate::api::{ApiClientError, ChatApi};

#[derive(Debug, Clone)]
pub struct ChatSession {
    conversation: Conversation,
    pub input: String,
    loading: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// A session holding only the welcome message.
    pub fn new() -> Self {
        Self {
            conversation: Conversation::with_welcome(),
            input: String::new(),
            loading: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.conversation.messages()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether a send would start right now.
    pub fn can_send(&self) -> bool {
        !self.loading && !self.input.trim().is_empty()
    }

    /// Start a send.
    ///
    /// Appends the trimmed input as a user message, clears the input and
    /// marks the session as loading. Returns the text to post, or `None`
    /// when the input is blank or a send is already in flight.
    pub fn begin_send(&mut self) -> Option<String> {
        if !self.can_send() {
            return None;
        }

        let text = self.input.trim().to_string();
        self.conversation.append(ChatMessage::user(text.clone()));
        self.input.clear();
        self.loading = true;

        debug!(chars = text.chars().count(), "sending message");
        Some(text)
    }

    /// Settle the in-flight send. Always leaves the session idle.
    pub fn finish_send(&mut self, outcome: Result<String, ApiClientError>) {
        let content = match outcome {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, "chat request failed");
                APOLOGY.to_string()
            }
        };

        self.conversation.append(ChatMessage::assistant(content));
        self.loading = false;
    }

    /// One full send cycle against `api`. No-op when a send cannot start.
    pub async fn send_message(&mut self, api: &dyn ChatApi) {
        let Some(text) = self.begin_send() else {
            return;
        };

        let outcome = api.send(&text).await;
        self.finish_send(outcome);
    }
}
