use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::api::{ApiClientError, ChatApi};
use crate::session::ChatSession;

type PendingReply = oneshot::Receiver<Result<String, ApiClientError>>;

/// Terminal client state: the chat session plus view state.
pub struct App {
    pub session: ChatSession,
    pub server_url: String,
    api: Arc<dyn ChatApi>,
    pending: Option<PendingReply>,

    // Scrolling, in rendered lines from the top of the transcript.
    pub scroll_offset: usize,
    pub max_scroll: usize,
    pub follow_tail: bool,

    pub should_quit: bool,
}

impl App {
    pub fn new(api: Arc<dyn ChatApi>, server_url: impl Into<String>) -> Self {
        Self {
            session: ChatSession::new(),
            server_url: server_url.into(),
            api,
            pending: None,
            scroll_offset: 0,
            max_scroll: 0,
            follow_tail: true,
            should_quit: false,
        }
    }

    /// Start sending the current input in the background.
    ///
    /// Returns `false` when nothing was sent: blank input, or a reply is
    /// still pending.
    pub fn submit(&mut self) -> bool {
        if self.pending.is_some() {
            debug!("send ignored, reply pending");
            return false;
        }

        let Some(text) = self.session.begin_send() else {
            return false;
        };

        let (tx, rx) = oneshot::channel();
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            let outcome = api.send(&text).await;
            if tx.send(outcome).is_err() {
                warn!("reply dropped, client no longer waiting");
            }
        });

        self.pending = Some(rx);
        self.follow_tail = true;
        true
    }

    pub fn is_waiting(&self) -> bool {
        self.pending.is_some()
    }

    /// Wait up to `timeout` for the pending reply and apply it.
    ///
    /// Sleeps for the full `timeout` when nothing is pending, so the event
    /// loop can use this as its idle tick. Returns `true` when a reply was
    /// applied.
    pub async fn wait_for_activity(&mut self, timeout: Duration) -> bool {
        let Some(rx) = self.pending.as_mut() else {
            tokio::time::sleep(timeout).await;
            return false;
        };

        match tokio::time::timeout(timeout, rx).await {
            Ok(outcome) => {
                self.pending = None;
                self.session
                    .finish_send(outcome.unwrap_or(Err(ApiClientError::Interrupted)));
                self.follow_tail = true;
                true
            }
            Err(_elapsed) => false,
        }
    }

    /// Wait for the pending reply, however long it takes.
    pub async fn settle(&mut self) {
        if let Some(rx) = self.pending.take() {
            let outcome = rx.await.unwrap_or(Err(ApiClientError::Interrupted));
            self.session.finish_send(outcome);
            self.follow_tail = true;
        }
    }

    /// Record the scrollable range of the last render. Keeps the view pinned
    /// to the newest line while following.
    pub fn set_max_scroll(&mut self, max_scroll: usize) {
        self.max_scroll = max_scroll;
        if self.follow_tail || self.scroll_offset > max_scroll {
            self.scroll_offset = max_scroll;
        }
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
        self.follow_tail = false;
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = (self.scroll_offset + lines).min(self.max_scroll);
        self.follow_tail = self.scroll_offset >= self.max_scroll;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
