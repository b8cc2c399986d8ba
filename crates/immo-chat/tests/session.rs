use std::sync::Mutex;

use immo_chat::api::{ApiClientError, BoxFuture, ChatApi};
use immo_chat::session::ChatSession;
use immo_core::messages::{APOLOGY, WELCOME, WELCOME_ID};
use immo_core::models::chat_message::ChatRole;

/// Replies `reply-<message>`, or fails every call.
struct FakeApi {
    fail: bool,
    sent: Mutex<Vec<String>>,
}

impl FakeApi {
    fn replying() -> Self {
        Self {
            fail: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }
}

impl ChatApi for FakeApi {
    fn send<'a>(&'a self, message: &'a str) -> BoxFuture<'a, Result<String, ApiClientError>> {
        Box::pin(async move {
            self.sent.lock().unwrap().push(message.to_string());
            if self.fail {
                Err(ApiClientError::Status(500))
            } else {
                Ok(format!("reply-{message}"))
            }
        })
    }
}

fn transcript(session: &ChatSession) -> Vec<(ChatRole, String)> {
    session
        .messages()
        .iter()
        .map(|m| (m.role, m.content.clone()))
        .collect()
}

#[test]
fn new_session_holds_only_the_welcome_message() {
    let session = ChatSession::new();

    assert_eq!(session.messages().len(), 1);
    assert_eq!(session.messages()[0].id, WELCOME_ID);
    assert_eq!(session.messages()[0].role, ChatRole::Assistant);
    assert_eq!(session.messages()[0].content, WELCOME);
    assert!(!session.is_loading());
}

#[tokio::test]
async fn messages_are_appended_in_order() {
    let api = FakeApi::replying();
    let mut session = ChatSession::new();

    session.input = "A".to_string();
    session.send_message(&api).await;
    session.input = "B".to_string();
    session.send_message(&api).await;

    assert_eq!(
        transcript(&session),
        vec![
            (ChatRole::Assistant, WELCOME.to_string()),
            (ChatRole::User, "A".to_string()),
            (ChatRole::Assistant, "reply-A".to_string()),
            (ChatRole::User, "B".to_string()),
            (ChatRole::Assistant, "reply-B".to_string()),
        ]
    );
    assert!(!session.is_loading());
    assert!(session.input.is_empty());
}

#[tokio::test]
async fn failure_appends_apology_and_clears_loading() {
    let api = FakeApi::failing();
    let mut session = ChatSession::new();

    session.input = "Prix d'un F3 à Oran ?".to_string();
    session.send_message(&api).await;

    let messages = session.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].role, ChatRole::User);
    assert_eq!(messages[2].role, ChatRole::Assistant);
    assert_eq!(messages[2].content, APOLOGY);
    assert!(!session.is_loading());
}

#[tokio::test]
async fn blank_input_is_not_sent() {
    let api = FakeApi::replying();
    let mut session = ChatSession::new();

    for input in ["", "   ", "\n\t"] {
        session.input = input.to_string();
        session.send_message(&api).await;
    }

    assert_eq!(session.messages().len(), 1);
    assert!(api.sent.lock().unwrap().is_empty());
}

#[test]
fn input_is_trimmed_before_sending() {
    let mut session = ChatSession::new();
    session.input = "  Alger centre \n".to_string();

    let sent = session.begin_send();

    assert_eq!(sent.as_deref(), Some("Alger centre"));
    assert_eq!(session.messages()[1].content, "Alger centre");
    assert!(session.input.is_empty());
    assert!(session.is_loading());
}

#[test]
fn second_send_is_refused_while_loading() {
    let mut session = ChatSession::new();
    session.input = "first".to_string();
    assert!(session.begin_send().is_some());

    session.input = "second".to_string();
    assert!(!session.can_send());
    assert!(session.begin_send().is_none());
    assert_eq!(session.input, "second");
    assert_eq!(session.messages().len(), 2);

    session.finish_send(Ok("done".to_string()));
    assert!(session.can_send());
}
