use std::sync::Arc;

use immo_chat::api::{ApiClientError, BoxFuture, ChatApi};
use immo_chat::app::App;
use immo_chat::ui::{message_lines, ui};
use immo_core::messages::{INPUT_PLACEHOLDER, TYPING_INDICATOR};
use immo_core::models::chat_message::ChatMessage;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

struct NeverApi;

impl ChatApi for NeverApi {
    fn send<'a>(&'a self, _message: &'a str) -> BoxFuture<'a, Result<String, ApiClientError>> {
        Box::pin(std::future::pending())
    }
}

fn screen(app: &mut App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| ui(f, app)).unwrap();

    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[tokio::test]
async fn renders_welcome_and_placeholder() {
    let mut app = App::new(Arc::new(NeverApi), "http://127.0.0.1:3000");

    let text = screen(&mut app, 100, 20);

    assert!(text.contains("Assistant"));
    assert!(text.contains("Bonjour!"));
    assert!(text.contains(INPUT_PLACEHOLDER));
    assert!(!text.contains(TYPING_INDICATOR));
}

#[tokio::test]
async fn shows_typing_indicator_while_waiting() {
    let mut app = App::new(Arc::new(NeverApi), "http://127.0.0.1:3000");
    app.session.input = "Prix à Oran".to_string();
    assert!(app.submit());

    let text = screen(&mut app, 100, 20);

    assert!(text.contains("Vous"));
    assert!(text.contains("Prix à Oran"));
    assert!(text.contains(TYPING_INDICATOR));
}

#[tokio::test]
async fn long_transcript_follows_the_newest_message() {
    let mut app = App::new(Arc::new(NeverApi), "http://127.0.0.1:3000");
    for i in 0..30 {
        app.session.input = format!("question {i}");
        app.session.begin_send();
        app.session.finish_send(Ok(format!("réponse {i}")));
    }

    let text = screen(&mut app, 80, 20);

    assert!(app.max_scroll > 0);
    assert_eq!(app.scroll_offset, app.max_scroll);
    assert!(text.contains("réponse 29"));
    assert!(!text.contains("question 0 "));
}

#[tokio::test]
async fn long_input_scrolls_to_keep_its_end_visible() {
    let mut app = App::new(Arc::new(NeverApi), "http://127.0.0.1:3000");
    app.session.input = "0123456789abcdefghijklmnopqrstuvwxyz".to_string();

    let mut terminal = Terminal::new(TestBackend::new(20, 12)).unwrap();
    terminal.draw(|f| ui(f, &mut app)).unwrap();

    let buffer = terminal.backend().buffer();
    let input_row: String = (0..buffer.area.width)
        .map(|x| buffer[(x, 10)].symbol().to_string())
        .collect();
    assert!(input_row.contains("jklmnopqrstuvwxyz"), "row {input_row:?}");
    assert!(!input_row.contains("0123"));

    let cursor = terminal.get_cursor_position().unwrap();
    assert_eq!(cursor.x, 18);
    assert_eq!(cursor.y, 10);
}

#[test]
fn assistant_content_is_normalized_before_rendering() {
    let message = ChatMessage::assistant("Ventes &amp; locations\\n\\n\\n\\nVoir [site](https://a.dz/b/)");

    let lines: Vec<String> = message_lines(&message)
        .iter()
        .skip(1)
        .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
        .collect();

    assert_eq!(lines, vec!["Ventes & locations", "", "Voir site"]);
}

#[test]
fn user_content_is_shown_verbatim() {
    let message = ChatMessage::user("**pas** de markdown");

    let lines: Vec<String> = message_lines(&message)
        .iter()
        .skip(1)
        .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
        .collect();

    assert_eq!(lines, vec!["**pas** de markdown"]);
}
