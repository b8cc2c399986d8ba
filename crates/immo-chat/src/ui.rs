use jiff::tz::TimeZone;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
};
use unicode_width::UnicodeWidthStr;

use immo_core::content::normalize_assistant_content;
use immo_core::messages::{INPUT_PLACEHOLDER, TYPING_INDICATOR};
use immo_core::models::chat_message::{ChatMessage, ChatRole};

use crate::app::App;
use crate::markdown::render_markdown;

pub fn ui(f: &mut ratatui::Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Messages
            Constraint::Length(3), // Input
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_messages(f, app, chunks[1]);
    render_input(f, app, chunks[2]);
}

fn render_header(f: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let header = Paragraph::new(format!("Assistant Immo | {}", app.server_url))
        .style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("J'achète en Algérie")
                .style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(header, area);
}

fn render_messages(f: &mut ratatui::Frame, app: &mut App, area: ratatui::layout::Rect) {
    let mut lines: Vec<Line<'static>> = Vec::new();
    for message in app.session.messages() {
        lines.extend(message_lines(message));
        lines.push(Line::default());
    }

    if app.session.is_loading() {
        lines.push(Line::from(Span::styled(
            TYPING_INDICATOR,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    } else {
        lines.pop();
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(
            "Messages ({}) - Esc to quit",
            app.session.messages().len()
        ))
        .style(Style::default().fg(Color::White));

    let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });

    let inner = block.inner(area);
    let total = paragraph.line_count(inner.width);
    app.set_max_scroll(total.saturating_sub(inner.height as usize));

    let offset = u16::try_from(app.scroll_offset).unwrap_or(u16::MAX);
    f.render_widget(paragraph.block(block).scroll((offset, 0)), area);

    let mut scroll_state = ScrollbarState::new(app.max_scroll).position(app.scroll_offset);
    let scrollbar = Scrollbar::default()
        .orientation(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None);
    let scrollbar_area = area.inner(Margin {
        horizontal: 0,
        vertical: 1,
    });
    f.render_stateful_widget(scrollbar, scrollbar_area, &mut scroll_state);
}

/// Header line plus body lines of one message. Assistant content is
/// rendered as Markdown; user text is shown as typed.
pub fn message_lines(message: &ChatMessage) -> Vec<Line<'static>> {
    let (author, color) = match message.role {
        ChatRole::User => ("Vous", Color::Cyan),
        ChatRole::Assistant => ("Assistant", Color::Green),
        ChatRole::System => ("Système", Color::Magenta),
    };
    let timestamp = message
        .created_at
        .to_zoned(TimeZone::system())
        .strftime("%H:%M:%S")
        .to_string();

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("[{timestamp}] "), Style::default().fg(Color::Yellow)),
        Span::styled(
            author,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])];

    match message.role {
        ChatRole::User => lines.extend(
            message
                .content
                .lines()
                .map(|line| Line::from(line.to_string())),
        ),
        ChatRole::Assistant | ChatRole::System => {
            lines.extend(render_markdown(&normalize_assistant_content(
                &message.content,
            )));
        }
    }

    lines
}

fn render_input(f: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let input = &app.session.input;
    let title = if app.session.is_loading() {
        "En attente de la réponse..."
    } else {
        "Votre message (Entrée pour envoyer)"
    };

    // Scroll long input so its tail and the cursor after it stay visible.
    let inner_width = usize::from(area.width.saturating_sub(2));
    let typed = input.width();
    let hidden = (typed + 1).saturating_sub(inner_width);
    let hidden_cols = u16::try_from(hidden).unwrap_or(u16::MAX);

    let paragraph = if input.is_empty() {
        Paragraph::new(Span::styled(
            INPUT_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Paragraph::new(input.as_str())
            .style(Style::default().fg(Color::Yellow))
            .scroll((0, hidden_cols))
    };

    f.render_widget(
        paragraph.block(Block::default().borders(Borders::ALL).title(title)),
        area,
    );

    let cursor = u16::try_from(typed - hidden).unwrap_or(u16::MAX);
    f.set_cursor_position((area.x + cursor + 1, area.y + 1));
}
