//! Markdown → terminal lines for assistant replies.
//!
//! Supports the CommonMark block structure plus the GFM table,
//! strikethrough and task-list extensions. Bare `http(s)://` and `www.`
//! URLs in plain text are links too. Links are shown by label only: their
//! own text when it is distinct from the target, otherwise a short
//! `host/path` form. The client never follows a link.

use std::mem;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, TextMergeStream};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use immo_core::content::{TextSegment, link_label, short_url_label, split_bare_urls};

const RULE_WIDTH: usize = 24;

/// Render Markdown `content` into styled lines. Trailing blank lines are
/// dropped.
pub fn render_markdown(content: &str) -> Vec<Line<'static>> {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let mut renderer = Renderer::default();

    for event in TextMergeStream::new(Parser::new_ext(content, options)) {
        renderer.handle(event);
    }

    renderer.finish()
}

fn link_style() -> Style {
    Style::default()
        .fg(Color::LightRed)
        .add_modifier(Modifier::UNDERLINED)
}

fn code_style() -> Style {
    Style::default().fg(Color::Yellow)
}

fn heading_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

#[derive(Debug)]
struct LinkState {
    href: String,
    text: String,
}

#[derive(Debug, Default)]
struct TableState {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    cell: String,
}

#[derive(Debug, Default)]
struct Renderer {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    styles: Vec<Style>,
    /// One entry per open list; `Some(n)` is the next number of an ordered list.
    lists: Vec<Option<u64>>,
    item_marker: Option<String>,
    quote_depth: usize,
    in_code_block: bool,
    link: Option<LinkState>,
    table: Option<TableState>,
}

impl Renderer {
    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.span(code.into_string(), code_style()),
            Event::Html(html) | Event::InlineHtml(html) => self.text(&html),
            Event::SoftBreak => self.text(" "),
            Event::HardBreak => {
                if let Some(table) = self.table.as_mut() {
                    table.cell.push(' ');
                } else {
                    self.flush_line();
                }
            }
            Event::Rule => {
                self.flush_line();
                self.lines.push(Line::from("─".repeat(RULE_WIDTH)));
                self.blank_line();
            }
            Event::TaskListMarker(checked) => self.text(if checked { "[x] " } else { "[ ] " }),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { .. } => {
                self.flush_line();
                self.styles.push(heading_style());
            }
            Tag::BlockQuote(_) => {
                self.flush_line();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(_) => {
                self.flush_line();
                self.in_code_block = true;
            }
            Tag::List(start) => {
                self.flush_line();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush_line();
                let depth = self.lists.len().max(1);
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.item_marker = Some(format!("{}{marker}", "  ".repeat(depth - 1)));
            }
            Tag::Emphasis => self.push_style(Modifier::ITALIC),
            Tag::Strong => self.push_style(Modifier::BOLD),
            Tag::Strikethrough => self.push_style(Modifier::CROSSED_OUT),
            Tag::Link { dest_url, .. } | Tag::Image { dest_url, .. } => {
                self.link = Some(LinkState {
                    href: dest_url.into_string(),
                    text: String::new(),
                });
            }
            Tag::Table(_) => {
                self.flush_line();
                self.table = Some(TableState::default());
            }
            Tag::TableHead | Tag::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    table.row.clear();
                }
            }
            Tag::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    table.cell.clear();
                }
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush_line();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Heading(_) => {
                self.styles.pop();
                self.flush_line();
                self.blank_line();
            }
            TagEnd::BlockQuote(_) => {
                self.flush_line();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank_line();
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.blank_line();
            }
            TagEnd::List(_) => {
                self.flush_line();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Item => self.flush_line(),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.styles.pop();
            }
            TagEnd::Link | TagEnd::Image => {
                if let Some(link) = self.link.take() {
                    let label = link_label(&link.href, &link.text);
                    let style = self.style().patch(link_style());
                    self.span(label, style);
                }
            }
            TagEnd::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    let cell = mem::take(&mut table.cell);
                    table.row.push(cell.trim().to_string());
                }
            }
            TagEnd::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.header = mem::take(&mut table.row);
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    let row = mem::take(&mut table.row);
                    table.rows.push(row);
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    let prefix = self.quote_prefix();
                    for line in table_lines(&table) {
                        let mut spans = vec![Span::raw(prefix.clone())];
                        spans.extend(line.spans);
                        self.lines.push(Line::from(spans));
                    }
                }
                self.blank_line();
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(link) = self.link.as_mut() {
            link.text.push_str(text);
            return;
        }

        if self.in_code_block {
            let prefix = format!("{}    ", self.quote_prefix());
            for line in text.lines() {
                self.lines.push(Line::from(vec![
                    Span::raw(prefix.clone()),
                    Span::styled(line.to_string(), code_style()),
                ]));
            }
            return;
        }

        let style = self.style();
        for segment in split_bare_urls(text) {
            match segment {
                TextSegment::Text(plain) => self.span(plain.to_string(), style),
                TextSegment::Url { href, .. } => {
                    self.span(short_url_label(&href), style.patch(link_style()));
                }
            }
        }
    }

    fn span(&mut self, content: String, style: Style) {
        if let Some(link) = self.link.as_mut() {
            link.text.push_str(&content);
            return;
        }

        if let Some(table) = self.table.as_mut() {
            table.cell.push_str(&content);
            return;
        }

        if self.current.is_empty() {
            let prefix = self.line_prefix();
            if !prefix.is_empty() {
                self.current.push(Span::raw(prefix));
            }
        }

        self.current.push(Span::styled(content, style));
    }

    fn push_style(&mut self, modifier: Modifier) {
        let style = self.style().add_modifier(modifier);
        self.styles.push(style);
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn quote_prefix(&self) -> String {
        "│ ".repeat(self.quote_depth)
    }

    /// Prefix for a fresh line: quote bars, then the pending list marker or
    /// the indentation of the enclosing list item.
    fn line_prefix(&mut self) -> String {
        let mut prefix = self.quote_prefix();
        match self.item_marker.take() {
            Some(marker) => prefix.push_str(&marker),
            None if !self.lists.is_empty() => prefix.push_str(&"  ".repeat(self.lists.len())),
            None => {}
        }
        prefix
    }

    fn flush_line(&mut self) {
        if !self.current.is_empty() {
            let spans = mem::take(&mut self.current);
            self.lines.push(Line::from(spans));
        }
    }

    fn blank_line(&mut self) {
        self.flush_line();
        if self.lines.last().is_some_and(|line| line.width() > 0) {
            self.lines.push(Line::default());
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush_line();
        while self.lines.last().is_some_and(|line| line.width() == 0) {
            self.lines.pop();
        }
        self.lines
    }
}

/// Lay out a table with columns padded to their widest cell.
fn table_lines(table: &TableState) -> Vec<Line<'static>> {
    let columns = table
        .rows
        .iter()
        .map(Vec::len)
        .chain([table.header.len()])
        .max()
        .unwrap_or(0);
    if columns == 0 {
        return Vec::new();
    }

    let mut widths = vec![0usize; columns];
    for row in table.rows.iter().chain([&table.header]) {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let format_row = |row: &[String]| -> String {
        widths
            .iter()
            .enumerate()
            .map(|(i, width)| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                format!("{cell}{}", " ".repeat(width - cell.width()))
            })
            .collect::<Vec<_>>()
            .join(" │ ")
    };

    let mut lines = Vec::with_capacity(table.rows.len() + 2);
    if !table.header.is_empty() {
        lines.push(Line::from(Span::styled(
            format_row(&table.header),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        let separator = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        lines.push(Line::from(separator));
    }
    for row in &table.rows {
        lines.push(Line::from(format_row(row)));
    }
    lines
}
