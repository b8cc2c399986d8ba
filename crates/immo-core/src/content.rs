//! Text helpers applied to assistant replies before display.
//!
//! The hosted model tends to return HTML-escaped ampersands, literal `\n`
//! escape sequences, and long runs of blank lines. [`normalize_assistant_content`]
//! cleans those up so the Markdown renderer sees ordinary text.

use serde_json::Value;
use url::Url;

/// Coerce a reply value to display text. Strings are used verbatim, anything
/// else becomes its JSON text.
pub fn reply_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Normalize assistant content before Markdown parsing:
///
/// 1. `&amp;` and `&#38;` (any number of leading zeros) become `&`
/// 2. the two characters `\` `n` become a newline
/// 3. three or more consecutive newlines collapse to two
pub fn normalize_assistant_content(content: &str) -> String {
    let unescaped = decode_ampersands(content).replace("\\n", "\n");
    collapse_blank_lines(&unescaped)
}

fn decode_ampersands(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match ampersand_entity_len(tail) {
            Some(len) => {
                out.push('&');
                rest = &tail[len..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Length of the ampersand entity at the start of `s`, if there is one.
fn ampersand_entity_len(s: &str) -> Option<usize> {
    if s.starts_with("&amp;") {
        return Some("&amp;".len());
    }

    let digits = s.strip_prefix("&#")?;
    let zeros = digits.len() - digits.trim_start_matches('0').len();
    digits[zeros..]
        .starts_with("38;")
        .then_some("&#".len() + zeros + "38;".len())
}

fn collapse_blank_lines(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut newlines = 0usize;

    for c in input.chars() {
        if c == '\n' {
            newlines += 1;
            if newlines <= 2 {
                out.push(c);
            }
        } else {
            newlines = 0;
            out.push(c);
        }
    }

    out
}

/// Short `host+path` label for a URL, trailing slash removed.
///
/// Falls back to the raw string when it does not parse as an absolute URL
/// or yields an empty label.
pub fn short_url_label(href: &str) -> String {
    let Ok(url) = Url::parse(href) else {
        return href.to_string();
    };

    let host = url.host_str().unwrap_or_default();
    let path = url.path();
    let path = path.strip_suffix('/').unwrap_or(path);

    let label = format!("{host}{path}");
    if label.is_empty() {
        href.to_string()
    } else {
        label
    }
}

/// Visible label for a hyperlink.
///
/// The link's own text wins when it is non-blank and differs from the
/// target; otherwise the shortened URL is shown.
pub fn link_label(href: &str, text: &str) -> String {
    if !text.trim().is_empty() && text != href {
        text.to_string()
    } else {
        short_url_label(href)
    }
}

/// A run of plain text, split around bare URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSegment<'a> {
    Text(&'a str),
    /// A URL literal as written, with the target it points to. A `www.`
    /// literal targets `http://`.
    Url { text: &'a str, href: String },
}

const URL_PREFIXES: [&str; 3] = ["https://", "http://", "www."];

/// Split `text` around URL literals (`http://`, `https://` or `www.`).
///
/// A literal starts at the beginning of the text or after whitespace, `(`,
/// `*`, `_` or `~`, and runs up to whitespace or `<`. Trailing punctuation
/// and an unbalanced closing parenthesis are left out of the URL. Literals
/// that do not parse to a URL with a host stay plain text.
pub fn split_bare_urls(text: &str) -> Vec<TextSegment<'_>> {
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;

    while let Some(c) = text[i..].chars().next() {
        let at_boundary = text[..i]
            .chars()
            .next_back()
            .is_none_or(|prev| prev.is_whitespace() || matches!(prev, '(' | '*' | '_' | '~'));

        if at_boundary && let Some(url) = bare_url_at(&text[i..]) {
            if plain_start < i {
                segments.push(TextSegment::Text(&text[plain_start..i]));
            }
            i += url.len();
            plain_start = i;
            segments.push(TextSegment::Url {
                text: url,
                href: bare_url_href(url),
            });
            continue;
        }

        i += c.len_utf8();
    }

    if plain_start < text.len() {
        segments.push(TextSegment::Text(&text[plain_start..]));
    }
    segments
}

fn bare_url_at(s: &str) -> Option<&str> {
    let prefix = URL_PREFIXES
        .iter()
        .find(|p| s.get(..p.len()).is_some_and(|head| head.eq_ignore_ascii_case(p)))?;

    let end = s.find(|c: char| c.is_whitespace() || c == '<').unwrap_or(s.len());
    let mut candidate = &s[..end];
    loop {
        let mut trimmed =
            candidate.trim_end_matches(['?', '!', '.', ',', ':', ';', '*', '_', '~', '\'', '"']);
        if trimmed.ends_with(')') && trimmed.matches(')').count() > trimmed.matches('(').count() {
            trimmed = &trimmed[..trimmed.len() - 1];
        }
        if trimmed.len() == candidate.len() {
            break;
        }
        candidate = trimmed;
    }

    if candidate.len() <= prefix.len() {
        return None;
    }

    let url = Url::parse(&bare_url_href(candidate)).ok()?;
    url.host_str().filter(|host| !host.is_empty())?;
    Some(candidate)
}

fn bare_url_href(literal: &str) -> String {
    if literal.get(..4).is_some_and(|head| head.eq_ignore_ascii_case("www.")) {
        format!("http://{literal}")
    } else {
        literal.to_string()
    }
}
