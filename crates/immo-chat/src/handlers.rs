use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

const PAGE: usize = 10;

/// Apply one key press to the app.
///
/// Enter sends. Shift+Enter is reserved for multi-line input and does
/// nothing for now; the input stays single-line.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Ctrl+Alt+char is how AltGr characters arrive on Windows.
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if ctrl => app.quit(),
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::SHIFT) => {}
        KeyCode::Enter => {
            app.submit();
        }
        KeyCode::Char(c) if !ctrl => app.session.input.push(c),
        KeyCode::Backspace => {
            app.session.input.pop();
        }
        KeyCode::Up => app.scroll_up(1),
        KeyCode::Down => app.scroll_down(1),
        KeyCode::PageUp => app.scroll_up(PAGE),
        KeyCode::PageDown => app.scroll_down(PAGE),
        _ => {}
    }
}
