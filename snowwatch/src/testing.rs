//! Test utilities: key-string parsing and a TestBackend render harness.
//!
//! Kept in the library (not behind `cfg(test)`) so integration tests can use
//! the same helpers as unit tests.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};

/// Parse a key string like `"q"`, `"ctrl+c"`, or `"enter"`.
///
/// Modifier prefixes and special names are case-insensitive; a single
/// character keeps its case, so `"G"` is shift-G.
pub fn parse_key_string(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim();
    if key_str.is_empty() {
        return None;
    }

    let parts: Vec<&str> = key_str.split('+').collect();
    let mut modifiers = KeyModifiers::empty();
    let key_part = parts.last()?.trim();

    if parts.len() > 1 {
        for part in &parts[..parts.len() - 1] {
            match part.trim().to_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                "alt" => modifiers |= KeyModifiers::ALT,
                _ => {}
            }
        }
    }

    let code = match key_part.to_lowercase().as_str() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "space" => KeyCode::Char(' '),
        _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
        _ => return None,
    };

    Some(KeyEvent {
        code,
        modifiers,
        kind: crossterm::event::KeyEventKind::Press,
        state: crossterm::event::KeyEventState::empty(),
    })
}

/// Create a `KeyEvent` from a key string, panicking on invalid input.
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key_string(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// Render harness over ratatui's `TestBackend`.
///
/// Draws frames into an off-screen buffer and returns their text content for
/// `contains`-style assertions.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    pub fn new(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("test terminal");
        Self { terminal }
    }

    /// Draw one frame and return the buffer as plain text, styling stripped.
    pub fn render_to_string_plain<F>(&mut self, render_fn: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render_fn).expect("test draw");
        buffer_to_string_plain(self.terminal.backend().buffer())
    }
}

/// Flatten a buffer to plain text, one line per terminal row.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let width = buffer.area.width as usize;
    let mut out = String::new();
    for y in 0..buffer.area.height as usize {
        for x in 0..width {
            out.push_str(buffer.content[y * width + x].symbol());
        }
        out.push('\n');
    }
    out
}
