//! # InputBox Component
//!
//! The chat input field.
//!
//! ## Responsibilities
//!
//! - Capture and edit text (chars, paste, backspace, delete, cursor moves)
//! - Emit `Changed` on every edit and `Submit` on Enter
//! - Refuse all edits while `disabled` (no session yet, or a reply pending)
//! - Show whether sending is currently possible
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. `disabled`, `focused` and
//! `send_enabled` are props synced from the App each frame. Submitting does
//! not clear the buffer; the event loop clears it once the core has accepted
//! the message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Border (2) + padding (2) consumed horizontally.
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders.
const VERTICAL_OVERHEAD: u16 = 2;
/// Content lines shown before the box scrolls internally.
const MAX_VISIBLE_LINES: u16 = 5;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Buffer content changed; carries the full text.
    Changed(String),
    /// Enter pressed; carries the full text.
    Submit(String),
}

pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Cursor as a byte offset into `buffer`
    cursor: usize,
    /// Input refuses edits (Prop)
    pub disabled: bool,
    /// Cursor is shown and keys go here (Prop)
    pub focused: bool,
    /// Enter would send right now (Prop)
    pub send_enabled: bool,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            disabled: true,
            focused: true,
            send_enabled: false,
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Height for the current content, clamped to the visible line limit.
    pub fn calculate_height(&self) -> u16 {
        let lines = self.buffer.split('\n').count() as u16;
        lines.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// (row, column) of the cursor within the unscrolled text.
    fn cursor_cell(&self) -> (u16, u16) {
        let before = &self.buffer[..self.cursor];
        let row = before.matches('\n').count() as u16;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let col = before[line_start..].width() as u16;
        (row, col)
    }

    fn title(&self) -> &'static str {
        if self.disabled {
            "Input (waiting)"
        } else if self.send_enabled {
            "Message (Enter to send)"
        } else {
            "Message"
        }
    }

    fn edited(&self) -> Option<InputEvent> {
        Some(InputEvent::Changed(self.buffer.clone()))
    }
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        let visible_lines = area.height.saturating_sub(VERTICAL_OVERHEAD).max(1);
        let (row, col) = self.cursor_cell();
        let v_scroll = (row + 1).saturating_sub(visible_lines);
        let h_scroll = (col + 1).saturating_sub(inner_width);

        let color = if self.disabled {
            Color::DarkGray
        } else {
            Color::Green
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .padding(Padding::horizontal(1))
            .title(self.title());

        let input = Paragraph::new(self.buffer.as_str())
            .block(block)
            .style(Style::default().fg(color))
            .scroll((v_scroll, h_scroll));
        frame.render_widget(input, area);

        if self.focused && !self.disabled {
            let x = area.x + 2 + col - h_scroll;
            let y = area.y + 1 + row - v_scroll;
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.disabled {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                self.edited()
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor, text);
                self.cursor += text.len();
                self.edited()
            }
            TuiEvent::Backspace if self.cursor > 0 => {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.replace_range(prev..self.cursor, "");
                self.cursor = prev;
                self.edited()
            }
            TuiEvent::Delete if self.cursor < self.buffer.len() => {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.replace_range(self.cursor..next, "");
                self.edited()
            }
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                None
            }
            TuiEvent::Submit => Some(InputEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}
