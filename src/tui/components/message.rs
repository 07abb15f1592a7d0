use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::message_log::{Message, Role};
use crate::tui::component::Component;
use crate::tui::markdown;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
pub(super) const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders a single chat message with
/// role-based styling. Created fresh each frame.
///
/// - **User** (green): the person at the keyboard
/// - **Ai** (blue): analysis results and chat replies, Markdown-rendered
/// - **System** (yellow): errors and notices
#[derive(Clone, Copy)]
pub struct MessageView<'a> {
    pub message: &'a Message,
}

impl<'a> MessageView<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    fn paragraph(message: &Message) -> Paragraph<'static> {
        let body = markdown::render(message.body.trim(), role_color(message.role));
        Paragraph::new(body).wrap(Wrap { trim: false })
    }

    /// Height this message needs at the given outer width, borders included.
    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Too narrow for borders + padding; still occupy a row.
            return 1;
        }
        if message.body.trim().is_empty() {
            return VERTICAL_OVERHEAD;
        }
        let lines = Self::paragraph(message).line_count(content_width);
        (lines as u16).max(1) + VERTICAL_OVERHEAD
    }
}

pub fn role_color(role: Role) -> Color {
    match role {
        Role::User => Color::Green,
        Role::Ai => Color::Blue,
        Role::System => Color::Yellow,
    }
}

impl<'a> Widget for MessageView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = Style::default()
            .fg(role_color(self.message.role))
            .add_modifier(Modifier::DIM);

        let block = Block::bordered()
            .title(self.message.role.label())
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);
        Self::paragraph(self.message).render(inner_area, buf);
    }
}

impl<'a> Component for MessageView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
