use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Widget};

use crate::core::message_log::Role;
use crate::tui::components::message::role_color;

/// Rows the indicator occupies (one content row plus borders).
pub const HEIGHT: u16 = 3;

const DOTS: usize = 3;

/// Animated "ai is typing" bubble. `frame` advances the highlighted dot.
pub struct TypingIndicator {
    pub frame: usize,
}

impl Widget for TypingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = role_color(Role::Ai);
        let lit = self.frame % DOTS;
        let dots: Vec<Span> = (0..DOTS)
            .map(|i| {
                let style = if i == lit {
                    Style::default().fg(color).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                Span::styled("● ", style)
            })
            .collect();

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color).add_modifier(Modifier::DIM));
        let width = (DOTS as u16 * 2 + 3).min(area.width);
        let bubble = Rect::new(area.x, area.y, width, area.height.min(HEIGHT));
        Paragraph::new(Line::from(dots))
            .block(block)
            .render(bubble, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlighted_dot_cycles() {
        let area = Rect::new(0, 0, 20, HEIGHT);
        let mut first = Buffer::empty(area);
        let mut second = Buffer::empty(area);
        TypingIndicator { frame: 0 }.render(area, &mut first);
        TypingIndicator { frame: 1 }.render(area, &mut second);
        assert_ne!(first, second);

        let mut wrapped = Buffer::empty(area);
        TypingIndicator { frame: DOTS }.render(area, &mut wrapped);
        assert_eq!(first, wrapped);
    }
}
