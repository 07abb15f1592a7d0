//! # TitleBar Component
//!
//! Single-line status bar at the top of the screen.
//!
//! Shows, left to right: the race being analyzed, the conversation phase,
//! the status message, the service health, the analyze control and (when
//! scrolled up) a "↓ New" marker. The analyze control is dimmed while it is
//! disabled.
//!
//! Purely presentational: every field is a prop filled from `App` and
//! `TuiState` each frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::state::Phase;
use crate::tui::component::Component;

pub struct TitleBar {
    pub race_name: String,
    pub phase: Phase,
    pub status_message: String,
    /// Health check result; `None` until the service answers.
    pub service_status: Option<String>,
    pub analyze_enabled: bool,
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(
        race_name: String,
        phase: Phase,
        status_message: String,
        service_status: Option<String>,
        analyze_enabled: bool,
        has_unseen_content: bool,
    ) -> Self {
        Self {
            race_name,
            phase,
            status_message,
            service_status,
            analyze_enabled,
            has_unseen_content,
        }
    }

    fn phase_label(&self) -> &'static str {
        match self.phase {
            Phase::Idle => "idle",
            Phase::Analyzing => "analyzing",
            Phase::Chatting => "chat",
            Phase::ChatPending => "waiting for reply",
        }
    }

    fn line(&self) -> Line<'static> {
        let sep = || Span::styled(" | ", Style::default().fg(Color::DarkGray));
        let analyze_style = if self.analyze_enabled {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        };

        let mut spans = vec![
            Span::styled(
                format!("🏇 {}", self.race_name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            sep(),
            Span::raw(self.phase_label()),
        ];
        if !self.status_message.is_empty() {
            spans.push(sep());
            spans.push(Span::raw(self.status_message.clone()));
        }
        if let Some(service) = &self.service_status {
            spans.push(sep());
            spans.push(Span::styled(
                service.clone(),
                Style::default().fg(Color::DarkGray),
            ));
        }
        spans.push(sep());
        spans.push(Span::styled("[Ctrl+A] Analyze", analyze_style));
        if self.has_unseen_content {
            spans.push(sep());
            spans.push(Span::styled("↓ New", Style::default().fg(Color::Yellow)));
        }
        Line::from(spans)
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.line(), area);
    }
}
