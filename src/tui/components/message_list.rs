//! # MessageList Component
//!
//! Scrollable view of the message log.
//!
//! ## Responsibilities
//!
//! - Display every log entry in order (messages and the typing indicator)
//! - Follow the tail: any growth of the log re-pins the view to the bottom
//! - Manual scrolling (wheel, arrows, page keys) unpins until the user
//!   returns to the bottom
//! - Cache message heights between frames
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the log (props).

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message_log::{LogEntry, MessageLog};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageView;
use crate::tui::components::typing_indicator::{self, TypingIndicator};
use crate::tui::event::TuiEvent;

/// Scroll and layout state for the message list.
/// Persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on every frame
    pub stick_to_bottom: bool,
    /// Log tail revision the view last followed
    pub seen_revision: u64,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::default(),
            stick_to_bottom: true,
            seen_revision: 0,
            viewport_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.layout.total_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll if the user has scrolled back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Whether content exists below the visible window.
    pub fn has_unseen_content(&self) -> bool {
        !self.stick_to_bottom && self.scroll_state.offset().y < self.max_offset()
    }
}

/// Cached entry heights for one content width.
///
/// Permanent messages never change or move, except that removing the typing
/// indicator shifts whatever came after it. So the cache is trusted up to
/// the first cached typing entry and no further.
#[derive(Default)]
pub struct LayoutCache {
    pub heights: Vec<u16>,
    typing_at: Option<usize>,
    content_width: u16,
}

impl LayoutCache {
    /// Number of leading cached heights still valid for `entries`.
    pub fn reusable_count(&self, entries: &[LogEntry], content_width: u16) -> usize {
        if self.content_width != content_width {
            return 0;
        }
        let mut valid = self.heights.len().min(entries.len());
        if let Some(idx) = self.typing_at {
            valid = valid.min(idx);
        }
        valid
    }

    pub fn update(&mut self, entries: &[LogEntry], content_width: u16) {
        let reusable = self.reusable_count(entries, content_width);
        self.heights.truncate(reusable);
        for entry in entries.iter().skip(reusable) {
            self.heights.push(match entry {
                LogEntry::Message(m) => MessageView::calculate_height(m, content_width),
                LogEntry::Typing => typing_indicator::HEIGHT,
            });
        }
        self.typing_at = entries.iter().position(|e| matches!(e, LogEntry::Typing));
        self.content_width = content_width;
    }

    /// Sum of all heights, capped at the largest scrollable canvas.
    pub fn total_height(&self) -> u16 {
        self.heights
            .iter()
            .fold(0u16, |total, &h| total.saturating_add(h))
    }
}

pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub log: &'a MessageLog,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut MessageListState, log: &'a MessageLog, spinner_frame: usize) -> Self {
        Self {
            state,
            log,
            spinner_frame,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let entries = self.log.entries();

        self.state.layout.update(entries, content_width);
        self.state.viewport_height = area.height;

        // New content at the tail always brings the view back down.
        if self.log.tail_revision() != self.state.seen_revision {
            self.state.seen_revision = self.log.tail_revision();
            self.state.stick_to_bottom = true;
        }
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let total_height = self.state.layout.total_height();
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (entry, &height) in entries.iter().zip(&self.state.layout.heights) {
            let rect = Rect::new(0, y_offset, content_width, height);
            match entry {
                LogEntry::Message(m) => scroll_view.render_widget(MessageView::new(m), rect),
                LogEntry::Typing => scroll_view.render_widget(
                    TypingIndicator {
                        frame: self.spinner_frame,
                    },
                    rect,
                ),
            }
            y_offset = y_offset.saturating_add(height);
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
            }
            _ => {}
        }
        None
    }
}
