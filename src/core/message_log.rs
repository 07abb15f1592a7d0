//! # Message Log
//!
//! The ordered conversation shown to the user. Permanent messages are
//! append-only. The typing indicator is the one transient entry: a singleton
//! that can be shown and hidden but is never part of the permanent history.
//!
//! ```text
//! entries: [User, Ai, User, System, Typing]
//!                                    ^^^^^^ at most one, always last when present
//! tail_revision: bumps on every append/show so the view re-pins to the tail
//! ```
//!
//! Bodies may carry Markdown. Newlines are rendered as line breaks by the
//! view; nothing here sanitizes or rewrites the body.

use log::debug;

/// Who a message is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Ai,
    System,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "you",
            Role::Ai => "ai",
            Role::System => "system",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub body: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogEntry {
    Message(Message),
    /// Transient "the other side is working" placeholder.
    Typing,
}

#[derive(Debug, Default)]
pub struct MessageLog {
    entries: Vec<LogEntry>,
    tail_revision: u64,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a permanent message at the tail.
    pub fn append(&mut self, body: impl Into<String>, role: Role) {
        let body = body.into();
        debug!("Log append: role={:?}, len={}", role, body.len());
        self.entries.push(LogEntry::Message(Message { body, role }));
        self.tail_revision += 1;
    }

    /// Shows the typing indicator at the tail. Idempotent.
    pub fn show_typing(&mut self) {
        if self.is_typing() {
            return;
        }
        self.entries.push(LogEntry::Typing);
        self.tail_revision += 1;
    }

    /// Removes the typing indicator if present.
    pub fn hide_typing(&mut self) {
        self.entries.retain(|e| !matches!(e, LogEntry::Typing));
    }

    pub fn is_typing(&self) -> bool {
        self.entries.iter().any(|e| matches!(e, LogEntry::Typing))
    }

    /// All entries including the typing indicator, in display order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Permanent messages only.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().filter_map(|e| match e {
            LogEntry::Message(m) => Some(m),
            LogEntry::Typing => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Changes whenever something was added at the tail.
    pub fn tail_revision(&self) -> u64 {
        self.tail_revision
    }
}
