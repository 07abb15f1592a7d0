//! # TUI Components
//!
//! ## Stateless (props-based)
//!
//! - `TitleBar`: race, phase, status and the analyze control
//! - `MessageView`: one log message
//! - `TypingIndicator`: the animated "ai is typing" bubble
//!
//! ## Stateful (event-driven)
//!
//! - `InputBox`: chat input, emits `InputEvent`s
//! - `MessageList`: scrollable log with cached layout and tail pinning
//!
//! Each file carries its own state types, event types, rendering and tests.

mod title_bar;
pub use title_bar::TitleBar;

pub mod input_box;
pub mod message;
pub use input_box::{InputBox, InputEvent};
pub mod message_list;
pub use message_list::{MessageList, MessageListState};
pub mod typing_indicator;
