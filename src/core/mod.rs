//! # Core Application Logic
//!
//! The conversation state machine and the result-rendering contract.
//! It knows nothing about any specific UI technology or transport.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App (state)          │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • MessageLog           │
//!                    │  • format_analysis()    │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │  Service   │
//!     │  Adapter   │                          │  Client    │
//!     │ (ratatui)  │                          │ (reqwest)  │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all conversation state in one place
//! - [`action`]: The `Action` enum and the `update` reducer
//! - [`message_log`]: Ordered message log with the typing indicator
//! - [`format`]: Analysis result → Markdown message body
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod format;
pub mod message_log;
pub mod state;
