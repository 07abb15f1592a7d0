//! # Application State
//!
//! Core conversation state. Domain logic only, no TUI types. Presentation
//! state (scroll, cursor, focus) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── race: RaceTarget              // what the analyze control analyzes
//! ├── session_id: Option<String>    // set by a successful analyze
//! ├── analyze_enabled: bool         // the analyze control
//! ├── analyze_in_flight: bool       // an analyze request is outstanding
//! ├── input_enabled: bool           // chat input accepts edits/submits
//! ├── draft: String                 // current input text
//! ├── log: MessageLog               // what the user sees
//! ├── status_message: String        // status line text (flow progress)
//! └── service_status: Option<String> // last health check, shown apart
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::config::ResolvedConfig;
use crate::core::message_log::MessageLog;

/// The race the analyze control is bound to.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceTarget {
    pub event_id: String,
    pub target_date: String,
    pub name: String,
}

/// Where the conversation is, derived from the flags on [`App`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Analyzing,
    Chatting,
    ChatPending,
}

#[derive(Debug)]
pub struct App {
    pub race: RaceTarget,
    pub session_id: Option<String>,
    pub analyze_enabled: bool,
    pub analyze_in_flight: bool,
    pub input_enabled: bool,
    /// True while a chat request is outstanding.
    pub chat_in_flight: bool,
    pub draft: String,
    pub log: MessageLog,
    pub status_message: String,
    /// Result of the startup health check. Kept apart from
    /// `status_message`; a late answer never overwrites flow progress.
    pub service_status: Option<String>,
}

impl App {
    pub fn new(race: RaceTarget) -> Self {
        Self {
            race,
            session_id: None,
            analyze_enabled: true,
            analyze_in_flight: false,
            input_enabled: false,
            chat_in_flight: false,
            draft: String::new(),
            log: MessageLog::new(),
            status_message: String::from("Press Ctrl+A to analyze"),
            service_status: None,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(RaceTarget {
            event_id: config.race_event_id.clone(),
            target_date: config.target_date.clone(),
            name: config.race_name.clone(),
        })
    }

    /// Send control rule: enabled iff input is enabled and the draft has
    /// non-whitespace content.
    pub fn send_enabled(&self) -> bool {
        send_enabled(self.input_enabled, &self.draft)
    }

    pub fn phase(&self) -> Phase {
        if self.analyze_in_flight {
            Phase::Analyzing
        } else if self.chat_in_flight {
            Phase::ChatPending
        } else if self.session_id.is_some() {
            Phase::Chatting
        } else {
            Phase::Idle
        }
    }
}

pub fn send_enabled(input_enabled: bool, text: &str) -> bool {
    input_enabled && !text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.phase(), Phase::Idle);
        assert!(app.analyze_enabled);
        assert!(!app.input_enabled);
        assert!(app.session_id.is_none());
        assert!(app.log.is_empty());
        assert!(app.service_status.is_none());
    }

    #[test]
    fn send_enabled_truth_table() {
        let texts = ["", " ", "\n\t", "hi", "  hi  "];
        for enabled in [false, true] {
            for text in texts {
                let expected = enabled && !text.trim().is_empty();
                assert_eq!(send_enabled(enabled, text), expected, "({enabled}, {text:?})");
            }
        }
    }

    #[test]
    fn from_config_copies_race_target() {
        let config = ResolvedConfig::default();
        let app = App::from_config(&config);
        assert_eq!(app.race.event_id, config.race_event_id);
        assert_eq!(app.race.target_date, config.target_date);
        assert_eq!(app.race.name, config.race_name);
    }
}
