//! # Actions
//!
//! Everything that can happen in Paddock becomes an `Action`.
//! User presses Ctrl+A? That's `Action::AnalyzeRequested`.
//! The service answers? That's `Action::AnalyzeCompleted(result)`.
//!
//! `update()` mutates the state and returns an `Effect` telling the event
//! loop what I/O to perform next. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Ordering guarantees for both request flows:
//! - the typing indicator is shown in the same `update` that returns the
//!   spawn effect, so it is on screen before the request goes out;
//! - it is hidden in the completion `update` before the result (or the
//!   error) is appended.

use log::{debug, info, warn};

use crate::core::format::format_analysis;
use crate::core::message_log::Role;
use crate::core::state::App;
use crate::service::{
    AnalyzeRequest, AnalyzeResponse, ChatRequest, ServiceError, ServiceRequest, ServiceStatus,
};

pub const ANALYZE_TRANSPORT_ERROR: &str =
    "⚠️ Could not connect to the server. Check that the analysis API is running.";
pub const CHAT_REQUEST_ERROR: &str = "⚠️ The message could not be sent.";
pub const CHAT_TRANSPORT_ERROR: &str = "⚠️ Could not reach the server while sending the message.";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The analyze control was activated.
    AnalyzeRequested,
    AnalyzeCompleted(Result<AnalyzeResponse, ServiceError>),
    /// The input text changed (every keystroke).
    DraftChanged(String),
    /// The user submitted the input text.
    ChatSubmitted(String),
    /// Reply text, or the failure.
    ChatCompleted(Result<String, ServiceError>),
    HealthChecked(Result<ServiceStatus, ServiceError>),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Issue a request; its completion comes back as an action.
    Spawn(ServiceRequest),
    /// Chat finished (either way): re-enable and focus the input.
    FocusInput,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::AnalyzeRequested => start_analyze(app),
        Action::AnalyzeCompleted(result) => finish_analyze(app, result),
        Action::DraftChanged(text) => {
            // A disabled input does not accept edits.
            if app.input_enabled {
                app.draft = text;
            }
            Effect::None
        }
        Action::ChatSubmitted(text) => submit_chat(app, text),
        Action::ChatCompleted(result) => finish_chat(app, result),
        Action::HealthChecked(result) => {
            app.service_status = Some(match result {
                Ok(status) => match status.app {
                    Some(name) => format!("Service {}: {}", status.status, name),
                    None => format!("Service {}", status.status),
                },
                Err(e) => {
                    warn!("Health check failed: {}", e);
                    String::from("Service unreachable")
                }
            });
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn start_analyze(app: &mut App) -> Effect {
    if !app.analyze_enabled || app.analyze_in_flight {
        debug!("Analyze ignored: control disabled");
        return Effect::None;
    }

    info!("Starting analysis for {}", app.race.event_id);
    app.analyze_enabled = false;
    app.analyze_in_flight = true;
    app.status_message = format!("Analyzing {}...", app.race.name);
    app.log.append(
        format!(
            "Starting the {} analysis. Pulling historical race data and running the inference engine...",
            app.race.name
        ),
        Role::User,
    );
    app.log.show_typing();

    Effect::Spawn(ServiceRequest::Analyze(AnalyzeRequest {
        race_event_id: app.race.event_id.clone(),
        target_date: app.race.target_date.clone(),
    }))
}

fn finish_analyze(app: &mut App, result: Result<AnalyzeResponse, ServiceError>) -> Effect {
    app.analyze_in_flight = false;
    app.log.hide_typing();

    match result {
        Ok(response) => {
            info!(
                "Analysis complete: session_id={}, entries={}",
                response.session_id,
                response.result.ranked_entries.len()
            );
            app.session_id = Some(response.session_id);
            app.log.append(format_analysis(&response.result), Role::Ai);
            app.input_enabled = true;
            app.status_message = String::from("Ask a follow-up question");
        }
        Err(e) => {
            warn!("Analysis failed: {}", e);
            let text = match &e {
                ServiceError::RequestFailed { detail, .. } => {
                    format!("⚠️ An error occurred: {detail}")
                }
                ServiceError::TransportFailed(_) => ANALYZE_TRANSPORT_ERROR.to_string(),
            };
            app.log.append(text, Role::System);
            app.analyze_enabled = true;
            app.status_message = String::from("Analysis failed. Press Ctrl+A to retry");
        }
    }
    Effect::None
}

fn submit_chat(app: &mut App, text: String) -> Effect {
    let message = text.trim();
    let Some(session_id) = app.session_id.clone() else {
        debug!("Chat submission ignored: no session");
        return Effect::None;
    };
    if message.is_empty() || !app.input_enabled {
        debug!("Chat submission ignored: empty message or input disabled");
        return Effect::None;
    }

    let message = message.to_string();
    app.log.append(message.clone(), Role::User);
    app.draft.clear();
    app.input_enabled = false;
    app.chat_in_flight = true;
    app.log.show_typing();

    Effect::Spawn(ServiceRequest::Chat(ChatRequest {
        session_id,
        message,
    }))
}

fn finish_chat(app: &mut App, result: Result<String, ServiceError>) -> Effect {
    app.chat_in_flight = false;
    app.log.hide_typing();

    match result {
        Ok(reply) => app.log.append(reply, Role::Ai),
        Err(e) => {
            warn!("Chat failed: {}", e);
            let text = match e {
                ServiceError::RequestFailed { .. } => CHAT_REQUEST_ERROR,
                ServiceError::TransportFailed(_) => CHAT_TRANSPORT_ERROR,
            };
            app.log.append(text, Role::System);
        }
    }

    app.input_enabled = true;
    Effect::FocusInput
}
