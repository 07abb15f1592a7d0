//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Request Flow
//!
//! The event loop is synchronous. When `update` returns `Effect::Spawn`, the
//! request runs on a tokio task and its completion comes back through an mpsc
//! channel as an `Action`, drained once per loop iteration.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (typing indicator visible): draws every ~80ms.
//! - **Idle**: sleeps up to 500ms, only redraws on events, resizes or
//!   completed requests.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::service::{AnalysisService, ServiceRequest, perform};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
        }
    }

    /// Copy the App-owned props the components render from.
    fn sync_props(&mut self, app: &App) {
        self.input_box.disabled = !app.input_enabled;
        self.input_box.send_enabled = app.send_enabled();
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Shift+Enter through; terminals without
        // it ignore the request.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste
        );
    }
}

pub fn run(config: ResolvedConfig, service: Arc<dyn AnalysisService>) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();
    info!(
        "Starting session for {} ({} on {}) against {}",
        app.race.name,
        app.race.event_id,
        app.race.target_date,
        service.name()
    );

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Completed requests come back here as actions
    let (tx, rx) = mpsc::channel();
    spawn_request(service.clone(), ServiceRequest::Health, tx.clone());

    let start_time = Instant::now();
    let mut needs_redraw = true;

    'main: loop {
        tui.sync_props(&app);
        let animating = app.log.is_typing();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 4.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain everything pending before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let action = match event {
                TuiEvent::Resize => None,
                TuiEvent::ForceQuit => Some(Action::Quit),
                TuiEvent::Analyze => Some(Action::AnalyzeRequested),
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown
                | TuiEvent::ScrollToBottom => {
                    tui.message_list.handle_event(&event);
                    tui.input_box.focused = false;
                    None
                }
                _ => {
                    tui.input_box.focused = true;
                    match tui.input_box.handle_event(&event) {
                        Some(InputEvent::Changed(text)) => Some(Action::DraftChanged(text)),
                        Some(InputEvent::Submit(text)) => Some(Action::ChatSubmitted(text)),
                        None => None,
                    }
                }
            };

            if let Some(action) = action {
                let effect = update(&mut app, action);
                if !apply_effect(effect, &mut tui, &service, &tx) {
                    break 'main;
                }
                tui.sync_props(&app);
            }
        }

        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if !apply_effect(effect, &mut tui, &service, &tx) {
                break 'main;
            }
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

/// Carry out a reducer effect. Returns false when the loop should exit.
fn apply_effect(
    effect: Effect,
    tui: &mut TuiState,
    service: &Arc<dyn AnalysisService>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match effect {
        Effect::None => {}
        Effect::Quit => return false,
        Effect::FocusInput => tui.input_box.focused = true,
        Effect::Spawn(request) => {
            if matches!(request, ServiceRequest::Chat(_)) {
                // The message is in the log now; start the next one fresh.
                tui.input_box.clear();
            }
            spawn_request(service.clone(), request, tx.clone());
        }
    }
    true
}

fn spawn_request(
    service: Arc<dyn AnalysisService>,
    request: ServiceRequest,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning service request: {:?}", request);
    tokio::spawn(async move {
        let action = perform(service.as_ref(), request).await;
        if tx.send(action).is_err() {
            warn!("Failed to deliver service result: receiver dropped");
        }
    });
}
