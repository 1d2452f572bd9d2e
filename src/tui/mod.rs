//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm. The core
//! never touches a terminal, and the request task never touches state: the
//! provider call runs on a spawned tokio task whose outcome comes back over
//! an mpsc channel as `Action::ReplyArrived`, applied by the event loop.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (reply pending): draws every ~80ms so the typing
//!   indicator keeps moving.
//! - **Idle**: sleeps up to 500ms, only redraws on events.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on
//! every `draw()` call, making blinking cursors appear erratic during
//! continuous redraws.

pub mod component;
pub mod components;
pub mod event;
pub mod markup;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::transport::{GeminiProvider, ReplyProvider};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    InputBox, InputEvent, MessageListState, SuggestionBarState, SuggestionEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub suggestions: SuggestionBarState,
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
            suggestions: SuggestionBarState::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Build the provider from the resolved config's credentials.
pub fn build_provider(config: &ResolvedConfig) -> Arc<dyn ReplyProvider> {
    let api_key = config
        .gemini_api_key
        .clone()
        .expect("Gemini API key must be set (config file [gemini] api_key, or GEMINI_API_KEY env var)");
    Arc::new(GeminiProvider::new(
        api_key,
        &config.model_name,
        &config.gemini_base_url,
    ))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let provider = build_provider(&config);
    let mut app = App::from_config(provider, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    // Channel for actions from background request tasks
    let (tx, rx) = mpsc::channel();

    // Animation timer
    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        // The typing indicator animates while a reply is pending
        let animating = app.is_awaiting_reply();
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                // Resize just needs a redraw (already flagged above)
                TuiEvent::Resize => {}

                TuiEvent::Quit => {
                    if update(&mut app, Action::Quit) == Effect::Quit {
                        should_quit = true;
                    }
                }

                // Scroll events always go to the MessageList
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown
                | TuiEvent::ScrollToBottom => {
                    tui.message_list.handle_event(&event);
                }

                TuiEvent::CycleSuggestion => {
                    tui.suggestions.handle_event(&event);
                }

                // Submission is disabled while a reply is pending; the typed
                // text stays in the input box untouched.
                TuiEvent::Submit if app.is_awaiting_reply() => {
                    debug!("Submission ignored: reply pending");
                }

                TuiEvent::Submit => {
                    // A selected suggestion chip wins over the input buffer:
                    // activating it submits its label, exactly as if typed.
                    if let Some(SuggestionEvent::Activated(i)) =
                        tui.suggestions.handle_event(&event)
                    {
                        let label = app.suggestions.get(i).map(|s| s.label.clone());
                        if let Some(label) = label {
                            dispatch(&mut app, Action::Submit(label), &tx);
                        }
                    } else if let Some(InputEvent::Submit(text)) =
                        tui.input_box.handle_event(&event)
                    {
                        dispatch(&mut app, Action::Submit(text), &tx);
                    }
                }

                // Everything else is editing: it clears any chip selection
                // and flows into the input box.
                _ => {
                    tui.suggestions.handle_event(&event);
                    tui.input_box.handle_event(&event);
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (reply outcomes)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            match update(&mut app, action) {
                Effect::Quit => should_quit = true,
                Effect::SpawnRequest(prompt) => {
                    spawn_request(app.provider.clone(), prompt, tx.clone());
                }
                Effect::None => {}
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Apply a user-initiated action and execute its effect.
fn dispatch(app: &mut App, action: Action, tx: &mpsc::Sender<Action>) {
    if let Effect::SpawnRequest(prompt) = update(app, action) {
        spawn_request(app.provider.clone(), prompt, tx.clone());
    }
}

/// Spawn the provider call for one turn; its outcome comes back to the event
/// loop as `Action::ReplyArrived`. At most one of these is ever in flight —
/// the reducer rejects new submissions until the turn settles.
fn spawn_request(provider: Arc<dyn ReplyProvider>, prompt: String, tx: mpsc::Sender<Action>) {
    info!("Spawning reply request ({} bytes)", prompt.len());
    tokio::spawn(async move {
        let outcome = provider.generate_reply(&prompt).await;
        if tx.send(Action::ReplyArrived(outcome)).is_err() {
            warn!("Failed to send reply action: receiver dropped");
        }
    });
}
