//! # Actions
//!
//! Everything that can happen in Palaver becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! The endpoint answers? That's `Action::ReplyArrived(outcome)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` for the caller to execute. No side
//! effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: drive `update` with a scripted sequence
//! of actions and assert on the transcript.
//!
//! ## Turn state machine
//!
//! A turn moves `Idle → AwaitingReply → Idle`. While a reply is awaited,
//! `Submit` is rejected, so at most one request is ever in flight and
//! replies land in the transcript in submission order.

use log::{debug, error, warn};

use crate::core::state::App;
use crate::transport::TransportError;

/// Every event the reducer understands.
#[derive(Debug)]
pub enum Action {
    /// The user submitted text (typed or via a suggestion chip).
    Submit(String),
    /// The background request finished, one way or another.
    ReplyArrived(Result<Option<String>, TransportError>),
    /// The user asked to leave.
    Quit,
}

/// What the caller must do after `update` returns.
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Spawn a request to the endpoint carrying this prompt.
    SpawnRequest(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                debug!("Ignoring empty submission");
                return Effect::None;
            }
            if app.is_awaiting_reply() {
                debug!("Ignoring submission while a reply is pending");
                return Effect::None;
            }

            app.conversation.push_user(trimmed.to_string());
            app.conversation.begin_awaiting();
            app.status_message = String::from("Waiting for reply...");
            Effect::SpawnRequest(trimmed.to_string())
        }

        Action::ReplyArrived(outcome) => {
            // The awaiting marker always clears before the terminal message
            // of the turn is appended.
            if app.conversation.settle().is_none() {
                warn!("Reply arrived with no turn awaiting it; dropping");
                return Effect::None;
            }

            let text = match outcome {
                Ok(Some(reply)) => reply,
                Ok(None) => {
                    warn!("Endpoint returned no usable candidate");
                    app.reply_messages.no_reply.clone()
                }
                Err(e) => {
                    // Diagnostics go to the log only; the user sees the
                    // configured apology, never the endpoint's own words.
                    error!("Reply request failed: {e}");
                    app.reply_messages.transport_error.clone()
                }
            };
            app.conversation.push_bot(text);
            app.status_message = String::from("Ready");
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}
