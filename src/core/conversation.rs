//! The transcript: an ordered, append-only sequence of messages plus the
//! marker for a reply that is still in flight.
//!
//! `Conversation` is an explicit context object handed to the reducer — no
//! globals — so independent conversations (and deterministic tests) are
//! possible. Messages are never edited or removed once appended; the whole
//! transcript dies with the process.

use chrono::{DateTime, Local};
use std::time::Instant;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// One entry in the transcript. Immutable once appended; insertion order is
/// display order.
#[derive(Debug, Clone)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    /// Presentational timestamp (rendered as HH:MM). Ordering is positional,
    /// not temporal.
    pub at: DateTime<Local>,
}

/// Marker for the single reply currently awaited from the endpoint.
///
/// Held in an `Option` on [`Conversation`], which makes "at most one pending
/// indicator" a structural invariant rather than a runtime check.
#[derive(Debug, Clone)]
pub struct PendingReply {
    /// When the turn started, for the elapsed-time readout in the indicator.
    pub since: Instant,
}

impl PendingReply {
    pub fn new() -> Self {
        Self {
            since: Instant::now(),
        }
    }
}

impl Default for PendingReply {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered transcript plus the awaiting-reply marker.
#[derive(Debug, Clone)]
pub struct Conversation {
    pub messages: Vec<Message>,
    pub pending: Option<PendingReply>,
}

impl Conversation {
    /// Creates a new conversation seeded with the welcome message, so the
    /// transcript is never empty when input is first accepted.
    pub fn new(welcome: &str) -> Self {
        Self {
            messages: vec![Message {
                sender: Sender::Bot,
                text: welcome.to_string(),
                at: Local::now(),
            }],
            pending: None,
        }
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.pending.is_some()
    }

    /// Appends a user message and returns a reference to it.
    pub fn push_user(&mut self, text: String) -> &Message {
        self.push(Sender::User, text)
    }

    /// Appends a bot message and returns a reference to it.
    pub fn push_bot(&mut self, text: String) -> &Message {
        self.push(Sender::Bot, text)
    }

    fn push(&mut self, sender: Sender, text: String) -> &Message {
        self.messages.push(Message {
            sender,
            text,
            at: Local::now(),
        });
        self.messages.last().expect("just pushed")
    }

    /// Marks the start of a turn's wait for a reply.
    pub fn begin_awaiting(&mut self) {
        self.pending = Some(PendingReply::new());
    }

    /// Clears the awaiting marker, returning it if one was set. Must be
    /// called before the turn's terminal bot message is appended.
    pub fn settle(&mut self) -> Option<PendingReply> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_conversation_seeds_welcome_message() {
        let convo = Conversation::new("Hello there!");
        assert_eq!(convo.messages.len(), 1);
        assert_eq!(convo.messages[0].sender, Sender::Bot);
        assert_eq!(convo.messages[0].text, "Hello there!");
        assert!(!convo.is_awaiting_reply());
    }

    #[test]
    fn push_preserves_insertion_order() {
        let mut convo = Conversation::new("welcome");
        convo.push_user("first".to_string());
        convo.push_bot("second".to_string());
        convo.push_user("third".to_string());

        let texts: Vec<&str> = convo.messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["welcome", "first", "second", "third"]);
    }

    #[test]
    fn push_returns_the_appended_message() {
        let mut convo = Conversation::new("welcome");
        let msg = convo.push_user("hi".to_string());
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.text, "hi");
    }

    #[test]
    fn awaiting_marker_set_and_cleared() {
        let mut convo = Conversation::new("welcome");
        assert!(!convo.is_awaiting_reply());

        convo.begin_awaiting();
        assert!(convo.is_awaiting_reply());

        let marker = convo.settle();
        assert!(marker.is_some());
        assert!(!convo.is_awaiting_reply());

        // Settling an idle conversation is harmless
        assert!(convo.settle().is_none());
    }

    #[test]
    fn begin_awaiting_never_stacks_markers() {
        let mut convo = Conversation::new("welcome");
        convo.begin_awaiting();
        convo.begin_awaiting();
        // One settle leaves the conversation idle — Option can't hold two
        convo.settle();
        assert!(!convo.is_awaiting_reply());
    }
}
