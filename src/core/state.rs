//! # Application State
//!
//! Core business state for Palaver. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── provider: Arc<dyn ReplyProvider>  // generative endpoint client
//! ├── conversation: Conversation        // transcript + awaiting marker
//! ├── status_message: String            // status bar text
//! ├── model_name: String                // current model
//! ├── reply_messages: ReplyMessages     // per-outcome apology strings
//! └── suggestions: Vec<Suggestion>      // suggestion chips
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::core::config::{self, ReplyMessages, ResolvedConfig, Suggestion};
use crate::core::conversation::Conversation;
use crate::transport::ReplyProvider;
use std::sync::Arc;

pub struct App {
    pub provider: Arc<dyn ReplyProvider>,
    pub conversation: Conversation,
    pub status_message: String,
    pub model_name: String,
    pub reply_messages: ReplyMessages,
    pub suggestions: Vec<Suggestion>,
}

impl App {
    pub fn new(provider: Arc<dyn ReplyProvider>, model_name: String) -> Self {
        Self {
            provider,
            conversation: Conversation::new(config::DEFAULT_WELCOME_MESSAGE),
            status_message: String::from("Ready"),
            model_name,
            reply_messages: ReplyMessages {
                no_reply: config::DEFAULT_NO_REPLY_MESSAGE.to_string(),
                transport_error: config::DEFAULT_TRANSPORT_ERROR_MESSAGE.to_string(),
            },
            suggestions: config::default_suggestions(),
        }
    }

    pub fn from_config(provider: Arc<dyn ReplyProvider>, config: &ResolvedConfig) -> Self {
        Self {
            provider,
            conversation: Conversation::new(&config.welcome_message),
            status_message: String::from("Ready"),
            model_name: config.model_name.clone(),
            reply_messages: config.reply_messages.clone(),
            suggestions: config.suggestions.clone(),
        }
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.conversation.is_awaiting_reply()
    }
}

#[cfg(test)]
mod tests {
    use crate::core::conversation::Sender;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Ready");
        assert_eq!(app.model_name, "test-model");
        assert!(!app.is_awaiting_reply());
        assert_eq!(app.suggestions.len(), 5);
    }

    #[test]
    fn test_app_starts_with_welcome_message() {
        let app = test_app();
        assert_eq!(app.conversation.messages.len(), 1);
        assert_eq!(app.conversation.messages[0].sender, Sender::Bot);
    }
}
