use std::fmt;

use async_trait::async_trait;

/// Errors that can occur while fetching a reply.
///
/// A 2xx response whose body lacks a usable candidate is NOT an error — it
/// resolves to `Ok(None)`, the deliberate "no answer" signal. These variants
/// cover genuine transport failures only.
#[derive(Debug)]
pub enum TransportError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The endpoint answered with a non-2xx status. The body, if any, is
    /// carried for diagnostics; callers must not assume it was parsed.
    Api { status: u16, message: String },
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Network(msg) => write!(f, "network error: {msg}"),
            TransportError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
        }
    }
}

impl std::error::Error for TransportError {}

#[async_trait]
pub trait ReplyProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Requests a reply for a single user turn.
    ///
    /// `user_text` must be non-empty after trimming (the caller enforces
    /// this). Resolves to `Ok(Some(text))` for a well-formed reply,
    /// `Ok(None)` when the endpoint answered 2xx without a usable candidate,
    /// and `Err` for transport failures. No retries, no application-level
    /// timeout.
    async fn generate_reply(&self, user_text: &str) -> Result<Option<String>, TransportError>;
}
