//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::transport::{ReplyProvider, TransportError};

/// A no-op provider for tests that don't need real API calls.
pub struct NoopProvider;

#[async_trait]
impl ReplyProvider for NoopProvider {
    fn name(&self) -> &str {
        "noop"
    }

    async fn generate_reply(&self, _user_text: &str) -> Result<Option<String>, TransportError> {
        Ok(None)
    }
}

/// A provider that always answers with the same canned text.
pub struct CannedProvider(pub &'static str);

#[async_trait]
impl ReplyProvider for CannedProvider {
    fn name(&self) -> &str {
        "canned"
    }

    async fn generate_reply(&self, _user_text: &str) -> Result<Option<String>, TransportError> {
        Ok(Some(self.0.to_string()))
    }
}

/// Creates a test App with a NoopProvider.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(NoopProvider), "test-model".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canned_provider_answers_with_its_text() {
        let provider = CannedProvider("always this");
        let reply = tokio_test::block_on(provider.generate_reply("anything")).unwrap();
        assert_eq!(reply, Some("always this".to_string()));
    }
}
