//! Google generative-language provider (`generateContent` API).
//!
//! One request per user turn: the payload carries exactly one "user" role
//! content item, and only the first candidate of the reply is consumed.
//! Multi-turn context is deliberately not sent.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::transport::{ReplyProvider, TransportError};

// ============================================================================
// generateContent Wire Types
// ============================================================================

/// The request body for `generateContent`.
#[derive(Serialize, Debug)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Debug)]
struct Content {
    role: &'static str, // always "user": each request carries one turn
    parts: Vec<Part>,
}

#[derive(Serialize, Debug)]
struct Part {
    text: String,
}

/// The success body. Every field is defaulted/optional so a shape miss
/// degrades to "no candidate" instead of a deserialization error.
#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Debug)]
struct CandidatePart {
    text: Option<String>,
}

/// Pulls `candidates[0].content.parts[0].text` out of a parsed response.
/// Any gap along that path yields `None`.
fn first_candidate_text(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?
        .text
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Client for Google's `generateContent` endpoint.
pub struct GeminiProvider {
    api_key: String,
    endpoint: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Creates a new provider for the given model.
    ///
    /// # Arguments
    /// * `api_key` - Google API key, passed as the `key` query parameter
    /// * `model` - Model name, interpolated into the endpoint path
    /// * `base_url` - API base (e.g. `https://generativelanguage.googleapis.com/v1`)
    pub fn new(api_key: String, model: &str, base_url: &str) -> Self {
        Self {
            api_key,
            endpoint: format!(
                "{}/models/{}:generateContent",
                base_url.trim_end_matches('/'),
                model
            ),
            // No timeout beyond reqwest's platform default; the turn loop
            // never has more than one request in flight.
            client: reqwest::Client::new(),
        }
    }

    /// Sends a request to the endpoint and returns the raw response, mapping
    /// non-2xx statuses to `TransportError::Api`.
    async fn send_request(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<reqwest::Response, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        debug!("generateContent response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("generateContent API error: {} - {}", status, err_body);
            return Err(TransportError::Api {
                status,
                message: err_body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl ReplyProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_reply(&self, user_text: &str) -> Result<Option<String>, TransportError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: user_text.to_string(),
                }],
            }],
        };

        info!(
            "generateContent request: endpoint={}, prompt_len={}",
            self.endpoint,
            user_text.len()
        );

        let response = self.send_request(&request).await?;

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        // A 2xx body that doesn't parse, or parses without a usable
        // candidate, is the "no answer" signal — not a transport failure.
        let reply = match serde_json::from_str::<GenerateContentResponse>(&body) {
            Ok(parsed) => first_candidate_text(parsed),
            Err(e) => {
                warn!("Unparseable generateContent body: {e}");
                None
            }
        };

        match &reply {
            Some(text) => info!("generateContent reply: {} bytes", text.len()),
            None => warn!("generateContent response carried no usable candidate"),
        }

        Ok(reply)
    }
}
