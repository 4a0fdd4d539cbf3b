//! Generation gateway: turns raw model text into a typed, validated value.
//!
//! Content problems never surface as errors: a reply that cannot be parsed,
//! repaired, or validated comes back as `Generated::Degraded` carrying a
//! diagnostic excerpt. Only transport failures are `Err`.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::llm_client::extract::{extract_json_payload, repair_candidates};
use crate::llm_client::{CompletionRequest, CompletionTransport, LlmError};

const CONTENT_EXCERPT_CHARS: usize = 500;
const PREVIEW_CHARS: usize = 200;

/// Outcome of a generation call that reached the provider.
#[derive(Debug, Clone, PartialEq)]
pub enum Generated<T> {
    Valid(T),
    Degraded(Degraded),
}

impl<T> Generated<T> {
    pub fn valid(self) -> Option<T> {
        match self {
            Generated::Valid(value) => Some(value),
            Generated::Degraded(_) => None,
        }
    }
}

/// Diagnostic payload for a reply that did not match the expected schema.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Degraded {
    pub content: String,
    pub error: String,
    pub extracted_length: usize,
    pub extracted_preview: String,
}

#[derive(Clone)]
pub struct GenerationGateway {
    transport: Arc<dyn CompletionTransport>,
}

impl GenerationGateway {
    pub fn new(transport: Arc<dyn CompletionTransport>) -> Self {
        Self { transport }
    }

    /// Calls the provider once and interprets the reply as `T`.
    pub async fn call<T: DeserializeOwned>(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<Generated<T>, LlmError> {
        let request = CompletionRequest::new(system, prompt);
        let content = self.transport.complete(&request).await?;
        let generated = interpret::<T>(&content);
        if let Generated::Degraded(degraded) = &generated {
            warn!(
                "Generation reply degraded ({} chars extracted): {}",
                degraded.extracted_length, degraded.error
            );
        }
        Ok(generated)
    }
}

/// Extracts, parses (repairing if needed), and validates a model reply.
pub fn interpret<T: DeserializeOwned>(content: &str) -> Generated<T> {
    let content = content.trim();
    let candidate = extract_json_payload(content);

    match serde_json::from_str::<Value>(candidate) {
        Ok(value) => match serde_json::from_value::<T>(value) {
            Ok(parsed) => Generated::Valid(parsed),
            Err(e) => degrade(content, candidate, format!("Validation error: {e}")),
        },
        Err(parse_error) => match repair::<T>(candidate) {
            Some(parsed) => Generated::Valid(parsed),
            None => degrade(content, candidate, format!("JSON decode error: {parse_error}")),
        },
    }
}

fn repair<T: DeserializeOwned>(candidate: &str) -> Option<T> {
    repair_candidates(candidate).into_iter().find_map(|fixed| {
        let value = serde_json::from_str::<Value>(&fixed).ok()?;
        let parsed = serde_json::from_value::<T>(value).ok()?;
        debug!("Repaired truncated reply to {} chars", fixed.len());
        Some(parsed)
    })
}

fn degrade<T>(content: &str, candidate: &str, error: String) -> Generated<T> {
    Generated::Degraded(Degraded {
        content: content.chars().take(CONTENT_EXCERPT_CHARS).collect(),
        error,
        extracted_length: candidate.len(),
        extracted_preview: candidate.chars().take(PREVIEW_CHARS).collect(),
    })
}
