//! Deterministic transport for tests. Replies are chosen by the first rule
//! whose needle appears in the system or user message.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{CompletionRequest, CompletionTransport, LlmError};

enum Reply {
    Text(String),
    Status(u16),
}

pub struct StubTransport {
    rules: Vec<(String, Reply)>,
    calls: Mutex<Vec<CompletionRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn respond_when(mut self, needle: &str, reply: impl Into<String>) -> Self {
        self.rules.push((needle.to_string(), Reply::Text(reply.into())));
        self
    }

    pub fn fail_when(mut self, needle: &str, status: u16) -> Self {
        self.rules.push((needle.to_string(), Reply::Status(status)));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionTransport for StubTransport {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(request.clone());

        let reply = self.rules.iter().find(|(needle, _)| {
            request
                .messages
                .iter()
                .any(|m| m.content.contains(needle.as_str()))
        });

        match reply {
            Some((_, Reply::Text(text))) => Ok(text.clone()),
            Some((_, Reply::Status(status))) => Err(LlmError::Api {
                status: *status,
                message: "stubbed failure".to_string(),
            }),
            None => Err(LlmError::EmptyContent),
        }
    }
}
