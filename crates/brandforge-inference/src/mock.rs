//! Mock generation backend for deterministic testing.
//!
//! Responses are scripted as a queue: each `generate` call pops the next
//! scripted response, falling back to a default once the queue drains.
//! Every call is logged so tests can assert on retry behavior (e.g. the
//! single policy retry after an avoid-word violation).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use brandforge_core::{Error, GenerationBackend, Result};

/// One logged generation call.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub system: String,
    pub prompt: String,
}

#[derive(Default)]
struct MockState {
    scripted: VecDeque<Result<String>>,
    calls: Vec<MockCall>,
}

/// Scripted mock implementation of [`GenerationBackend`].
#[derive(Clone, Default)]
pub struct MockGenerationBackend {
    state: Arc<Mutex<MockState>>,
    default_response: Arc<Mutex<String>>,
}

impl MockGenerationBackend {
    /// Create a new mock with an empty script and empty default response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the response returned once the script drains.
    pub fn with_default_response(self, response: impl Into<String>) -> Self {
        *self.default_response.lock().unwrap() = response.into();
        self
    }

    /// Queue the next scripted response.
    pub fn push_response(&self, response: impl Into<String>) {
        self.state
            .lock()
            .unwrap()
            .scripted
            .push_back(Ok(response.into()));
    }

    /// Queue a scripted failure.
    pub fn push_failure(&self, message: impl Into<String>) {
        self.state
            .lock()
            .unwrap()
            .scripted
            .push_back(Err(Error::Generation(message.into())));
    }

    /// All calls made so far.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of generation calls made.
    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }
}

#[async_trait]
impl GenerationBackend for MockGenerationBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_with_system("", prompt).await
    }

    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(MockCall {
            system: system.to_string(),
            prompt: prompt.to_string(),
        });

        match state.scripted.pop_front() {
            Some(response) => response,
            None => Ok(self.default_response.lock().unwrap().clone()),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_responses_in_order() {
        let backend = MockGenerationBackend::new().with_default_response("default");
        backend.push_response("first");
        backend.push_response("second");

        assert_eq!(backend.generate("p").await.unwrap(), "first");
        assert_eq!(backend.generate("p").await.unwrap(), "second");
        assert_eq!(backend.generate("p").await.unwrap(), "default");
        assert_eq!(backend.call_count(), 3);
    }

    #[tokio::test]
    async fn test_scripted_failure() {
        let backend = MockGenerationBackend::new();
        backend.push_failure("boom");
        assert!(backend.generate("p").await.is_err());
    }

    #[tokio::test]
    async fn test_call_log_captures_system_prompt() {
        let backend = MockGenerationBackend::new().with_default_response("{}");
        backend.generate_with_system("sys", "user").await.unwrap();
        let calls = backend.calls();
        assert_eq!(calls[0].system, "sys");
        assert_eq!(calls[0].prompt, "user");
    }
}
