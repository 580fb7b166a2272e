/*!
 * Mock provider implementations for testing.
 *
 * This module provides a mock summarizer that simulates different behaviors:
 * - `MockProvider::working()` - Always succeeds, keeping the first `max_words` words
 * - `MockProvider::failing_on(n)` - Fails only on the n-th call (1-based)
 * - `MockProvider::intermittent(n)` - Fails on every n-th call
 * - `MockProvider::failing()` - Always fails with an error
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::Provider;
use crate::summarization::neural::NeuralSummarizer;

/// Mock request for testing
#[derive(Debug, Clone, PartialEq)]
pub struct MockRequest {
    /// The text to summarize
    pub text: String,
    /// Upper word target
    pub max_words: usize,
    /// Lower word target
    pub min_words: usize,
}

/// Mock response for testing
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// The summary text
    pub text: String,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Fails on the given call number (1-based), succeeds otherwise
    FailOnCall { call: usize },
    /// Fails on every Nth call
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Returns an empty response
    Empty,
}

/// Mock provider for testing summarization behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter
    request_count: Arc<AtomicUsize>,
    /// Every request received, in order
    requests: Arc<Mutex<Vec<MockRequest>>>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&MockRequest) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock provider that fails only on call number `call` (1-based)
    pub fn failing_on(call: usize) -> Self {
        Self::new(MockBehavior::FailOnCall { call })
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&MockRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of requests received so far
    pub fn call_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Copy of every request received so far
    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests.lock().clone()
    }

    fn respond(&self, request: &MockRequest) -> String {
        match self.custom_response {
            Some(generator) => generator(request),
            None => request
                .text
                .split_whitespace()
                .take(request.max_words)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            requests: Arc::clone(&self.requests),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = MockRequest;
    type Response = MockResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let call = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.requests.lock().push(request.clone());

        let fail = match self.behavior {
            MockBehavior::Working | MockBehavior::Empty => false,
            MockBehavior::FailOnCall { call: failing } => call == failing,
            MockBehavior::Intermittent { fail_every } => fail_every > 0 && call % fail_every == 0,
            MockBehavior::Failing => true,
        };

        if fail {
            return Err(ProviderError::ApiError {
                status_code: 503,
                message: format!("Simulated failure (request #{})", call),
            });
        }

        let text = if self.behavior == MockBehavior::Empty {
            String::new()
        } else {
            self.respond(&request)
        };
        Ok(MockResponse { text })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError("Simulated outage".to_string())),
            _ => Ok(()),
        }
    }

    fn extract_text(response: &Self::Response) -> String {
        response.text.clone()
    }
}

#[async_trait]
impl NeuralSummarizer for MockProvider {
    async fn summarize(&self, text: &str, max_words: usize, min_words: usize) -> Result<String, ProviderError> {
        let request = MockRequest {
            text: text.to_string(),
            max_words,
            min_words,
        };
        let response = self.complete(request).await?;
        let summary = Self::extract_text(&response);
        if summary.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(summary)
    }

    fn name(&self) -> String {
        "mock".to_string()
    }
}
