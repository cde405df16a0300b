//! Nodus LLM Provider Layer
//!
//! The boundary between the extraction engine and a structured-output LLM
//! service.
//!
//! # Providers
//!
//! - `GeminiProvider`: Google Gemini `generateContent` REST API
//! - `MockProvider`: Deterministic mock for testing
//!
//! # Examples
//!
//! ```
//! use nodus_llm::{GenerationRequest, LlmProvider, MockProvider};
//!
//! # tokio_test_block_on(async {
//! let provider = MockProvider::new(r#"{"summary": "Overview: hi"}"#);
//! let request = GenerationRequest::json("system", "content");
//! let response = provider.generate(&request).await.unwrap();
//! assert_eq!(response.payload_text(), Some(r#"{"summary": "Overview: hi"}"#));
//! assert_eq!(provider.call_count(), 1);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

#![warn(missing_docs)]

pub mod gemini;
pub mod types;

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub use gemini::{GeminiProvider, AVAILABLE_MODELS, DEFAULT_ENDPOINT, DEFAULT_MODEL};
pub use types::{
    Candidate, FinishReason, GenerationRequest, GenerationResponse, HarmBlockThreshold,
    HarmCategory, SafetySetting, JSON_MIME_TYPE,
};

/// Errors that can occur during LLM operations
///
/// Display strings keep the HTTP status code and the transport wording so
/// callers can classify failures from text alone.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// Non-success HTTP status from the API
    #[error("HTTP {status}: {message}")]
    Http {
        /// Status code
        status: u16,
        /// Error message or raw body returned by the API
        message: String,
    },

    /// The request exceeded the transport timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Network or connection failure
    #[error("Connection error: {0}")]
    Connection(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The provider was closed
    #[error("Provider has been closed")]
    Closed,

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// A structured-output LLM service.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Model identifier used for requests
    fn model(&self) -> &str;

    /// Run one generation call
    async fn generate(&self, request: &GenerationRequest)
        -> Result<GenerationResponse, LlmError>;

    /// Release the underlying client. Best effort; never fails.
    fn close(&self) {}
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock LLM provider for deterministic testing
///
/// Replies are served from a FIFO queue first, then from the default
/// response. Clones share the queue, call count and recorded requests.
///
/// # Examples
///
/// ```
/// use nodus_llm::{LlmError, MockProvider};
///
/// let provider = MockProvider::new("{}");
/// provider.push_text(r#"{"nodes": []}"#);
/// provider.push_error(LlmError::Http { status: 429, message: "quota".into() });
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    model: String,
    default_response: GenerationResponse,
    queue: Arc<Mutex<VecDeque<Result<GenerationResponse, LlmError>>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
    call_count: Arc<Mutex<usize>>,
    closed: Arc<Mutex<bool>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed text response for all requests
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_response(GenerationResponse::from_text(response))
    }

    /// Create a new MockProvider with a fixed response for all requests
    pub fn with_response(response: GenerationResponse) -> Self {
        Self {
            model: "mock".to_string(),
            default_response: response,
            queue: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            closed: Arc::new(Mutex::new(false)),
        }
    }

    /// Queue a response for the next unanswered call
    pub fn push_response(&self, response: GenerationResponse) {
        lock(&self.queue).push_back(Ok(response));
    }

    /// Queue a text response that stopped normally
    pub fn push_text(&self, text: impl Into<String>) {
        self.push_response(GenerationResponse::from_text(text));
    }

    /// Queue an error for the next unanswered call
    pub fn push_error(&self, error: LlmError) {
        lock(&self.queue).push_back(Err(error));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }

    /// Requests received so far, in call order
    pub fn requests(&self) -> Vec<GenerationRequest> {
        lock(&self.requests).clone()
    }

    /// Whether `close` has been called
    pub fn is_closed(&self) -> bool {
        *lock(&self.closed)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("{}")
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, LlmError> {
        if self.is_closed() {
            return Err(LlmError::Closed);
        }

        *lock(&self.call_count) += 1;
        lock(&self.requests).push(request.clone());

        match lock(&self.queue).pop_front() {
            Some(reply) => reply,
            None => Ok(self.default_response.clone()),
        }
    }

    fn close(&self) {
        *lock(&self.closed) = true;
    }
}
