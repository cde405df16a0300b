//! Gemini Provider Implementation
//!
//! Calls the Gemini `generateContent` REST endpoint with JSON-mode output,
//! a response schema and safety thresholds.
//!
//! # Examples
//!
//! ```no_run
//! use nodus_llm::{GeminiProvider, DEFAULT_MODEL};
//! use std::time::Duration;
//!
//! let provider = GeminiProvider::new("api-key", DEFAULT_MODEL, Duration::from_secs(120)).unwrap();
//! ```

use crate::types::{Candidate, FinishReason, GenerationRequest, GenerationResponse, SafetySetting};
use crate::{LlmError, LlmProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::debug;

/// Default Gemini API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

/// Curated models offered to users; the first entry is the default
pub const AVAILABLE_MODELS: [&str; 3] = [DEFAULT_MODEL, "gemini-2.5-flash", "gemini-2.5-pro"];

/// Gemini API provider
pub struct GeminiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
    closed: AtomicBool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    system_instruction: GeminiContent<'a>,
    contents: Vec<GeminiContent<'a>>,
    generation_config: GeminiGenerationConfig<'a>,
    safety_settings: &'a [SafetySetting],
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<GeminiTextPart<'a>>,
}

#[derive(Serialize)]
struct GeminiTextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig<'a> {
    response_mime_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiCandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Deserialize)]
struct GeminiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

impl GeminiProvider {
    /// Create a new Gemini provider against [`DEFAULT_ENDPOINT`]
    ///
    /// # Errors
    ///
    /// Returns error if the API key is blank or the HTTP client cannot be
    /// built.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::Other("API key must not be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: model.into(),
            api_key,
            client,
            closed: AtomicBool::new(false),
        })
    }

    /// Override the API endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

fn build_body(request: &GenerationRequest) -> GeminiRequest<'_> {
    GeminiRequest {
        system_instruction: GeminiContent {
            role: None,
            parts: vec![GeminiTextPart {
                text: &request.system_instruction,
            }],
        },
        contents: vec![GeminiContent {
            role: Some("user"),
            parts: vec![GeminiTextPart {
                text: &request.contents,
            }],
        }],
        generation_config: GeminiGenerationConfig {
            response_mime_type: &request.response_mime_type,
            response_schema: request.response_schema.as_ref(),
        },
        safety_settings: &request.safety_settings,
    }
}

/// Decode a `generateContent` response body.
///
/// Thought parts are skipped. The aggregated text is the concatenation of
/// the first candidate's text parts.
pub(crate) fn decode_response(body: &str) -> Result<GenerationResponse, LlmError> {
    let raw: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    let candidates: Vec<Candidate> = raw
        .candidates
        .into_iter()
        .map(|candidate| Candidate {
            parts: candidate
                .content
                .map(|content| {
                    content
                        .parts
                        .into_iter()
                        .filter(|part| !part.thought)
                        .filter_map(|part| part.text)
                        .collect()
                })
                .unwrap_or_default(),
            finish_reason: candidate.finish_reason.as_deref().map(FinishReason::parse),
        })
        .collect();

    let text = candidates
        .first()
        .filter(|candidate| !candidate.parts.is_empty())
        .map(|candidate| candidate.parts.concat());

    Ok(GenerationResponse { text, candidates })
}

/// Build an [`LlmError::Http`] from an error body, preferring the API's own
/// status and message.
pub(crate) fn http_error(status: u16, body: &str) -> LlmError {
    let message = match serde_json::from_str::<GeminiErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(code) => format!("{}: {}", code, envelope.error.message),
            None => envelope.error.message,
        },
        Err(_) if body.trim().is_empty() => "Unknown error".to_string(),
        Err(_) => body.trim().to_string(),
    };
    LlmError::Http { status, message }
}

fn transport_error(error: reqwest::Error) -> LlmError {
    if error.is_timeout() {
        LlmError::Timeout(error.to_string())
    } else if error.is_connect() || error.is_request() {
        LlmError::Connection(error.to_string())
    } else {
        LlmError::Other(format!("Request failed: {}", error))
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, LlmError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(LlmError::Closed);
        }

        let url = self.url();
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&build_body(request))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(http_error(status.as_u16(), &body));
        }

        decode_response(&body)
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
