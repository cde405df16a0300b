//! Provider-neutral request and response types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// MIME type requested for structured JSON output
pub const JSON_MIME_TYPE: &str = "application/json";

/// Content-safety category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarmCategory {
    /// Hate speech
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    /// Dangerous content
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
    /// Harassment
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    /// Sexually explicit content
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
}

/// Blocking threshold for a [`HarmCategory`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    /// Block low probability and above
    BlockLowAndAbove,
    /// Block medium probability and above
    BlockMediumAndAbove,
    /// Block only high probability
    BlockOnlyHigh,
    /// Never block
    BlockNone,
}

/// A single content-safety threshold sent with the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    /// Category the threshold applies to
    pub category: HarmCategory,
    /// Threshold at which content is blocked
    pub threshold: HarmBlockThreshold,
}

impl SafetySetting {
    /// Block medium-and-above for hate speech, dangerous content, harassment
    /// and sexually explicit content.
    pub fn default_set() -> Vec<SafetySetting> {
        [
            HarmCategory::HateSpeech,
            HarmCategory::DangerousContent,
            HarmCategory::Harassment,
            HarmCategory::SexuallyExplicit,
        ]
        .into_iter()
        .map(|category| SafetySetting {
            category,
            threshold: HarmBlockThreshold::BlockMediumAndAbove,
        })
        .collect()
    }
}

/// One structured-generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Fixed system instruction
    pub system_instruction: String,

    /// User content (already wrapped by the caller)
    pub contents: String,

    /// Requested output MIME type
    pub response_mime_type: String,

    /// JSON schema the response must conform to
    pub response_schema: Option<Value>,

    /// Content-safety thresholds
    pub safety_settings: Vec<SafetySetting>,
}

impl GenerationRequest {
    /// Create a JSON-mode request with the default safety settings
    pub fn json(system_instruction: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            contents: contents.into(),
            response_mime_type: JSON_MIME_TYPE.to_string(),
            response_schema: None,
            safety_settings: SafetySetting::default_set(),
        }
    }

    /// Attach a response schema
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

/// Why the model stopped generating
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
    /// Natural stop
    Stop,
    /// Output hit the token ceiling
    MaxTokens,
    /// Stopped by a safety filter
    Safety,
    /// Stopped for recitation
    Recitation,
    /// Any other provider-specific reason
    Other(String),
}

impl FinishReason {
    /// Parse a provider finish-reason string such as `MAX_TOKENS`
    pub fn parse(raw: &str) -> Self {
        match raw {
            "STOP" => FinishReason::Stop,
            "MAX_TOKENS" => FinishReason::MaxTokens,
            "SAFETY" => FinishReason::Safety,
            "RECITATION" => FinishReason::Recitation,
            other => FinishReason::Other(other.to_string()),
        }
    }
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinishReason::Stop => write!(f, "STOP"),
            FinishReason::MaxTokens => write!(f, "MAX_TOKENS"),
            FinishReason::Safety => write!(f, "SAFETY"),
            FinishReason::Recitation => write!(f, "RECITATION"),
            FinishReason::Other(other) => write!(f, "{}", other),
        }
    }
}

/// One generated candidate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    /// Text parts in order
    pub parts: Vec<String>,
    /// Completion signal, if the provider reported one
    pub finish_reason: Option<FinishReason>,
}

/// Result of a generation call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResponse {
    /// Aggregated response text, when the provider could assemble one
    pub text: Option<String>,
    /// Raw candidates
    pub candidates: Vec<Candidate>,
}

impl GenerationResponse {
    /// A single-candidate response that stopped normally
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::with_finish_reason(text, FinishReason::Stop)
    }

    /// A single-candidate response with an explicit finish reason
    pub fn with_finish_reason(text: impl Into<String>, finish_reason: FinishReason) -> Self {
        let text = text.into();
        Self {
            text: Some(text.clone()),
            candidates: vec![Candidate {
                parts: vec![text],
                finish_reason: Some(finish_reason),
            }],
        }
    }

    /// Extract the textual payload.
    ///
    /// Tries the aggregated text first, then the first part of the first
    /// candidate. Empty strings count as missing.
    pub fn payload_text(&self) -> Option<&str> {
        if let Some(text) = self.text.as_deref().filter(|t| !t.is_empty()) {
            return Some(text);
        }

        self.candidates
            .first()
            .and_then(|candidate| candidate.parts.first())
            .map(String::as_str)
            .filter(|t| !t.is_empty())
    }

    /// Finish reason of the first candidate
    pub fn finish_reason(&self) -> Option<&FinishReason> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.finish_reason.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_safety_settings() {
        let settings = SafetySetting::default_set();
        assert_eq!(settings.len(), 4);
        assert!(settings
            .iter()
            .all(|s| s.threshold == HarmBlockThreshold::BlockMediumAndAbove));

        let json = serde_json::to_value(&settings[0]).unwrap();
        assert_eq!(json["category"], "HARM_CATEGORY_HATE_SPEECH");
        assert_eq!(json["threshold"], "BLOCK_MEDIUM_AND_ABOVE");
    }

    #[test]
    fn test_json_request() {
        let request = GenerationRequest::json("system", "content")
            .with_schema(serde_json::json!({"type": "OBJECT"}));
        assert_eq!(request.response_mime_type, "application/json");
        assert!(request.response_schema.is_some());
        assert_eq!(request.safety_settings.len(), 4);
    }

    #[test]
    fn test_payload_prefers_aggregated_text() {
        let response = GenerationResponse {
            text: Some("primary".into()),
            candidates: vec![Candidate {
                parts: vec!["fallback".into()],
                finish_reason: None,
            }],
        };
        assert_eq!(response.payload_text(), Some("primary"));
    }

    #[test]
    fn test_payload_falls_back_to_first_part() {
        let response = GenerationResponse {
            text: None,
            candidates: vec![Candidate {
                parts: vec!["fallback".into(), "second".into()],
                finish_reason: Some(FinishReason::Stop),
            }],
        };
        assert_eq!(response.payload_text(), Some("fallback"));

        let blank_primary = GenerationResponse {
            text: Some(String::new()),
            ..response
        };
        assert_eq!(blank_primary.payload_text(), Some("fallback"));
    }

    #[test]
    fn test_payload_missing() {
        assert_eq!(GenerationResponse::default().payload_text(), None);
        assert_eq!(GenerationResponse::from_text("").payload_text(), None);
    }

    #[test]
    fn test_finish_reason_parsing() {
        assert_eq!(FinishReason::parse("STOP"), FinishReason::Stop);
        assert_eq!(FinishReason::parse("MAX_TOKENS"), FinishReason::MaxTokens);
        assert_eq!(
            FinishReason::parse("BLOCKLIST"),
            FinishReason::Other("BLOCKLIST".into())
        );
        assert_eq!(FinishReason::MaxTokens.to_string(), "MAX_TOKENS");
    }
}
