//! Decode and validate model responses

use crate::error::ExtractorError;
use crate::prompt::Stage;
use nodus_llm::{FinishReason, GenerationResponse};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, warn};

/// Characters of a truncated response kept in the error detail
pub const TRUNCATION_TAIL_CHARS: usize = 200;

/// Characters of an unparsable response written to the log
pub const UNPARSABLE_TAIL_CHARS: usize = 500;

/// Last `n` characters of `text`
pub fn tail(text: &str, n: usize) -> &str {
    let count = text.chars().count();
    if count <= n {
        return text;
    }
    match text.char_indices().nth(count - n) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}

/// Turn a raw response into parsed JSON.
///
/// Order matters: empty payload, then finish reason, then JSON syntax.
pub fn decode_payload(
    response: &GenerationResponse,
    stage: Stage,
) -> Result<Value, ExtractorError> {
    let finish_reason = response.finish_reason();
    if let Some(reason) = finish_reason.filter(|r| **r != FinishReason::Stop) {
        warn!(
            "{} response may be incomplete. Finish reason: {}",
            stage, reason
        );
    }

    let text = response
        .payload_text()
        .ok_or_else(|| ExtractorError::ResponseTooLarge {
            detail: "Empty response from Gemini API; likely token or size limit.".to_string(),
        })?;

    let chars = text.chars().count();

    if finish_reason == Some(&FinishReason::MaxTokens) {
        let snippet = tail(text, TRUNCATION_TAIL_CHARS);
        error!("{} response truncated at {} characters", stage, chars);
        error!("Last {} chars: {}", TRUNCATION_TAIL_CHARS, snippet);
        return Err(ExtractorError::ResponseTooLarge {
            detail: format!(
                "Response exceeded maximum token limit (finish_reason=MAX_TOKENS, chars={}). Tail: {}",
                chars, snippet
            ),
        });
    }

    let value: Value = serde_json::from_str(text).map_err(|e| {
        error!("Failed to decode JSON {} response: {}", stage, e);
        error!("Response length: {} characters", chars);
        error!(
            "Last {} chars of response: {}",
            UNPARSABLE_TAIL_CHARS,
            tail(text, UNPARSABLE_TAIL_CHARS)
        );
        ExtractorError::ResponseUnparsable {
            detail: e.to_string(),
        }
    })?;

    if let Ok(compact) = serde_json::to_string(&value) {
        debug!("Raw {} response: {}", stage, compact);
    }

    Ok(value)
}

/// Validate parsed JSON against a domain type
pub fn validate_payload<T: DeserializeOwned>(
    value: Value,
    stage: Stage,
) -> Result<T, ExtractorError> {
    serde_json::from_value(value).map_err(|e| {
        error!("{} response failed schema validation: {}", stage, e);
        ExtractorError::ResponseUnparsable {
            detail: format!("schema validation failed: {}", e),
        }
    })
}
