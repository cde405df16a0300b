//! Error types for the Extractor
//!
//! Upstream failures always land in one of seven kinds. Local precondition
//! errors are raised before any network attempt and are never reclassified.

use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractorError {
    /// No API key was supplied
    #[error("Missing credential: {detail}")]
    MissingCredential {
        /// Diagnostic detail
        detail: String,
    },

    /// Upstream service unavailable or returned a 5xx
    #[error("Service unavailable: {detail}")]
    ServiceUnavailable {
        /// Diagnostic detail
        detail: String,
    },

    /// Upstream quota or rate limit exceeded
    #[error("Rate limited: {detail}")]
    RateLimited {
        /// Diagnostic detail
        detail: String,
    },

    /// Response was empty or truncated at the token ceiling
    #[error("Response too large: {detail}")]
    ResponseTooLarge {
        /// Diagnostic detail
        detail: String,
    },

    /// Network, timeout or connection failure
    #[error("Connectivity failure: {detail}")]
    ConnectivityFailure {
        /// Diagnostic detail
        detail: String,
    },

    /// Response was not valid JSON or violated the schema
    #[error("Response unparsable: {detail}")]
    ResponseUnparsable {
        /// Diagnostic detail
        detail: String,
    },

    /// Any other upstream failure
    #[error("Upstream failure: {detail}")]
    UnclassifiedUpstreamFailure {
        /// Diagnostic detail
        detail: String,
    },

    /// Input text was empty or whitespace-only
    #[error("Input text must be a non-empty string")]
    EmptyInput,

    /// Input text exceeds the configured maximum
    #[error("Input text is too long: {length} chars (max: {max})")]
    InputTooLong {
        /// Length of the input in characters
        length: usize,
        /// Configured maximum
        max: usize,
    },

    /// The extractor was closed
    #[error("Extractor has been closed")]
    Closed,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Discriminant of [`ExtractorError`] for callers that match on kind only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`ExtractorError::MissingCredential`]
    MissingCredential,
    /// See [`ExtractorError::ServiceUnavailable`]
    ServiceUnavailable,
    /// See [`ExtractorError::RateLimited`]
    RateLimited,
    /// See [`ExtractorError::ResponseTooLarge`]
    ResponseTooLarge,
    /// See [`ExtractorError::ConnectivityFailure`]
    ConnectivityFailure,
    /// See [`ExtractorError::ResponseUnparsable`]
    ResponseUnparsable,
    /// See [`ExtractorError::UnclassifiedUpstreamFailure`]
    UnclassifiedUpstreamFailure,
    /// See [`ExtractorError::EmptyInput`]
    EmptyInput,
    /// See [`ExtractorError::InputTooLong`]
    InputTooLong,
    /// See [`ExtractorError::Closed`]
    Closed,
    /// See [`ExtractorError::Config`]
    Config,
}

const UNAVAILABLE_KEYWORDS: [&str; 3] = ["unavailable", "503", "502"];
const RATE_LIMIT_KEYWORDS: [&str; 3] = ["rate limit", "quota", "429"];
const CONNECTIVITY_KEYWORDS: [&str; 4] = ["timeout", "timed out", "connection", "network"];

impl ExtractorError {
    /// Map a provider error message onto the upstream taxonomy.
    ///
    /// Case-insensitive keyword match; the first matching family wins, in the
    /// order unavailable, rate limit, connectivity.
    pub fn classify(message: impl Into<String>) -> Self {
        let detail = message.into();
        let lowered = detail.to_lowercase();
        let hit = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(k));

        if hit(&UNAVAILABLE_KEYWORDS) {
            ExtractorError::ServiceUnavailable { detail }
        } else if hit(&RATE_LIMIT_KEYWORDS) {
            ExtractorError::RateLimited { detail }
        } else if hit(&CONNECTIVITY_KEYWORDS) {
            ExtractorError::ConnectivityFailure { detail }
        } else {
            ExtractorError::UnclassifiedUpstreamFailure { detail }
        }
    }

    /// Kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractorError::MissingCredential { .. } => ErrorKind::MissingCredential,
            ExtractorError::ServiceUnavailable { .. } => ErrorKind::ServiceUnavailable,
            ExtractorError::RateLimited { .. } => ErrorKind::RateLimited,
            ExtractorError::ResponseTooLarge { .. } => ErrorKind::ResponseTooLarge,
            ExtractorError::ConnectivityFailure { .. } => ErrorKind::ConnectivityFailure,
            ExtractorError::ResponseUnparsable { .. } => ErrorKind::ResponseUnparsable,
            ExtractorError::UnclassifiedUpstreamFailure { .. } => {
                ErrorKind::UnclassifiedUpstreamFailure
            }
            ExtractorError::EmptyInput => ErrorKind::EmptyInput,
            ExtractorError::InputTooLong { .. } => ErrorKind::InputTooLong,
            ExtractorError::Closed => ErrorKind::Closed,
            ExtractorError::Config(_) => ErrorKind::Config,
        }
    }

    /// Short message suitable for showing to an end user
    pub fn user_message(&self) -> String {
        match self {
            ExtractorError::MissingCredential { .. } => {
                "No Gemini API key is configured. Set GEMINI_API_KEY or pass --api-key.".to_string()
            }
            ExtractorError::ServiceUnavailable { .. } => {
                "The Gemini service is temporarily unavailable. Please try again in a few minutes."
                    .to_string()
            }
            ExtractorError::RateLimited { .. } => {
                "The Gemini API rate limit has been reached. Please wait a bit before trying again."
                    .to_string()
            }
            ExtractorError::ResponseTooLarge { .. } => {
                "The response from Gemini was too large to process. Try a shorter or more focused input."
                    .to_string()
            }
            ExtractorError::ConnectivityFailure { .. } => {
                "There was a network problem contacting Gemini. Check your connection and try again."
                    .to_string()
            }
            ExtractorError::ResponseUnparsable { .. } => {
                "Gemini returned a response, but it could not be understood. Try simplifying the input."
                    .to_string()
            }
            ExtractorError::UnclassifiedUpstreamFailure { .. } => {
                "An unexpected error occurred while contacting Gemini.".to_string()
            }
            ExtractorError::EmptyInput => "Please provide some text to analyze.".to_string(),
            ExtractorError::InputTooLong { length, max } => format!(
                "Input text is too long ({} characters). Maximum allowed is {} characters.",
                length, max
            ),
            ExtractorError::Closed => "The extractor has been closed.".to_string(),
            ExtractorError::Config(reason) => format!("Invalid extractor configuration: {}", reason),
        }
    }

    /// Diagnostic detail for logs
    pub fn detail(&self) -> String {
        match self {
            ExtractorError::MissingCredential { detail }
            | ExtractorError::ServiceUnavailable { detail }
            | ExtractorError::RateLimited { detail }
            | ExtractorError::ResponseTooLarge { detail }
            | ExtractorError::ConnectivityFailure { detail }
            | ExtractorError::ResponseUnparsable { detail }
            | ExtractorError::UnclassifiedUpstreamFailure { detail } => detail.clone(),
            other => other.to_string(),
        }
    }

    /// Whether this error was raised locally before any upstream call
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ExtractorError::MissingCredential { .. }
                | ExtractorError::EmptyInput
                | ExtractorError::InputTooLong { .. }
                | ExtractorError::Closed
                | ExtractorError::Config(_)
        )
    }
}
