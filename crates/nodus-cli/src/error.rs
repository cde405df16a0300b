//! Error types for the CLI application.

use nodus_extractor::ExtractorError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Extraction pipeline error
    #[error(transparent)]
    Extractor(#[from] ExtractorError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Message shown to the user on stderr
    pub fn user_message(&self) -> String {
        match self {
            CliError::Extractor(e) => e.user_message(),
            other => other.to_string(),
        }
    }

    /// Diagnostic detail written to the log
    pub fn detail(&self) -> String {
        match self {
            CliError::Extractor(e) => e.detail(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extractor_error_messages() {
        let err: CliError = ExtractorError::classify("HTTP 429: quota").into();
        assert!(err.user_message().contains("rate limit"));
        assert_eq!(err.detail(), "HTTP 429: quota");
    }

    #[test]
    fn test_plain_error_messages() {
        let err = CliError::InvalidInput("empty file".into());
        assert_eq!(err.user_message(), "Invalid input: empty file");
        assert_eq!(err.detail(), err.user_message());
    }
}
