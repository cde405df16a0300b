//! Configuration for the Extractor

use nodus_llm::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default maximum input length in characters
pub const DEFAULT_MAX_INPUT_LENGTH: usize = 100_000;

/// Default transport timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Configuration for the Extractor
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Gemini model identifier
    pub model: String,

    /// Maximum input text length (characters)
    pub max_input_length: usize,

    /// Transport timeout for a single upstream call (seconds)
    pub request_timeout_secs: u64,

    /// API base URL
    pub endpoint: String,

    /// API key; usually supplied through the environment instead
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl ExtractorConfig {
    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.max_input_length == 0 {
            return Err("max_input_length must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(format!(
                "endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            ));
        }
        Ok(())
    }

    /// Pick the credential: the explicit argument first, then `api_key`.
    /// Blank values count as absent.
    pub fn resolve_api_key(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .or(self.api_key.as_deref())
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
    }
}

impl Default for ExtractorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_input_length: DEFAULT_MAX_INPUT_LENGTH,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
        }
    }
}

impl fmt::Debug for ExtractorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractorConfig")
            .field("model", &self.model)
            .field("max_input_length", &self.max_input_length)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ExtractorConfig {
    /// Fast preset: the lightest model and a short timeout
    pub fn fast() -> Self {
        Self {
            model: "gemini-2.5-flash-lite".to_string(),
            request_timeout_secs: 60,
            ..Self::default()
        }
    }

    /// Thorough preset: the strongest model and a long timeout
    pub fn thorough() -> Self {
        Self {
            model: "gemini-2.5-pro".to_string(),
            request_timeout_secs: 300,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.model, "gemini-2.5-flash-lite");
        assert_eq!(config.max_input_length, 100_000);
        assert_eq!(config.request_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ExtractorConfig::fast().validate().is_ok());
        assert!(ExtractorConfig::thorough().validate().is_ok());
        assert_eq!(ExtractorConfig::thorough().model, "gemini-2.5-pro");
    }

    #[test]
    fn test_invalid_values() {
        let mut config = ExtractorConfig::default();
        config.max_input_length = 0;
        assert!(config.validate().is_err());

        let mut config = ExtractorConfig::default();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = ExtractorConfig::default();
        config.model = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = ExtractorConfig::default();
        config.endpoint = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolve_api_key() {
        let mut config = ExtractorConfig::default();
        assert_eq!(config.resolve_api_key(None), None);
        assert_eq!(config.resolve_api_key(Some("  ")), None);

        config.api_key = Some("from-config".to_string());
        assert_eq!(config.resolve_api_key(None).as_deref(), Some("from-config"));
        assert_eq!(
            config.resolve_api_key(Some(" explicit ")).as_deref(),
            Some("explicit")
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ExtractorConfig {
            api_key: Some("secret-key".to_string()),
            ..ExtractorConfig::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::thorough();
        let toml_str = config.to_toml().unwrap();
        assert!(!toml_str.contains("api_key"));

        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = ExtractorConfig::from_toml("model = \"gemini-2.5-flash\"").unwrap();
        assert_eq!(parsed.model, "gemini-2.5-flash");
        assert_eq!(parsed.max_input_length, DEFAULT_MAX_INPUT_LENGTH);
        assert!(ExtractorConfig::from_toml("max_input_length = \"many\"").is_err());
    }
}
