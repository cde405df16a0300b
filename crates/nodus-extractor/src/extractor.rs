//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::{decode_payload, validate_payload};
use crate::prompt::{PromptBuilder, Stage};
use nodus_domain::{ExecutiveSummary, ExtractionResult, KnowledgeGraph};
use nodus_llm::{GeminiProvider, LlmError, LlmProvider};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Turns free text into an executive summary and a knowledge graph.
///
/// Each stage is one upstream call. Nothing is retried and no partial result
/// is returned: any failure ends the operation with a classified
/// [`ExtractorError`].
pub struct Extractor<L: LlmProvider> {
    provider: Option<L>,
    config: ExtractorConfig,
}

impl<L: LlmProvider> Extractor<L> {
    /// Create a new Extractor around an already built provider
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::Config`] if the configuration is invalid.
    pub fn new(provider: L, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        info!(
            "Initialized extractor (model: {}, max input: {} chars)",
            provider.model(),
            config.max_input_length
        );
        Ok(Self {
            provider: Some(provider),
            config,
        })
    }

    /// Resolve the credential, then build the provider with `make_provider`.
    ///
    /// The factory is only called once a non-blank key is available, so a
    /// missing key never allocates a client.
    pub fn with_credential<F>(
        config: ExtractorConfig,
        api_key: Option<&str>,
        make_provider: F,
    ) -> Result<Self, ExtractorError>
    where
        F: FnOnce(&str, &ExtractorConfig) -> Result<L, LlmError>,
    {
        config.validate().map_err(ExtractorError::Config)?;

        let key = config
            .resolve_api_key(api_key)
            .ok_or_else(|| ExtractorError::MissingCredential {
                detail: "Gemini API key must be provided via argument or ExtractorConfig.api_key."
                    .to_string(),
            })?;

        let provider = make_provider(&key, &config)
            .map_err(|e| ExtractorError::Config(format!("failed to build provider: {}", e)))?;

        Self::new(provider, config)
    }

    /// Current configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Whether [`close`](Self::close) has been called
    pub fn is_closed(&self) -> bool {
        self.provider.is_none()
    }

    /// Produce an executive summary of `text`
    pub async fn summarize(&self, text: &str) -> Result<ExecutiveSummary, ExtractorError> {
        let value = self.run_stage(Stage::Summary, text).await?;
        let summary: ExecutiveSummary = validate_payload(value, Stage::Summary)?;

        let missing = summary.missing_sections();
        if !missing.is_empty() {
            warn!("Summary is missing section(s): {}", missing.join(", "));
        }

        info!(
            "Successfully generated executive summary ({} chars, {} key points)",
            summary.summary().chars().count(),
            summary.key_points().map_or(0, |points| points.len())
        );
        Ok(summary)
    }

    /// Extract a deduplicated knowledge graph from `text`
    pub async fn extract(&self, text: &str) -> Result<KnowledgeGraph, ExtractorError> {
        let value = self.run_stage(Stage::KnowledgeGraph, text).await?;
        let graph: KnowledgeGraph = validate_payload(value, Stage::KnowledgeGraph)?;

        info!(
            "Successfully extracted knowledge graph with {} nodes and {} relationships",
            graph.nodes().len(),
            graph.relationships().len()
        );
        Ok(graph)
    }

    /// Summarize, then extract the graph from either the summary prose or the
    /// original text. The two calls run strictly in that order.
    pub async fn extract_with_summary(
        &self,
        text: &str,
        use_summary_for_kg: bool,
    ) -> Result<ExtractionResult, ExtractorError> {
        info!(
            "Starting two-stage extraction (graph source: {})",
            if use_summary_for_kg { "summary" } else { "original text" }
        );

        let summary = self.summarize(text).await?;

        let graph = if use_summary_for_kg {
            self.extract(summary.summary()).await?
        } else {
            self.extract(text).await?
        };

        Ok(ExtractionResult::new(Some(summary), graph))
    }

    /// Release the provider. Idempotent; later calls fail with
    /// [`ExtractorError::Closed`].
    pub fn close(&mut self) {
        if let Some(provider) = self.provider.take() {
            provider.close();
            info!("Extractor closed");
        }
    }

    fn check_input(&self, text: &str) -> Result<(), ExtractorError> {
        if text.trim().is_empty() {
            return Err(ExtractorError::EmptyInput);
        }

        let length = text.chars().count();
        if length > self.config.max_input_length {
            return Err(ExtractorError::InputTooLong {
                length,
                max: self.config.max_input_length,
            });
        }
        Ok(())
    }

    async fn run_stage(&self, stage: Stage, text: &str) -> Result<Value, ExtractorError> {
        let provider = self.provider.as_ref().ok_or(ExtractorError::Closed)?;
        self.check_input(text)?;

        let request = PromptBuilder::new(stage, text).build();
        debug!(
            "Sending {} request ({} input chars)",
            stage,
            text.chars().count()
        );

        let start = Instant::now();
        let response = provider.generate(&request).await.map_err(|e| {
            let mapped = match e {
                LlmError::Closed => ExtractorError::Closed,
                other => ExtractorError::classify(other.to_string()),
            };
            error!("{} request failed ({:?}): {}", stage, mapped.kind(), mapped.detail());
            mapped
        })?;
        info!(
            "Gemini API responded in {:.2}s",
            start.elapsed().as_secs_f64()
        );

        decode_payload(&response, stage)
    }
}

impl Extractor<GeminiProvider> {
    /// Create an Extractor backed by the Gemini REST API
    ///
    /// # Errors
    ///
    /// - [`ExtractorError::MissingCredential`] if neither `api_key` nor
    ///   `config.api_key` holds a non-blank key
    /// - [`ExtractorError::Config`] if the configuration is invalid
    pub fn from_config(
        config: ExtractorConfig,
        api_key: Option<&str>,
    ) -> Result<Self, ExtractorError> {
        Self::with_credential(config, api_key, |key, config| {
            Ok(GeminiProvider::new(key, config.model.as_str(), config.request_timeout())?
                .with_endpoint(config.endpoint.as_str()))
        })
    }
}

impl<L: LlmProvider> Drop for Extractor<L> {
    fn drop(&mut self) {
        self.close();
    }
}
