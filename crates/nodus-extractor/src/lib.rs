//! Nodus Extractor
//!
//! Converts untrusted free text into an executive summary and a validated
//! knowledge graph using a structured-output LLM.
//!
//! # Architecture
//!
//! ```text
//! Text → Extractor → LLM → JSON → Schema validation → ExtractionResult
//! ```
//!
//! # Key Features
//!
//! - **Prompt-injection defense**: user text is wrapped in untrusted-content
//!   delimiters and the system instructions forbid following embedded commands
//! - **Response integrity**: empty, truncated and malformed responses are
//!   rejected, never coerced
//! - **Error taxonomy**: every upstream failure maps to one of seven kinds,
//!   each with a user-facing message and a diagnostic detail
//! - **Two-stage pipeline**: summarize, then extract the graph from the summary
//!
//! # Example Usage
//!
//! ```no_run
//! use nodus_extractor::{Extractor, ExtractorConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut extractor = Extractor::from_config(ExtractorConfig::default(), Some("api-key"))?;
//!
//! let result = extractor
//!     .extract_with_summary("Alice works at Acme Corp.", true)
//!     .await?;
//!
//! println!("Nodes: {}", result.knowledge_graph().nodes().len());
//! extractor.close();
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
mod prompt;

#[cfg(test)]
mod tests;

pub use config::{ExtractorConfig, DEFAULT_MAX_INPUT_LENGTH, DEFAULT_REQUEST_TIMEOUT_SECS};
pub use error::{ErrorKind, ExtractorError};
pub use extractor::Extractor;
pub use prompt::{wrap_user_content, Stage, CONTENT_BEGIN, CONTENT_END};
