//! Nodus Domain Layer
//!
//! This crate contains the validated data model produced by the extraction
//! pipeline. Everything the LLM sends back is untrusted until it has been
//! converted into one of these types.
//!
//! ## Key Concepts
//!
//! - **Node**: a typed entity vertex, keyed by a normalized `id`
//! - **Relationship**: a typed, directed edge between two node ids
//! - **KnowledgeGraph**: nodes plus relationships, with the dedup invariant
//!   (no two relationships share an `id` or a `(source, type, target)` triple)
//! - **ExecutiveSummary**: structured prose with optional key points
//! - **ExtractionResult**: summary plus graph, produced once per pipeline run
//!
//! ## Validation
//!
//! Every string field is trimmed, required fields must be non-empty, and each
//! field has a maximum length (see [`validation`]). Deserializing any of the
//! types runs the same checks, so `serde_json::from_value::<KnowledgeGraph>`
//! either yields a graph that satisfies the invariants or fails with a
//! [`SchemaError`] naming the offending field.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod graph;
pub mod node;
pub mod relationship;
pub mod result;
pub mod schema;
pub mod stats;
pub mod summary;
pub mod validation;

// Re-exports for convenience
pub use error::SchemaError;
pub use graph::KnowledgeGraph;
pub use node::Node;
pub use relationship::Relationship;
pub use result::ExtractionResult;
pub use stats::GraphStats;
pub use summary::{ExecutiveSummary, SUMMARY_SECTIONS};
