//! Schema validation errors

use thiserror::Error;

/// A structural validation failure on a single field of model output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid field `{field}`: {reason}")]
pub struct SchemaError {
    /// Dotted path of the offending field (e.g. `node.id`)
    pub field: &'static str,

    /// Human-readable reason the value was rejected
    pub reason: String,
}

impl SchemaError {
    /// Create a new schema error for `field`
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}
