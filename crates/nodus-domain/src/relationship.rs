//! Relationship module

use crate::validation::{required_field, MAX_ID_LENGTH, MAX_RELATIONSHIP_TYPE_LENGTH};
use crate::SchemaError;
use serde::{Deserialize, Serialize};

/// A directed, typed edge between two node ids.
///
/// Whether `source_node_id` and `target_node_id` resolve to nodes in the same
/// graph is not checked here; consumers filter dangling edges themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRelationship")]
pub struct Relationship {
    id: String,
    #[serde(rename = "type")]
    relationship_type: String,
    source_node_id: String,
    target_node_id: String,
}

#[derive(Deserialize)]
struct RawRelationship {
    id: String,
    #[serde(rename = "type")]
    relationship_type: String,
    source_node_id: String,
    target_node_id: String,
}

impl Relationship {
    /// Create a validated relationship
    pub fn new(
        id: &str,
        relationship_type: &str,
        source_node_id: &str,
        target_node_id: &str,
    ) -> Result<Self, SchemaError> {
        Ok(Self {
            id: required_field("relationship.id", id, MAX_ID_LENGTH)?,
            relationship_type: required_field(
                "relationship.type",
                relationship_type,
                MAX_RELATIONSHIP_TYPE_LENGTH,
            )?,
            source_node_id: required_field(
                "relationship.source_node_id",
                source_node_id,
                MAX_ID_LENGTH,
            )?,
            target_node_id: required_field(
                "relationship.target_node_id",
                target_node_id,
                MAX_ID_LENGTH,
            )?,
        })
    }

    /// Unique human-readable identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Verb-phrase category (e.g. `WORKS_AT`)
    pub fn relationship_type(&self) -> &str {
        &self.relationship_type
    }

    /// Id of the node the edge starts from
    pub fn source_node_id(&self) -> &str {
        &self.source_node_id
    }

    /// Id of the node the edge points to
    pub fn target_node_id(&self) -> &str {
        &self.target_node_id
    }

    /// The `(source, type, target)` triple used for semantic deduplication
    pub fn semantic_key(&self) -> (&str, &str, &str) {
        (
            &self.source_node_id,
            &self.relationship_type,
            &self.target_node_id,
        )
    }

    /// Whether the edge starts and ends at the same node id
    pub fn is_self_referential(&self) -> bool {
        self.source_node_id == self.target_node_id
    }
}

impl TryFrom<RawRelationship> for Relationship {
    type Error = SchemaError;

    fn try_from(raw: RawRelationship) -> Result<Self, Self::Error> {
        Relationship::new(
            &raw.id,
            &raw.relationship_type,
            &raw.source_node_id,
            &raw.target_node_id,
        )
    }
}
