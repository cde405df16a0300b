//! Node module

use crate::validation::{
    is_bare_integer, label_from_id, optional_field, required_field, MAX_ID_LENGTH,
    MAX_LABEL_LENGTH, MAX_NODE_TYPE_LENGTH,
};
use crate::SchemaError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An entity or concept in the knowledge graph.
///
/// `id` is the join key shared with relationships; `label` is cosmetic and is
/// always populated once the node has been validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawNode")]
pub struct Node {
    id: String,
    label: String,
    #[serde(rename = "type")]
    node_type: String,
}

/// Unvalidated node as it appears in a model response
#[derive(Deserialize)]
struct RawNode {
    id: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(rename = "type")]
    node_type: String,
}

impl Node {
    /// Create a validated node.
    ///
    /// When `label` is absent or blank it is derived from `id`
    /// (`alex_johnson` becomes `Alex Johnson`).
    pub fn new(id: &str, label: Option<&str>, node_type: &str) -> Result<Self, SchemaError> {
        let id = required_field("node.id", id, MAX_ID_LENGTH)?;
        if is_bare_integer(&id) {
            return Err(SchemaError::new(
                "node.id",
                format!("'{}' is a bare integer; numeric ids need a prefix such as 'age_34'", id),
            ));
        }

        let node_type = required_field("node.type", node_type, MAX_NODE_TYPE_LENGTH)?;

        let label = match optional_field("node.label", label, MAX_LABEL_LENGTH)? {
            Some(label) => label,
            None => {
                let derived = label_from_id(&id);
                debug!("Auto-generated label '{}' for node id '{}'", derived, id);
                derived
            }
        };

        Ok(Self {
            id,
            label,
            node_type,
        })
    }

    /// Normalized identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable display name
    pub fn label(&self) -> &str {
        &self.label
    }

    /// General category (e.g. `person`)
    pub fn node_type(&self) -> &str {
        &self.node_type
    }
}

impl TryFrom<RawNode> for Node {
    type Error = SchemaError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        Node::new(&raw.id, raw.label.as_deref(), &raw.node_type)
    }
}
