//! Response schemas sent to the model
//!
//! These use the OpenAPI subset understood by Gemini structured output
//! (`OBJECT`, `ARRAY`, `STRING`, `nullable`). Field descriptions double as
//! instructions to the model, so they repeat the id conventions.

use serde_json::{json, Value};

/// Schema for a [`KnowledgeGraph`](crate::KnowledgeGraph) response
pub fn knowledge_graph_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "nodes": {
                "type": "ARRAY",
                "description": "List of nodes in the knowledge graph",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": {
                            "type": "STRING",
                            "description": "Unique, standardized identifier for the entity. Lowercase with underscores as separators. Numeric concepts are prefixed (e.g. 'age_34'); never a bare integer."
                        },
                        "label": {
                            "type": "STRING",
                            "nullable": true,
                            "description": "Human-readable name of the entity as written in the text."
                        },
                        "type": {
                            "type": "STRING",
                            "description": "General category of the entity, lowercase and singular (e.g. 'person', 'organization')."
                        }
                    },
                    "required": ["id", "type"]
                }
            },
            "relationships": {
                "type": "ARRAY",
                "description": "List of relationships in the knowledge graph",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": {
                            "type": "STRING",
                            "description": "Unique human-readable identifier for the relationship"
                        },
                        "type": {
                            "type": "STRING",
                            "description": "Relationship type as an UPPERCASE verb phrase joined by underscores (e.g. 'WORKS_AT')"
                        },
                        "source_node_id": {
                            "type": "STRING",
                            "description": "Id of the source node"
                        },
                        "target_node_id": {
                            "type": "STRING",
                            "description": "Id of the target node"
                        }
                    },
                    "required": ["id", "type", "source_node_id", "target_node_id"]
                }
            }
        },
        "required": ["nodes", "relationships"]
    })
}

/// Schema for an [`ExecutiveSummary`](crate::ExecutiveSummary) response
pub fn executive_summary_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "Concise executive-level summary organized under the five required headings."
            },
            "key_points": {
                "type": "ARRAY",
                "nullable": true,
                "description": "The 3-7 most important points, written for a busy executive.",
                "items": { "type": "STRING" }
            }
        },
        "required": ["summary"]
    })
}
