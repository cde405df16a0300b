//! Graph statistics

use crate::KnowledgeGraph;
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary counts for a knowledge graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    /// Total number of nodes
    pub node_count: usize,

    /// Total number of relationships
    pub relationship_count: usize,

    /// Number of distinct relationship types
    pub relationship_type_count: usize,

    /// Node count per node type
    pub node_type_distribution: BTreeMap<String, usize>,

    /// Relationship count per relationship type
    pub relationship_type_distribution: BTreeMap<String, usize>,
}

impl GraphStats {
    /// Compute statistics for `graph`
    pub fn from_graph(graph: &KnowledgeGraph) -> Self {
        let mut node_type_distribution = BTreeMap::new();
        for node in graph.nodes() {
            *node_type_distribution
                .entry(node.node_type().to_string())
                .or_insert(0) += 1;
        }

        let mut relationship_type_distribution = BTreeMap::new();
        for rel in graph.relationships() {
            *relationship_type_distribution
                .entry(rel.relationship_type().to_string())
                .or_insert(0) += 1;
        }

        Self {
            node_count: graph.nodes().len(),
            relationship_count: graph.relationships().len(),
            relationship_type_count: relationship_type_distribution.len(),
            node_type_distribution,
            relationship_type_distribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Node, Relationship};

    #[test]
    fn test_stats() {
        let graph = KnowledgeGraph::new(
            vec![
                Node::new("alice", None, "person").unwrap(),
                Node::new("bob", None, "person").unwrap(),
                Node::new("acme", None, "organization").unwrap(),
            ],
            vec![
                Relationship::new("r1", "WORKS_AT", "alice", "acme").unwrap(),
                Relationship::new("r2", "WORKS_AT", "bob", "acme").unwrap(),
                Relationship::new("r3", "KNOWS", "alice", "bob").unwrap(),
            ],
        );

        let stats = graph.stats();
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.relationship_count, 3);
        assert_eq!(stats.relationship_type_count, 2);
        assert_eq!(stats.node_type_distribution["person"], 2);
        assert_eq!(stats.node_type_distribution["organization"], 1);
        assert_eq!(stats.relationship_type_distribution["WORKS_AT"], 2);
    }

    #[test]
    fn test_empty_graph_stats() {
        assert_eq!(KnowledgeGraph::default().stats(), GraphStats::default());
    }
}
