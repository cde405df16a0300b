//! Knowledge graph aggregate

use crate::{GraphStats, Node, Relationship};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// A knowledge graph consisting of nodes and relationships.
///
/// Construction (including deserialization) enforces the dedup invariant: no
/// two relationships share an `id`, and no two share the same
/// `(source_node_id, type, target_node_id)` triple. The first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawKnowledgeGraph")]
pub struct KnowledgeGraph {
    nodes: Vec<Node>,
    relationships: Vec<Relationship>,
}

#[derive(Deserialize)]
struct RawKnowledgeGraph {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    relationships: Vec<Relationship>,
}

impl KnowledgeGraph {
    /// Build a graph, dropping duplicate relationships.
    pub fn new(nodes: Vec<Node>, relationships: Vec<Relationship>) -> Self {
        let mut graph = Self {
            nodes,
            relationships,
        };
        graph.deduplicate_relationships();
        graph
    }

    /// Remove duplicate relationships in place and return the ones dropped.
    ///
    /// A relationship is kept only if neither its id nor its semantic triple
    /// has been seen earlier in the list. Running this on an already
    /// deduplicated graph removes nothing.
    pub fn deduplicate_relationships(&mut self) -> Vec<Relationship> {
        let mut seen_ids: HashSet<String> = HashSet::new();
        let mut seen_triples: HashSet<(String, String, String)> = HashSet::new();
        let mut kept = Vec::with_capacity(self.relationships.len());
        let mut dropped = Vec::new();

        for rel in std::mem::take(&mut self.relationships) {
            let (source, rel_type, target) = rel.semantic_key();
            let triple = (source.to_string(), rel_type.to_string(), target.to_string());

            if !seen_ids.contains(rel.id()) && !seen_triples.contains(&triple) {
                seen_ids.insert(rel.id().to_string());
                seen_triples.insert(triple);
                kept.push(rel);
            } else {
                dropped.push(rel);
            }
        }

        if !dropped.is_empty() {
            let details: Vec<String> = dropped
                .iter()
                .map(|d| {
                    format!(
                        "({}, {}, {}, {})",
                        d.id(),
                        d.source_node_id(),
                        d.relationship_type(),
                        d.target_node_id()
                    )
                })
                .collect();
            warn!(
                "Removed {} duplicate relationship(s). Details: [{}]",
                dropped.len(),
                details.join(", ")
            );
        }

        self.relationships = kept;
        dropped
    }

    /// Nodes in model order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Relationships in model order, deduplicated
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Look up a node by id
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    /// True when the graph has no nodes or no relationships
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() || self.relationships.is_empty()
    }

    /// Counts and type distributions
    pub fn stats(&self) -> GraphStats {
        GraphStats::from_graph(self)
    }

    /// Consume the graph, returning its parts
    pub fn into_parts(self) -> (Vec<Node>, Vec<Relationship>) {
        (self.nodes, self.relationships)
    }
}

impl From<RawKnowledgeGraph> for KnowledgeGraph {
    fn from(raw: RawKnowledgeGraph) -> Self {
        KnowledgeGraph::new(raw.nodes, raw.relationships)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_relationship() -> impl Strategy<Value = Relationship> {
        ("r[0-3]", "[A-B]", "[a-c]", "[a-c]")
            .prop_map(|(id, t, s, o)| Relationship::new(&id, &t, &s, &o).unwrap())
    }

    proptest! {
        /// Property: no two surviving relationships share an id or a triple
        #[test]
        fn test_dedup_invariant(rels in prop::collection::vec(arb_relationship(), 0..30)) {
            let graph = KnowledgeGraph::new(vec![], rels);

            let mut ids = HashSet::new();
            let mut triples = HashSet::new();
            for r in graph.relationships() {
                prop_assert!(ids.insert(r.id().to_string()));
                prop_assert!(triples.insert(r.semantic_key()));
            }
        }

        /// Property: survivors are exactly the first-seen entries, in input order
        #[test]
        fn test_first_seen_wins(rels in prop::collection::vec(arb_relationship(), 0..30)) {
            let mut ids = HashSet::new();
            let mut triples = HashSet::new();
            let mut expected = Vec::new();
            for r in &rels {
                if !ids.contains(r.id()) && !triples.contains(&r.semantic_key()) {
                    ids.insert(r.id());
                    triples.insert(r.semantic_key());
                    expected.push(r.clone());
                }
            }

            let graph = KnowledgeGraph::new(vec![], rels.clone());
            prop_assert_eq!(graph.relationships(), expected.as_slice());
        }

        /// Property: a second dedup pass removes nothing
        #[test]
        fn test_dedup_idempotent(rels in prop::collection::vec(arb_relationship(), 0..30)) {
            let graph = KnowledgeGraph::new(vec![], rels);
            let mut again = graph.clone();
            prop_assert!(again.deduplicate_relationships().is_empty());
            prop_assert_eq!(again, graph);
        }
    }
}
