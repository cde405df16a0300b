//! Read-only graph view for presentation.
//!
//! The extraction pipeline does not enforce referential integrity, so this is
//! where dangling and self-referential relationships are filtered out before
//! anything is displayed or exported as a view.

use nodus_domain::{KnowledgeGraph, Node};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};

/// Node colours, indexed by [`type_color`]
pub const COLOR_PALETTE: [&str; 15] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf", "#aec7e8", "#ffbb78", "#98df8a", "#ff9896", "#c5b0d5",
];

/// Stable colour for a node type.
///
/// SHA-256 of the lowercased type; the first 8 bytes as a big-endian `u64`
/// select a palette entry.
pub fn type_color(node_type: &str) -> &'static str {
    let digest = Sha256::digest(node_type.to_lowercase().as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let index = u64::from_be_bytes(prefix) % COLOR_PALETTE.len() as u64;
    COLOR_PALETTE[index as usize]
}

/// `WORKS_AT` -> `Works At`
pub fn relationship_display_label(relationship_type: &str) -> String {
    relationship_type
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// A node as displayed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewNode {
    /// Node id
    pub id: String,
    /// Display label
    pub label: String,
    /// Node type
    #[serde(rename = "type")]
    pub node_type: String,
    /// Hex colour from [`type_color`]
    pub color: &'static str,
    /// Hover text
    pub tooltip: String,
}

/// A relationship as displayed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewEdge {
    /// Relationship id
    pub id: String,
    /// Source node id
    pub source: String,
    /// Target node id
    pub target: String,
    /// Raw relationship type
    #[serde(rename = "type")]
    pub relationship_type: String,
    /// Title-cased relationship type
    pub label: String,
    /// `Source -> Label -> Target`
    pub tooltip: String,
}

/// Displayable subset of a knowledge graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphView {
    /// Visible nodes, in graph order
    pub nodes: Vec<ViewNode>,
    /// Visible edges, in graph order
    pub edges: Vec<ViewEdge>,
    /// Relationships dropped for a missing or repeated endpoint
    pub dropped_edges: usize,
    /// Nodes hidden because no visible edge touches them
    pub hidden_nodes: usize,
}

impl GraphView {
    /// Build the view.
    ///
    /// Keeps relationships whose endpoints both exist and differ. Nodes with
    /// no kept relationship are hidden unless `show_isolated` is set.
    pub fn from_graph(graph: &KnowledgeGraph, show_isolated: bool) -> Self {
        let by_id: HashMap<&str, &Node> = graph.nodes().iter().map(|n| (n.id(), n)).collect();

        let mut edges = Vec::new();
        let mut connected: HashSet<&str> = HashSet::new();
        let mut dropped_edges = 0;

        for rel in graph.relationships() {
            let endpoints = (
                by_id.get(rel.source_node_id()),
                by_id.get(rel.target_node_id()),
            );
            let (source, target) = match endpoints {
                (Some(source), Some(target)) if !rel.is_self_referential() => (source, target),
                _ => {
                    dropped_edges += 1;
                    continue;
                }
            };

            connected.insert(source.id());
            connected.insert(target.id());

            let label = relationship_display_label(rel.relationship_type());
            edges.push(ViewEdge {
                id: rel.id().to_string(),
                source: source.id().to_string(),
                target: target.id().to_string(),
                relationship_type: rel.relationship_type().to_string(),
                tooltip: format!("{} -> {} -> {}", source.label(), label, target.label()),
                label,
            });
        }

        let mut nodes = Vec::new();
        let mut hidden_nodes = 0;
        for node in graph.nodes() {
            if !show_isolated && !connected.contains(node.id()) {
                hidden_nodes += 1;
                continue;
            }
            nodes.push(ViewNode {
                id: node.id().to_string(),
                label: node.label().to_string(),
                node_type: node.node_type().to_string(),
                color: type_color(node.node_type()),
                tooltip: format!(
                    "{}\nType: {}\nID: {}",
                    node.label(),
                    node.node_type(),
                    node.id()
                ),
            });
        }

        Self {
            nodes,
            edges,
            dropped_edges,
            hidden_nodes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodus_domain::Relationship;

    fn graph() -> KnowledgeGraph {
        KnowledgeGraph::new(
            vec![
                Node::new("alice", None, "person").unwrap(),
                Node::new("acme", Some("Acme Corp"), "organization").unwrap(),
                Node::new("loner", None, "person").unwrap(),
            ],
            vec![
                Relationship::new("r1", "WORKS_AT", "alice", "acme").unwrap(),
                Relationship::new("r2", "KNOWS", "alice", "ghost").unwrap(),
                Relationship::new("r3", "MANAGES", "acme", "acme").unwrap(),
            ],
        )
    }

    #[test]
    fn test_filters_dangling_and_self_edges() {
        let view = GraphView::from_graph(&graph(), false);
        assert_eq!(view.edges.len(), 1);
        assert_eq!(view.edges[0].id, "r1");
        assert_eq!(view.dropped_edges, 2);

        let ids: Vec<&str> = view.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["alice", "acme"]);
        assert_eq!(view.hidden_nodes, 1);
    }

    #[test]
    fn test_show_isolated_keeps_all_nodes() {
        let view = GraphView::from_graph(&graph(), true);
        assert_eq!(view.nodes.len(), 3);
        assert_eq!(view.hidden_nodes, 0);
        assert_eq!(view.edges.len(), 1);
    }

    #[test]
    fn test_edge_labels_and_tooltips() {
        let view = GraphView::from_graph(&graph(), false);
        let edge = &view.edges[0];
        assert_eq!(edge.label, "Works At");
        assert_eq!(edge.tooltip, "Alice -> Works At -> Acme Corp");

        let acme = &view.nodes[1];
        assert_eq!(acme.tooltip, "Acme Corp\nType: organization\nID: acme");
    }

    #[test]
    fn test_empty_graph_view() {
        let view = GraphView::from_graph(&KnowledgeGraph::default(), false);
        assert_eq!(view, GraphView::default());
    }

    #[test]
    fn test_relationship_display_label() {
        assert_eq!(relationship_display_label("WORKS_AT"), "Works At");
        assert_eq!(relationship_display_label("DEPENDS_ON"), "Depends On");
        assert_eq!(relationship_display_label("KNOWS"), "Knows");
        assert_eq!(relationship_display_label("PART__OF"), "Part Of");
    }

    #[test]
    fn test_type_color_is_deterministic() {
        assert_eq!(type_color("person"), "#c5b0d5");
        assert_eq!(type_color("organization"), "#d62728");
        assert_eq!(type_color("date"), "#7f7f7f");
        assert_eq!(type_color("Person"), type_color("person"));
        assert!(COLOR_PALETTE.contains(&type_color("anything at all")));
    }

    #[test]
    fn test_nodes_colored_by_type() {
        let view = GraphView::from_graph(&graph(), true);
        assert_eq!(view.nodes[0].color, view.nodes[2].color);
        assert_eq!(view.nodes[0].color, type_color("person"));
    }
}
