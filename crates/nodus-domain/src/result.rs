//! Pipeline result bundle

use crate::{ExecutiveSummary, KnowledgeGraph};
use serde::{Deserialize, Serialize};

/// Summary plus knowledge graph produced by one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    summary: Option<ExecutiveSummary>,
    knowledge_graph: KnowledgeGraph,
}

impl ExtractionResult {
    /// Bundle a summary and a graph
    pub fn new(summary: Option<ExecutiveSummary>, knowledge_graph: KnowledgeGraph) -> Self {
        Self {
            summary,
            knowledge_graph,
        }
    }

    /// Executive summary derived from the input text
    pub fn summary(&self) -> Option<&ExecutiveSummary> {
        self.summary.as_ref()
    }

    /// Knowledge graph extracted from the summary or the raw text
    pub fn knowledge_graph(&self) -> &KnowledgeGraph {
        &self.knowledge_graph
    }

    /// Consume the result, returning its parts
    pub fn into_parts(self) -> (Option<ExecutiveSummary>, KnowledgeGraph) {
        (self.summary, self.knowledge_graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Node;

    #[test]
    fn test_serializes_both_parts() {
        let result = ExtractionResult::new(
            Some(ExecutiveSummary::new("Overview: x", None).unwrap()),
            KnowledgeGraph::new(vec![Node::new("alice", None, "person").unwrap()], vec![]),
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["summary"]["summary"], "Overview: x");
        assert_eq!(json["knowledge_graph"]["nodes"][0]["id"], "alice");
    }

    #[test]
    fn test_summary_is_optional() {
        let result: ExtractionResult =
            serde_json::from_str(r#"{"summary": null, "knowledge_graph": {}}"#).unwrap();
        assert!(result.summary().is_none());
        assert!(result.knowledge_graph().nodes().is_empty());
    }
}
