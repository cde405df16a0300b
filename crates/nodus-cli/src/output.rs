//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::view::GraphView;
use colored::*;
use nodus_domain::{ExecutiveSummary, ExtractionResult, GraphStats, KnowledgeGraph};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a full pipeline result.
    ///
    /// JSON output is the result itself; the view only shapes table and
    /// quiet output.
    pub fn format_result(&self, result: &ExtractionResult, view: &GraphView) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Quiet => Ok(self.format_view_quiet(view)),
            OutputFormat::Table => {
                let mut sections = Vec::new();
                if let Some(summary) = result.summary() {
                    sections.push(self.format_summary_text(summary));
                }
                sections.push(self.format_graph_tables(result.knowledge_graph(), view));
                Ok(sections.join("\n\n"))
            }
        }
    }

    /// Format an executive summary.
    pub fn format_summary(&self, summary: &ExecutiveSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
            OutputFormat::Quiet => Ok(summary.to_plain_text()),
            OutputFormat::Table => Ok(self.format_summary_text(summary)),
        }
    }

    /// Format a knowledge graph through its view.
    pub fn format_graph(&self, graph: &KnowledgeGraph, view: &GraphView) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(view)?),
            OutputFormat::Quiet => Ok(self.format_view_quiet(view)),
            OutputFormat::Table => Ok(self.format_graph_tables(graph, view)),
        }
    }

    /// Format the model list, marking the selected model.
    pub fn format_models(&self, models: &[&str], selected: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "models": models,
                "selected": selected,
            }))?),
            OutputFormat::Quiet => Ok(models.join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Model", "Default", "Selected"]);
                for (idx, model) in models.iter().enumerate() {
                    let default = if idx == 0 { "yes" } else { "" };
                    let chosen = if *model == selected { "*" } else { "" };
                    builder.push_record([*model, default, chosen]);
                }
                Ok(Self::render(builder))
            }
        }
    }

    fn format_summary_text(&self, summary: &ExecutiveSummary) -> String {
        let mut out = format!(
            "{}\n\n{}",
            self.colorize("Executive Summary", "cyan"),
            summary.summary()
        );

        if let Some(points) = summary.key_points().filter(|p| !p.is_empty()) {
            out.push_str(&format!("\n\n{}\n", self.colorize("Key Points", "cyan")));
            let bullets: Vec<String> = points.iter().map(|p| format!("  • {}", p)).collect();
            out.push_str(&bullets.join("\n"));
        }
        out
    }

    fn format_graph_tables(&self, graph: &KnowledgeGraph, view: &GraphView) -> String {
        let mut sections = vec![
            self.colorize("Nodes", "cyan"),
            self.nodes_table(view),
            self.colorize("Relationships", "cyan"),
            self.relationships_table(view),
            self.colorize("Statistics", "cyan"),
            self.stats_table(&graph.stats()),
        ];

        if view.dropped_edges > 0 || view.hidden_nodes > 0 {
            sections.push(self.info(&format!(
                "{} relationship(s) with a missing or repeated endpoint and {} isolated node(s) not shown",
                view.dropped_edges, view.hidden_nodes
            )));
        }
        sections.join("\n")
    }

    /// Nodes as a table
    pub fn nodes_table(&self, view: &GraphView) -> String {
        if view.nodes.is_empty() {
            return self.colorize("No nodes to display.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Label", "Type"]);
        for node in &view.nodes {
            builder.push_record([
                node.id.clone(),
                node.label.clone(),
                self.colorize_hex(&node.node_type, node.color),
            ]);
        }
        Self::render(builder)
    }

    /// Relationships as a table
    pub fn relationships_table(&self, view: &GraphView) -> String {
        if view.edges.is_empty() {
            return self.colorize("No relationships to display.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Source", "Relationship", "Target"]);
        for edge in &view.edges {
            builder.push_record([
                edge.id.as_str(),
                edge.source.as_str(),
                edge.label.as_str(),
                edge.target.as_str(),
            ]);
        }
        Self::render(builder)
    }

    /// Graph statistics as a table
    pub fn stats_table(&self, stats: &GraphStats) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Metric", "Value"]);
        builder.push_record(["Nodes".to_string(), stats.node_count.to_string()]);
        builder.push_record([
            "Relationships".to_string(),
            stats.relationship_count.to_string(),
        ]);
        builder.push_record([
            "Relationship types".to_string(),
            stats.relationship_type_count.to_string(),
        ]);
        for (node_type, count) in &stats.node_type_distribution {
            builder.push_record([format!("  type: {}", node_type), count.to_string()]);
        }
        Self::render(builder)
    }

    fn format_view_quiet(&self, view: &GraphView) -> String {
        let ids: Vec<&str> = view.nodes.iter().map(|n| n.id.as_str()).collect();
        ids.join("\n")
    }

    fn render(builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().bold().to_string(),
            _ => text.to_string(),
        }
    }

    /// Colorize text with a `#rrggbb` colour if color is enabled.
    fn colorize_hex(&self, text: &str, hex: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match parse_hex(hex) {
            Some((r, g, b)) => text.truecolor(r, g, b).to_string(),
            None => text.to_string(),
        }
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
