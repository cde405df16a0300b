//! Extract command implementation.

use super::{read_input, write_export};
use crate::cli::ExtractArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::output::Formatter;
use crate::view::GraphView;
use nodus_extractor::Extractor;
use nodus_llm::LlmProvider;

/// Warning shown when the model returned no usable graph.
pub const EMPTY_GRAPH_WARNING: &str =
    "Extraction completed but returned an empty knowledge graph. Try a longer or more detailed input.";

/// Execute the extract command.
pub async fn execute_extract<L: LlmProvider>(
    args: ExtractArgs,
    extractor: &Extractor<L>,
    settings: &Settings,
    formatter: &Formatter,
) -> Result<()> {
    let text = read_input(&args.input)?;
    let use_summary_for_kg = settings.use_summary_for_kg && !args.raw_graph;
    let show_isolated = settings.show_isolated || args.show_isolated;

    let result = extractor
        .extract_with_summary(&text, use_summary_for_kg)
        .await?;

    if let (Some(path), Some(summary)) = (&args.summary_out, result.summary()) {
        write_export(path, &summary.to_plain_text())?;
        eprintln!(
            "{}",
            formatter.success(&format!("Summary written to {}", path.display()))
        );
    }

    let graph = result.knowledge_graph();
    if graph.is_empty() {
        eprintln!("{}", formatter.warning(EMPTY_GRAPH_WARNING));
    } else if let Some(path) = &args.output {
        write_export(path, &serde_json::to_string_pretty(graph)?)?;
        eprintln!(
            "{}",
            formatter.success(&format!("Knowledge graph written to {}", path.display()))
        );
    }

    let view = GraphView::from_graph(graph, show_isolated);
    println!("{}", formatter.format_result(&result, &view)?);

    Ok(())
}
