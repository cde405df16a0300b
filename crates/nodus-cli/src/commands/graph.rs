//! Graph command implementation.

use super::extract::EMPTY_GRAPH_WARNING;
use super::{read_input, write_export};
use crate::cli::GraphArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::output::Formatter;
use crate::view::GraphView;
use nodus_extractor::Extractor;
use nodus_llm::LlmProvider;

/// Execute the graph command.
pub async fn execute_graph<L: LlmProvider>(
    args: GraphArgs,
    extractor: &Extractor<L>,
    settings: &Settings,
    formatter: &Formatter,
) -> Result<()> {
    let text = read_input(&args.input)?;
    let graph = extractor.extract(&text).await?;

    if graph.is_empty() {
        eprintln!("{}", formatter.warning(EMPTY_GRAPH_WARNING));
    } else if let Some(path) = &args.output {
        write_export(path, &serde_json::to_string_pretty(&graph)?)?;
        eprintln!(
            "{}",
            formatter.success(&format!("Knowledge graph written to {}", path.display()))
        );
    }

    let view = GraphView::from_graph(&graph, settings.show_isolated || args.show_isolated);
    println!("{}", formatter.format_graph(&graph, &view)?);
    Ok(())
}
