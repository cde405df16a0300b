//! Summarize command implementation.

use super::{read_input, write_export};
use crate::cli::SummarizeArgs;
use crate::error::Result;
use crate::output::Formatter;
use nodus_extractor::Extractor;
use nodus_llm::LlmProvider;

/// Execute the summarize command.
pub async fn execute_summarize<L: LlmProvider>(
    args: SummarizeArgs,
    extractor: &Extractor<L>,
    formatter: &Formatter,
) -> Result<()> {
    let text = read_input(&args.input)?;
    let summary = extractor.summarize(&text).await?;

    if let Some(path) = &args.summary_out {
        write_export(path, &summary.to_plain_text())?;
        eprintln!(
            "{}",
            formatter.success(&format!("Summary written to {}", path.display()))
        );
    }

    println!("{}", formatter.format_summary(&summary)?);
    Ok(())
}
