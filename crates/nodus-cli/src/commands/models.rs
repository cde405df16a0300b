//! Models command implementation.

use crate::error::Result;
use crate::output::Formatter;
use nodus_llm::AVAILABLE_MODELS;

/// Execute the models command.
pub fn execute_models(selected: &str, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_models(&AVAILABLE_MODELS, selected)?);

    if !AVAILABLE_MODELS.contains(&selected) {
        eprintln!(
            "{}",
            formatter.warning(&format!(
                "Configured model '{}' is not in the supported list",
                selected
            ))
        );
    }
    Ok(())
}
