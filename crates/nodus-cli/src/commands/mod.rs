//! Command implementations.

pub mod config;
pub mod extract;
pub mod graph;
pub mod models;
pub mod summarize;

pub use self::config::execute_config;
pub use self::extract::execute_extract;
pub use self::graph::execute_graph;
pub use self::models::execute_models;
pub use self::summarize::execute_summarize;

use crate::error::{CliError, Result};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Read the input text from a file path, or stdin for `-`.
pub fn read_input(input: &str) -> Result<String> {
    let text = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)
            .map_err(|e| CliError::InvalidInput(format!("cannot read '{}': {}", input, e)))?
    };

    debug!("Read {} characters from {}", text.chars().count(), input);
    Ok(text)
}

/// Write an export file, creating parent directories.
pub fn write_export(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    info!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_input_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("input.txt");
        fs::write(&path, "Alice works at Acme.").unwrap();

        let text = read_input(path.to_str().unwrap()).unwrap();
        assert_eq!(text, "Alice works at Acme.");
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_input("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }

    #[test]
    fn test_write_export_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("graph.json");
        write_export(&path, "{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }
}
