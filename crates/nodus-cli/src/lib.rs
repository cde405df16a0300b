//! Nodus CLI library.
//!
//! Command execution, configuration, graph views and output formatting for
//! the `nodus` binary. Commands are generic over the LLM provider so they run
//! against a mock in tests.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod view;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use view::GraphView;
