//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Nodus CLI - Turn free text into an executive summary and a knowledge graph.
#[derive(Debug, Parser)]
#[command(name = "nodus")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.nodus/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Gemini model to use
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Increase log verbosity (-v for debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (node ids or plain text only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summarize text, then extract a knowledge graph
    Extract(ExtractArgs),

    /// Produce an executive summary only
    Summarize(SummarizeArgs),

    /// Extract a knowledge graph directly from the text
    Graph(GraphArgs),

    /// List the supported Gemini models
    Models,

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Input file, or `-` for stdin
    #[arg(default_value = "-")]
    pub input: String,

    /// Build the graph from the original text instead of the summary
    #[arg(long)]
    pub raw_graph: bool,

    /// Write the knowledge graph as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the summary as plain text to this file
    #[arg(long)]
    pub summary_out: Option<PathBuf>,

    /// Keep nodes that have no relationships
    #[arg(long)]
    pub show_isolated: bool,
}

/// Arguments for the summarize command.
#[derive(Debug, Parser)]
pub struct SummarizeArgs {
    /// Input file, or `-` for stdin
    #[arg(default_value = "-")]
    pub input: String,

    /// Write the summary as plain text to this file
    #[arg(long)]
    pub summary_out: Option<PathBuf>,
}

/// Arguments for the graph command.
#[derive(Debug, Parser)]
pub struct GraphArgs {
    /// Input file, or `-` for stdin
    #[arg(default_value = "-")]
    pub input: String,

    /// Write the knowledge graph as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Keep nodes that have no relationships
    #[arg(long)]
    pub show_isolated: bool,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
