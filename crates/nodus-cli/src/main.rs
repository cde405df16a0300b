//! Nodus CLI - Turn free text into an executive summary and a knowledge graph.

use clap::Parser;
use nodus_cli::commands;
use nodus_cli::{Cli, Command, Config, Formatter};
use nodus_extractor::Extractor;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        error!("{}", e.detail());
        eprintln!("Error: {}", e.user_message());
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays clean for piping.
fn init_tracing(verbose: u8) {
    let filter = if verbose > 0 {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> nodus_cli::Result<()> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::path()?,
    };
    let mut config = Config::load_from(&config_path)?;

    // Override model if specified
    if let Some(model) = cli.model {
        config.extractor.model = model;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Models => {
            commands::execute_models(&config.extractor.model, &formatter)?;
        }
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter)?;
        }
        cmd => {
            // Commands that call the model
            let mut extractor =
                Extractor::from_config(config.extractor.clone(), cli.api_key.as_deref())?;

            let outcome = match cmd {
                Command::Extract(args) => {
                    commands::execute_extract(args, &extractor, &config.settings, &formatter)
                        .await
                }
                Command::Summarize(args) => {
                    commands::execute_summarize(args, &extractor, &formatter).await
                }
                Command::Graph(args) => {
                    commands::execute_graph(args, &extractor, &config.settings, &formatter).await
                }
                _ => unreachable!(),
            };

            extractor.close();
            outcome?;
        }
    }

    Ok(())
}
