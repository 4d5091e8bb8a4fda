use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use plugboard::kernel::config::{PlugboardConfig, load_settings};
use plugboard_demo::{general_usage, provider, run_with_settings};
use plugboard_logger::{LevelFilter, Logger};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "plugboard-demo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Walks through driver registries over a demo storage catalog")]
struct Cli {
    /// Configuration file (`plugboard.toml` style); defaults are used when omitted.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Configure registries by attribute, by contract and by both
    Usage,
    /// Apply the `[drivers]` section of the configuration and build every enabled driver
    Apply,
    /// Tell whether a type qualifies as a driver under the configured identification
    Supports { type_name: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_settings(Some(path)).context("Critical: Configuration is malformed")?,
        None => PlugboardConfig::default(),
    };

    let level = config.log.level.parse::<LevelFilter>().context("Invalid log level")?;
    let mut logger = Logger::builder().name(env!("CARGO_PKG_NAME")).level(level).json(config.log.json);
    if let Some(filter) = &config.log.filter {
        logger = logger.env_filter(filter);
    }
    let _log = logger.init()?;

    let provider = provider()?;

    match cli.command.unwrap_or(Command::Usage) {
        Command::Usage => {
            for report in general_usage(&provider)? {
                info!(label = report.label, built = ?report.built, "Registry walkthrough");
            }
        },
        Command::Apply => {
            let built = run_with_settings(&provider, &config.drivers)?;
            info!(count = built.len(), "All enabled drivers built");
        },
        Command::Supports { type_name } => {
            let registry = provider.create_with(&config.drivers).context("Invalid driver settings")?;
            let supported = registry.supports(&type_name)?;
            info!(type_name = %type_name, supported, "Driver support");
        },
    }

    Ok(())
}
