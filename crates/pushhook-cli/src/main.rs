//! pushhook CLI entrypoint.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod handlers;

use commands::{Commands, ConfigCommands};
use config::HookConfig;

#[derive(Parser)]
#[command(name = "pushhook")]
#[command(author, version, about = "Match push webhooks to the jobs built from them", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = HookConfig::load(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Replay {
            payload,
            event,
            catalog,
        } => handlers::replay(&config, &payload, &event, catalog.as_deref()).await?,
        Commands::Urls { catalog } => handlers::urls(&config, catalog.as_deref())?,
        Commands::Normalize { url } => handlers::normalize(&url),
        Commands::Config { command } => match command {
            ConfigCommands::Show => handlers::show_config(&config, cli.config.as_deref())?,
        },
    }

    Ok(())
}
