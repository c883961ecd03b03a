//! CLI command definitions.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Feed a webhook payload through the matcher and print the queued builds
    Replay {
        /// Payload file, or `-` for stdin
        payload: String,

        /// Event type header value
        #[arg(short, long, default_value = "push")]
        event: String,

        /// Job catalog
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// List every job with its push binding and remote URLs
    Urls {
        /// Job catalog
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// Print the normalized form of a repository URL
    Normalize {
        url: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
}
