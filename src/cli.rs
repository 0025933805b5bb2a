//! CLI module for Tally
//!
//! Provides commands:
//! - `serve`: start the bot, liveness server, and retention task (default)
//! - `sweep`: run one retention sweep and exit

use clap::{Parser, Subcommand};

/// Tally CLI
#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(about = "Habit-tracking Telegram bot")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the server (default)
    Serve,
    /// Run one retention sweep and exit
    Sweep,
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Sweep) => crate::server::run_sweep().await,
        Some(Commands::Serve) | None => crate::server::run().await,
    }
}
