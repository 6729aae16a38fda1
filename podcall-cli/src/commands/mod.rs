//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod examples;
mod send;
mod status;

pub use send::SendArgs;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Send a prompt to the endpoint and wait for the response
    Send(SendArgs),
    /// Check that the endpoint configuration is valid (no network call)
    Status,
    /// Show example commands
    Examples,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Send(args) => send::handle_send(args, config).await,
        Commands::Status => status::handle_status(config),
        Commands::Examples => {
            examples::print_examples();
            Ok(())
        }
    }
}
