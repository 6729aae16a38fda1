//! Podcall CLI
//!
//! Command-line interface for sending prompts to a remote GPU job endpoint.

mod commands;
mod config;
mod report;

use clap::Parser;
use commands::{Commands, handle_command};
use config::{Config, DEFAULT_API_BASE};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Log filter used when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "podcall=warn,podcall_client=warn";

#[derive(Parser)]
#[command(name = "podcall")]
#[command(about = "Send prompts to a serverless GPU endpoint", long_about = None)]
struct Cli {
    /// API key, sent as a bearer credential
    #[arg(long, env = "PODCALL_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Serverless endpoint ID
    #[arg(long, env = "PODCALL_ENDPOINT_ID")]
    endpoint_id: Option<String>,

    /// API base URL
    #[arg(long, env = "PODCALL_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        api_key: cli.api_key,
        endpoint_id: cli.endpoint_id,
        api_base: cli.api_base,
    };

    match handle_command(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report::print_error(&e);
            ExitCode::FAILURE
        }
    }
}
