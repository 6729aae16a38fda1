//! Status command handler
//!
//! Checks the local configuration without contacting the endpoint.

use anyhow::Result;
use colored::*;

use crate::config::Config;

/// Handle the status command
pub fn handle_status(config: &Config) -> Result<()> {
    let endpoint = config.endpoint_config()?;

    println!("{}", "✓ Configuration looks good!".green());
    println!("  Endpoint ID:  {}", config.endpoint_id().cyan());
    println!("  Endpoint URL: {}", endpoint.base_url.dimmed());
    println!("  API Key:      {}", config.masked_api_key());
    println!("\nYou can now send requests to your GPU endpoint!");

    Ok(())
}
