//! Send command handler
//!
//! Submits a prompt, waits for the job to finish and prints the response.

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use podcall_client::{EndpointClient, JobResult, PollProgress};
use std::io::Write;
use std::time::Duration;

use crate::config::Config;

const RULE_WIDTH: usize = 60;
const BAR_WIDTH: usize = 24;

/// Arguments of the `send` command
#[derive(Args)]
pub struct SendArgs {
    /// Prompt to send
    pub prompt: String,

    /// Maximum time to wait for a response (seconds)
    #[arg(long, default_value_t = 60)]
    pub wait: u64,

    /// Print the full JSON response instead of just the output
    #[arg(long)]
    pub json_output: bool,
}

/// Handle the send command
pub async fn handle_send(args: SendArgs, config: &Config) -> Result<()> {
    let endpoint = config
        .endpoint_config()
        .context("Invalid endpoint configuration")?;
    let client = EndpointClient::new(endpoint).context("Invalid endpoint configuration")?;

    println!("{}{}", "📤 Sending to GPU: ".cyan(), args.prompt);

    let mut progress = ProgressLine::default();
    let result = client
        .send_with_progress(
            args.prompt.clone(),
            Duration::from_secs(args.wait),
            |p| progress.update(p),
        )
        .await;
    progress.finish();
    let result = result.context("Failed to get a response from the endpoint")?;

    let title = if args.json_output {
        "Full JSON Response:"
    } else {
        "✅ GPU Response:"
    };
    println!("\n{}", "=".repeat(RULE_WIDTH));
    println!("{}", title.green().bold());
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("{}", render_result(&result, args.json_output)?);

    println!("\n{}", "✓ Done!".green());

    Ok(())
}

/// Text shown for a finished job
///
/// The `output` field when present, otherwise (or with `--json-output`)
/// the whole body pretty-printed.
fn render_result(result: &JobResult, json_output: bool) -> Result<String> {
    match &result.output {
        Some(output) if !json_output => Ok(output.clone()),
        _ => Ok(serde_json::to_string_pretty(&result.raw)?),
    }
}

/// Single-line wait indicator redrawn on stderr
#[derive(Default)]
struct ProgressLine {
    drawn: bool,
}

impl ProgressLine {
    fn update(&mut self, progress: &PollProgress) {
        let mut stderr = std::io::stderr();
        let _ = write!(stderr, "\r{}", format_progress(progress).dimmed());
        let _ = stderr.flush();
        self.drawn = true;
    }

    fn finish(&mut self) {
        if self.drawn {
            eprintln!();
            self.drawn = false;
        }
    }
}

fn format_progress(progress: &PollProgress) -> String {
    let filled = (progress.fraction() * BAR_WIDTH as f64).round() as usize;
    format!(
        "Waiting for GPU response [{}{}] {:>3}s/{}s {}",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        progress.elapsed.as_secs(),
        progress.max_wait.as_secs(),
        progress.status,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use podcall_client::JobStatus;
    use serde_json::json;

    #[tokio::test]
    async fn test_missing_credentials_keep_client_error_under_context() {
        let args = SendArgs {
            prompt: "hi".to_string(),
            wait: 60,
            json_output: false,
        };
        let config = Config {
            api_key: None,
            endpoint_id: Some("abc123".to_string()),
            api_base: crate::config::DEFAULT_API_BASE.to_string(),
        };

        let err = handle_send(args, &config).await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid endpoint configuration");
        assert!(matches!(
            err.downcast_ref::<podcall_client::ClientError>(),
            Some(podcall_client::ClientError::Configuration(_))
        ));
    }

    #[test]
    fn test_render_prefers_output() {
        let result = JobResult::from_body(json!({
            "status": "COMPLETED",
            "output": "GPU Received your message: hi"
        }));
        assert_eq!(
            render_result(&result, false).unwrap(),
            "GPU Received your message: hi"
        );
    }

    #[test]
    fn test_render_json_output_prints_whole_body() {
        let body = json!({ "status": "COMPLETED", "output": "hi" });
        let result = JobResult::from_body(body.clone());
        assert_eq!(
            render_result(&result, true).unwrap(),
            serde_json::to_string_pretty(&body).unwrap()
        );
    }

    #[test]
    fn test_render_falls_back_to_body_without_output() {
        let body = json!({ "status": "COMPLETED", "id": "abc" });
        let result = JobResult::from_body(body.clone());
        assert_eq!(
            render_result(&result, false).unwrap(),
            serde_json::to_string_pretty(&body).unwrap()
        );
    }

    #[test]
    fn test_format_progress() {
        let line = format_progress(&PollProgress {
            elapsed: Duration::from_secs(30),
            max_wait: Duration::from_secs(60),
            polls: 15,
            status: JobStatus::Running,
        });
        assert_eq!(
            line,
            "Waiting for GPU response [############------------]  30s/60s IN_PROGRESS"
        );
    }
}
