//! Podcall HTTP Client
//!
//! Client for a remote asynchronous job endpoint: submit a prompt, then
//! poll the returned job until it completes, fails, or the wait budget
//! runs out.
//!
//! # Example
//!
//! ```no_run
//! use podcall_client::{EndpointClient, EndpointConfig};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = EndpointConfig::for_endpoint(
//!         "https://api.runpod.ai/v2",
//!         "my-endpoint-id",
//!         "my-api-key",
//!     );
//!     let client = EndpointClient::new(config)?;
//!
//!     let result = client.send("Hello GPU!", Duration::from_secs(60)).await?;
//!     println!("{}", result.output.unwrap_or_default());
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod error;
mod jobs;
pub mod poller;
#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use backend::JobBackend;
pub use error::{ClientError, ErrorBody, RequestFailure, Result};
pub use jobs::submit_job;
pub use podcall_core::domain::job::{JobHandle, JobRequest, JobResult, JobStatus, SubmitOutcome};
pub use poller::{DEFAULT_POLL_INTERVAL, PollProgress, Poller};

use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;

/// Connection settings for one remote endpoint
///
/// Read-only once the client is built.
#[derive(Clone)]
pub struct EndpointConfig {
    /// Base URL of the endpoint; `/run` and `/status/{id}` are appended
    pub base_url: String,
    /// Bearer credential attached to every request
    pub api_key: String,
}

impl EndpointConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Builds the base URL as `{api_base}/{endpoint_id}`
    pub fn for_endpoint(
        api_base: impl AsRef<str>,
        endpoint_id: impl AsRef<str>,
        api_key: impl Into<String>,
    ) -> Self {
        let base_url = format!(
            "{}/{}",
            api_base.as_ref().trim_end_matches('/'),
            endpoint_id.as_ref().trim_matches('/')
        );
        Self::new(base_url, api_key)
    }
}

// Keeps the key out of debug logs.
impl std::fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// HTTP client for a remote job endpoint
///
/// Implements [`JobBackend`] over reqwest and bundles the submit and wait
/// steps of the job lifecycle.
#[derive(Clone)]
pub struct EndpointClient {
    /// Base URL of the endpoint (e.g., "https://api.runpod.ai/v2/abc123")
    base_url: Url,
    /// Bearer credential
    api_key: String,
    /// HTTP client instance
    client: Client,
    /// Delay between status polls
    poll_interval: Duration,
}

impl EndpointClient {
    /// Create a new endpoint client
    ///
    /// Fails with [`ClientError::Configuration`] if the base URL is not an
    /// http(s) URL or the credential is empty.
    ///
    /// # Example
    /// ```
    /// use podcall_client::{EndpointClient, EndpointConfig};
    ///
    /// let config = EndpointConfig::new("https://api.runpod.ai/v2/abc123/", "key");
    /// let client = EndpointClient::new(config).unwrap();
    /// assert_eq!(client.base_url(), "https://api.runpod.ai/v2/abc123");
    /// ```
    pub fn new(config: EndpointConfig) -> Result<Self> {
        Self::with_client(config, Client::new())
    }

    /// Create a new endpoint client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(config: EndpointConfig, client: Client) -> Result<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ClientError::Configuration(
                "endpoint base URL cannot be empty".to_string(),
            ));
        }
        let base_url = Url::parse(base_url).map_err(|e| {
            ClientError::Configuration(format!("invalid endpoint base URL '{}': {}", base_url, e))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::Configuration(format!(
                "endpoint base URL must be http or https, got '{}'",
                base_url
            )));
        }
        if config.api_key.trim().is_empty() {
            return Err(ClientError::Configuration(
                "API key cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            api_key: config.api_key,
            client,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    /// Override the delay between status polls
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Get the base URL of the endpoint
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// A poller over this client using its configured interval
    pub fn poller(&self) -> Poller<'_, Self> {
        Poller::new(self).with_interval(self.poll_interval)
    }

    fn run_url(&self) -> Url {
        self.endpoint_url(&["run"])
    }

    /// The job id is pushed as a single percent-encoded path segment
    fn status_url(&self, handle: &JobHandle) -> Url {
        self.endpoint_url(&["status", &handle.id])
    }

    fn endpoint_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // http(s) URLs always have a path, checked in `with_client`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an endpoint response and decode its JSON body
    ///
    /// Non-2xx responses become [`RequestFailure::Api`] with the body
    /// parsed as JSON when possible, raw text otherwise.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> std::result::Result<Value, RequestFailure> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RequestFailure::api(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| RequestFailure::Decode(format!("Failed to parse JSON response: {}", e)))
    }
}

impl std::fmt::Debug for EndpointClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointClient")
            .field("base_url", &self.base_url.as_str())
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}
