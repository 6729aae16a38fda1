//! Error types for the podcall client

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while submitting or waiting for a job
///
/// None of these are retried by the client; each one ends the operation
/// that produced it.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Credential or endpoint identifier missing or still a placeholder
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The run call failed at the transport level or was rejected
    #[error("Failed to submit job: {0}")]
    Submission(#[source] RequestFailure),

    /// A status poll failed at the transport level or was rejected
    #[error("Failed to check status of job {job_id}: {source}")]
    StatusQuery {
        job_id: String,
        #[source]
        source: RequestFailure,
    },

    /// The endpoint reported the job as failed
    #[error("Job{} failed on the endpoint", job_suffix(.job_id))]
    JobFailed {
        /// `None` when the failure came back synchronously from the run call
        job_id: Option<String>,
        /// Full response body, for diagnostics
        payload: Value,
    },

    /// No terminal status was observed within the wait budget
    #[error(
        "Timed out after {}s waiting for job {job_id} (limit {}s)",
        .elapsed.as_secs(),
        .max_wait.as_secs()
    )]
    Timeout {
        job_id: String,
        elapsed: Duration,
        max_wait: Duration,
    },

    /// A 2xx response whose body has neither a job id nor a result shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

fn job_suffix(job_id: &Option<String>) -> String {
    job_id.as_deref().map(|id| format!(" {}", id)).unwrap_or_default()
}

impl ClientError {
    /// HTTP status code of the rejected request, if the endpoint answered
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Submission(failure) | Self::StatusQuery { source: failure, .. } => {
                failure.status_code()
            }
            _ => None,
        }
    }

    /// Check if the endpoint rejected the request with a 4xx status
    pub fn is_client_error(&self) -> bool {
        matches!(self.status_code(), Some(status) if (400..500).contains(&status))
    }

    /// Check if the endpoint rejected the request with a 5xx status
    pub fn is_server_error(&self) -> bool {
        matches!(self.status_code(), Some(status) if status >= 500)
    }

    /// Check if the request never got an HTTP answer
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            Self::Submission(RequestFailure::Transport(_))
                | Self::StatusQuery {
                    source: RequestFailure::Transport(_),
                    ..
                }
        )
    }
}

/// Why a single HTTP exchange with the endpoint failed
#[derive(Debug, Error)]
pub enum RequestFailure {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint returned a non-2xx status code
    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: ErrorBody },

    /// 2xx response whose body was not JSON
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl RequestFailure {
    /// Create an API error, keeping the body as JSON when it parses
    pub fn api(status: u16, text: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: ErrorBody::parse(text.into()),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }

    pub fn body(&self) -> Option<&ErrorBody> {
        match self {
            Self::Api { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Error body returned by the endpoint, parsed on a best-effort basis
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    Json(Value),
    Text(String),
}

impl ErrorBody {
    pub fn parse(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text),
        }
    }

    /// Pretty-printed form for terminal output
    pub fn to_pretty(&self) -> String {
        match self {
            Self::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Self::Text(text) => text.clone(),
        }
    }
}

impl std::fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{}", value),
            Self::Text(text) if text.is_empty() => f.write_str("<empty body>"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_error_parses_json_body() {
        let failure = RequestFailure::api(401, r#"{"error":"Unauthorized"}"#);
        assert_eq!(failure.status_code(), Some(401));
        assert_eq!(
            failure.body(),
            Some(&ErrorBody::Json(json!({ "error": "Unauthorized" })))
        );
    }

    #[test]
    fn test_api_error_keeps_raw_text() {
        let failure = RequestFailure::api(502, "Bad Gateway");
        assert_eq!(
            failure.body(),
            Some(&ErrorBody::Text("Bad Gateway".to_string()))
        );
        assert_eq!(failure.to_string(), "API error (status 502): Bad Gateway");
    }

    #[test]
    fn test_status_classification() {
        let unauthorized = ClientError::Submission(RequestFailure::api(401, ""));
        assert!(unauthorized.is_client_error());
        assert!(!unauthorized.is_server_error());

        let unavailable = ClientError::StatusQuery {
            job_id: "abc".to_string(),
            source: RequestFailure::api(503, ""),
        };
        assert!(unavailable.is_server_error());
        assert_eq!(unavailable.status_code(), Some(503));

        let timeout = ClientError::Timeout {
            job_id: "abc".to_string(),
            elapsed: Duration::from_secs(4),
            max_wait: Duration::from_secs(4),
        };
        assert_eq!(timeout.status_code(), None);
        assert!(!timeout.is_transport_error());
    }

    #[test]
    fn test_job_failed_message() {
        let queued = ClientError::JobFailed {
            job_id: Some("abc".to_string()),
            payload: json!({}),
        };
        assert_eq!(queued.to_string(), "Job abc failed on the endpoint");

        let immediate = ClientError::JobFailed {
            job_id: None,
            payload: json!({}),
        };
        assert_eq!(immediate.to_string(), "Job failed on the endpoint");
    }
}
