//! Job domain types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A unit of work to submit to the remote endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequest {
    pub prompt: String,
}

impl JobRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Opaque identifier assigned by the endpoint to an asynchronous job
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobHandle {
    pub id: String,
}

impl JobHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl std::fmt::Display for JobHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}

/// Job status as reported by the endpoint
///
/// Only `Completed` and `Failed` are terminal. Any status string the client
/// does not recognize is kept in `Unknown` and treated as still in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
    Failed,
    Unknown(String),
}

impl JobStatus {
    /// Parses the endpoint's `status` string (`IN_QUEUE`, `IN_PROGRESS`, ...)
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "IN_QUEUE" => JobStatus::Queued,
            "IN_PROGRESS" => JobStatus::Running,
            "COMPLETED" => JobStatus::Completed,
            "FAILED" => JobStatus::Failed,
            other => JobStatus::Unknown(other.to_string()),
        }
    }

    /// Reads the `status` field of a response body.
    ///
    /// A missing or non-string field yields `Unknown("")`.
    pub fn from_body(body: &Value) -> Self {
        match body.get("status").and_then(Value::as_str) {
            Some(raw) => Self::from_wire(raw),
            None => JobStatus::Unknown(String::new()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Queued => f.write_str("IN_QUEUE"),
            JobStatus::Running => f.write_str("IN_PROGRESS"),
            JobStatus::Completed => f.write_str("COMPLETED"),
            JobStatus::Failed => f.write_str("FAILED"),
            JobStatus::Unknown(raw) if raw.is_empty() => f.write_str("UNKNOWN"),
            JobStatus::Unknown(raw) => f.write_str(raw),
        }
    }
}

/// Result of a job as returned by the endpoint
///
/// `raw` is the response body verbatim; `status` and `output` are views
/// into it.
#[derive(Debug, Clone, PartialEq)]
pub struct JobResult {
    pub status: JobStatus,
    pub output: Option<String>,
    pub raw: Value,
}

impl JobResult {
    /// Builds a result from a response body without altering it
    pub fn from_body(raw: Value) -> Self {
        let status = JobStatus::from_body(&raw);
        let output = raw.get("output").and_then(render_output);
        Self {
            status,
            output,
            raw,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// String outputs are taken as-is, anything else is rendered as compact JSON.
fn render_output(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// What the endpoint did with a submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The endpoint accepted the job and will run it asynchronously
    Queued(JobHandle),
    /// The endpoint answered synchronously with the final body
    Immediate(JobResult),
}
