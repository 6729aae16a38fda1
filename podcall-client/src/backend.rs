//! Transport seam between the job lifecycle and the remote endpoint

use async_trait::async_trait;
use podcall_core::domain::job::{JobHandle, JobRequest};
use serde_json::Value;

use crate::error::RequestFailure;

/// The two calls the job lifecycle needs from a remote endpoint
///
/// Implementations return the response body untouched; interpreting it
/// (handle vs. immediate result, terminal vs. in-flight) is left to the
/// submission and polling logic.
#[async_trait]
pub trait JobBackend: Send + Sync {
    /// Submits a job (`POST /run`)
    async fn run(&self, request: &JobRequest) -> Result<Value, RequestFailure>;

    /// Queries the status of a job (`GET /status/{id}`)
    ///
    /// Must not change the state of the remote job.
    async fn status(&self, handle: &JobHandle) -> Result<Value, RequestFailure>;
}
