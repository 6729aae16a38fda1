//! Job-related endpoint calls

use async_trait::async_trait;
use podcall_core::domain::job::{JobHandle, JobRequest, JobResult, JobStatus, SubmitOutcome};
use podcall_core::dto::job::RunRequest;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use crate::EndpointClient;
use crate::backend::JobBackend;
use crate::error::{ClientError, RequestFailure, Result};
use crate::poller::PollProgress;

#[async_trait]
impl JobBackend for EndpointClient {
    async fn run(&self, request: &JobRequest) -> std::result::Result<Value, RequestFailure> {
        let url = self.run_url();
        debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&RunRequest::from(request))
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn status(&self, handle: &JobHandle) -> std::result::Result<Value, RequestFailure> {
        let url = self.status_url(handle);
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        self.handle_response(response).await
    }
}

impl EndpointClient {
    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Submit a prompt to the endpoint
    ///
    /// Issues exactly one run call and never polls.
    ///
    /// # Returns
    /// A handle when the endpoint queued the job, or the response body when
    /// it answered synchronously
    ///
    /// # Example
    /// ```no_run
    /// # use podcall_client::{EndpointClient, EndpointConfig, SubmitOutcome};
    /// # use std::time::Duration;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = EndpointClient::new(EndpointConfig::new("https://api.runpod.ai/v2/abc", "key"))?;
    /// match client.submit("Hello GPU!").await? {
    ///     SubmitOutcome::Queued(handle) => {
    ///         let result = client.wait(&handle, Duration::from_secs(60)).await?;
    ///         println!("{:?}", result.output);
    ///     }
    ///     SubmitOutcome::Immediate(result) => println!("{:?}", result.output),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn submit(&self, prompt: impl Into<String>) -> Result<SubmitOutcome> {
        submit_job(self, &JobRequest::new(prompt)).await
    }

    /// Wait for a queued job to reach a terminal state
    ///
    /// # Arguments
    /// * `handle` - The handle returned by [`EndpointClient::submit`]
    /// * `max_wait` - Wall-clock budget measured from this call
    pub async fn wait(&self, handle: &JobHandle, max_wait: Duration) -> Result<JobResult> {
        self.poller().wait(handle, max_wait).await
    }

    /// Like [`EndpointClient::wait`], reporting progress after every
    /// non-terminal poll
    pub async fn wait_with_progress<F>(
        &self,
        handle: &JobHandle,
        max_wait: Duration,
        on_progress: F,
    ) -> Result<JobResult>
    where
        F: FnMut(&PollProgress) + Send,
    {
        self.poller()
            .wait_with_progress(handle, max_wait, on_progress)
            .await
    }

    /// Submit a prompt and wait for its result
    ///
    /// A synchronous answer is returned without polling, unless it reports
    /// `FAILED`, in which case it surfaces as [`ClientError::JobFailed`].
    pub async fn send(&self, prompt: impl Into<String>, max_wait: Duration) -> Result<JobResult> {
        self.send_with_progress(prompt, max_wait, |_| {}).await
    }

    /// Like [`EndpointClient::send`], reporting progress while waiting
    pub async fn send_with_progress<F>(
        &self,
        prompt: impl Into<String>,
        max_wait: Duration,
        on_progress: F,
    ) -> Result<JobResult>
    where
        F: FnMut(&PollProgress) + Send,
    {
        match self.submit(prompt).await? {
            SubmitOutcome::Queued(handle) => {
                self.wait_with_progress(&handle, max_wait, on_progress)
                    .await
            }
            SubmitOutcome::Immediate(result) if result.status == JobStatus::Failed => {
                Err(ClientError::JobFailed {
                    job_id: None,
                    payload: result.raw,
                })
            }
            SubmitOutcome::Immediate(result) => Ok(result),
        }
    }
}

/// Submit a job through any backend and interpret the reply
pub async fn submit_job<B>(backend: &B, request: &JobRequest) -> Result<SubmitOutcome>
where
    B: JobBackend + ?Sized,
{
    let body = backend
        .run(request)
        .await
        .map_err(ClientError::Submission)?;

    let outcome = interpret_submission(body)?;
    match &outcome {
        SubmitOutcome::Queued(handle) => info!("Job {} queued", handle),
        SubmitOutcome::Immediate(result) => {
            info!("Endpoint answered synchronously ({})", result.status)
        }
    }
    Ok(outcome)
}

/// Decides between a queued job and a synchronous answer
///
/// An `id` field means the job was queued. Without one the body must look
/// like a result (a `status` or `output` field) that is not still queued or
/// running; anything else is rejected instead of being passed on as a
/// result.
fn interpret_submission(body: Value) -> Result<SubmitOutcome> {
    let Some(fields) = body.as_object() else {
        return Err(ClientError::MalformedResponse(format!(
            "expected a JSON object from the run endpoint, got {}",
            body
        )));
    };

    if let Some(id) = fields.get("id") {
        return match id.as_str() {
            Some(id) if !id.is_empty() => Ok(SubmitOutcome::Queued(JobHandle::new(id))),
            _ => Err(ClientError::MalformedResponse(format!(
                "job id must be a non-empty string, got {}",
                id
            ))),
        };
    }

    if fields.contains_key("status") || fields.contains_key("output") {
        let result = JobResult::from_body(body);
        // Still in flight but nothing to poll with.
        if matches!(result.status, JobStatus::Queued | JobStatus::Running) {
            return Err(ClientError::MalformedResponse(format!(
                "run response reports {} but carries no job id: {}",
                result.status, result.raw
            )));
        }
        return Ok(SubmitOutcome::Immediate(result));
    }

    Err(ClientError::MalformedResponse(format!(
        "run response has neither a job id nor a result: {}",
        body
    )))
}
