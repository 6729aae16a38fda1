//! Job poller
//!
//! Resolves a job handle into a terminal result by querying the endpoint
//! at a fixed interval until the job completes, fails, or the wait budget
//! is spent.

use podcall_core::domain::job::{JobHandle, JobResult, JobStatus};
use std::time::Duration;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use crate::backend::JobBackend;
use crate::error::{ClientError, Result};

/// Delay between status queries while a job is in flight
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Snapshot reported after each non-terminal poll
#[derive(Debug, Clone, PartialEq)]
pub struct PollProgress {
    /// Time since the wait started
    pub elapsed: Duration,
    pub max_wait: Duration,
    /// Status queries issued so far
    pub polls: u32,
    /// Status reported by the latest query
    pub status: JobStatus,
}

impl PollProgress {
    /// Share of the wait budget used, in `0.0..=1.0`
    pub fn fraction(&self) -> f64 {
        if self.max_wait.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.max_wait.as_secs_f64()).min(1.0)
    }
}

/// Polls a single job until it reaches a terminal state
///
/// Queries are strictly sequential. Nothing is issued once a terminal
/// status has been seen or the budget has run out, and no failure is
/// retried.
pub struct Poller<'a, B: ?Sized> {
    backend: &'a B,
    interval: Duration,
}

impl<'a, B> Poller<'a, B>
where
    B: JobBackend + ?Sized,
{
    /// Creates a poller with the default 2 second interval
    pub fn new(backend: &'a B) -> Self {
        Self {
            backend,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits for the job behind `handle` to finish
    ///
    /// # Arguments
    /// * `handle` - The job to poll
    /// * `max_wait` - Wall-clock budget measured from this call
    ///
    /// # Returns
    /// The completed result, or `JobFailed`, `StatusQuery` or `Timeout`
    pub async fn wait(&self, handle: &JobHandle, max_wait: Duration) -> Result<JobResult> {
        self.wait_with_progress(handle, max_wait, |_| {}).await
    }

    /// Waits for the job, calling `on_progress` after every non-terminal poll
    ///
    /// The callback only observes; it cannot change when the next query is
    /// issued or when the wait gives up.
    pub async fn wait_with_progress<F>(
        &self,
        handle: &JobHandle,
        max_wait: Duration,
        mut on_progress: F,
    ) -> Result<JobResult>
    where
        F: FnMut(&PollProgress) + Send,
    {
        let started = Instant::now();
        let mut polls: u32 = 0;

        loop {
            let elapsed = started.elapsed();
            if elapsed >= max_wait {
                warn!(
                    "Gave up on job {} after {:?} ({} poll(s))",
                    handle, elapsed, polls
                );
                return Err(ClientError::Timeout {
                    job_id: handle.id.clone(),
                    elapsed,
                    max_wait,
                });
            }

            let body = self
                .backend
                .status(handle)
                .await
                .map_err(|source| ClientError::StatusQuery {
                    job_id: handle.id.clone(),
                    source,
                })?;
            polls += 1;

            let result = JobResult::from_body(body);
            if result.is_terminal() {
                return settle(handle, polls, result);
            }

            debug!(
                "Job {} is {}, polling again in {:?}",
                handle, result.status, self.interval
            );
            on_progress(&PollProgress {
                elapsed: started.elapsed(),
                max_wait,
                polls,
                status: result.status,
            });
            time::sleep(self.interval).await;
        }
    }
}

/// Outcome of a wait that observed a terminal status
fn settle(handle: &JobHandle, polls: u32, result: JobResult) -> Result<JobResult> {
    if result.status == JobStatus::Failed {
        warn!("Job {} failed on the endpoint", handle);
        return Err(ClientError::JobFailed {
            job_id: Some(handle.id.clone()),
            payload: result.raw,
        });
    }

    info!("Job {} completed after {} poll(s)", handle, polls);
    Ok(result)
}
