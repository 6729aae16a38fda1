//! Scripted in-memory backend for unit tests

use async_trait::async_trait;
use podcall_core::domain::job::{JobHandle, JobRequest};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::backend::JobBackend;
use crate::error::RequestFailure;

/// One canned endpoint reply
#[derive(Debug, Clone)]
pub enum Reply {
    Body(Value),
    Status(u16, String),
}

impl Reply {
    pub fn body(value: Value) -> Self {
        Reply::Body(value)
    }

    pub fn status(code: u16, text: &str) -> Self {
        Reply::Status(code, text.to_string())
    }

    fn into_result(self) -> Result<Value, RequestFailure> {
        match self {
            Reply::Body(value) => Ok(value),
            Reply::Status(code, text) => Err(RequestFailure::api(code, text)),
        }
    }
}

/// Backend replaying a fixed script
///
/// Status replies are consumed in order; the last one repeats forever.
pub struct ScriptedBackend {
    run_reply: Reply,
    status_replies: Mutex<VecDeque<Reply>>,
    prompts: Mutex<Vec<String>>,
    run_calls: AtomicU32,
    status_calls: AtomicU32,
}

impl ScriptedBackend {
    pub fn new(run_reply: Reply, status_replies: Vec<Reply>) -> Self {
        Self {
            run_reply,
            status_replies: Mutex::new(status_replies.into()),
            prompts: Mutex::new(Vec::new()),
            run_calls: AtomicU32::new(0),
            status_calls: AtomicU32::new(0),
        }
    }

    /// A backend for poller tests; the run reply is never used
    pub fn polling(status_replies: Vec<Reply>) -> Self {
        Self::new(Reply::body(json!({ "id": "abc" })), status_replies)
    }

    pub fn run_calls(&self) -> u32 {
        self.run_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> u32 {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobBackend for ScriptedBackend {
    async fn run(&self, request: &JobRequest) -> Result<Value, RequestFailure> {
        self.run_calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(request.prompt.clone());
        self.run_reply.clone().into_result()
    }

    async fn status(&self, _handle: &JobHandle) -> Result<Value, RequestFailure> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let reply = {
            let mut replies = self.status_replies.lock().unwrap();
            if replies.len() > 1 {
                replies.pop_front()
            } else {
                replies.front().cloned()
            }
        };
        reply
            .unwrap_or_else(|| Reply::status(404, "no scripted status reply"))
            .into_result()
    }
}
