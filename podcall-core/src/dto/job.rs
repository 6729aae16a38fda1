//! Job DTOs for the remote endpoint

use serde::{Deserialize, Serialize};

use crate::domain::job::JobRequest;

/// Body of `POST {endpoint}/run`: `{"input": {"prompt": ...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    pub input: RunInput,
}

/// The `input` object handed to the remote handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunInput {
    pub prompt: String,
}

impl From<&JobRequest> for RunRequest {
    fn from(req: &JobRequest) -> Self {
        Self {
            input: RunInput {
                prompt: req.prompt.clone(),
            },
        }
    }
}
