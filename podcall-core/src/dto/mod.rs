//! Data Transfer Objects for the remote job endpoint
//!
//! DTOs mirror the JSON bodies sent to the endpoint. Responses are kept as
//! raw `serde_json::Value` and interpreted by the domain layer, since the
//! endpoint attaches arbitrary fields alongside the ones we read.

pub mod job;
