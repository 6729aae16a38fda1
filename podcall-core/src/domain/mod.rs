//! Core domain types
//!
//! This module contains the job lifecycle structures used by the client
//! (to interpret endpoint responses) and the CLI (to render them).

pub mod job;
