//! Podcall Core
//!
//! Core types shared by the podcall client and CLI.
//!
//! This crate contains:
//! - Domain types: the job lifecycle entities (request, handle, status, result)
//! - DTOs: the wire shapes exchanged with the remote job endpoint

pub mod domain;
pub mod dto;
