//! Shared domain types for SaDA.
//!
//! This crate contains the core domain types used across the SaDA service:
//! chat sessions and messages, document analyses, status checks, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod analysis;
pub mod chat;
pub mod config;
pub mod error;
pub mod status;
