//! Shared domain types for Hireflow.
//!
//! This crate contains the types every layer agrees on: wizard kinds, field
//! values, drafts, submission payloads, session roles, client configuration,
//! and the error enums returned across crate boundaries.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod draft;
pub mod error;
pub mod field;
pub mod session;
pub mod submission;
pub mod wizard;
