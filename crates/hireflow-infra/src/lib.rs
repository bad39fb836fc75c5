//! Infrastructure layer for Hireflow.
//!
//! Implements the traits defined in `hireflow-core`: SQLite draft and session
//! storage, the reqwest-backed submission sink and auth client, config
//! loading and data-directory resolution.

pub mod config;
pub mod filesystem;
pub mod http;
pub mod sqlite;
