//! Wizard engine and the traits it consumes.
//!
//! This crate holds every piece of wizard logic: field validators, the
//! array-field editor, declarative wizard definitions with their rule sets,
//! and the engine that drives a draft from step 1 to submission. It defines
//! the "ports" (`DraftStore`, `SubmissionSink`) that `hireflow-infra`
//! implements and never depends on any database or HTTP crate.

pub mod array_field;
pub mod definition;
pub mod draft_store;
pub mod engine;
pub mod session;
pub mod sink;
pub mod validate;
