//! Submission sink trait.
//!
//! The backend endpoint that durably stores a finished wizard. The engine
//! never talks HTTP itself; `hireflow-infra` provides the reqwest-backed
//! implementation and tests use counting mocks.

use std::future::Future;

use hireflow_types::error::SinkError;
use hireflow_types::submission::{SubmissionPayload, SubmissionResponse};

/// Receives finished wizard payloads.
///
/// `Ok` with `success: false` and `Err` are both submission failures; the
/// engine treats them identically apart from where the banner text comes
/// from. Implementations that need credentials read them from the
/// `SessionContext` they were built with when `payload.authenticated` is set.
pub trait SubmissionSink: Send + Sync {
    fn submit(
        &self,
        payload: &SubmissionPayload,
    ) -> impl Future<Output = Result<SubmissionResponse, SinkError>> + Send;
}
