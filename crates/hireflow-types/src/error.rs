use thiserror::Error;

/// Errors from store operations (used by trait definitions in hireflow-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors raised by a submission sink.
///
/// The wizard engine treats every variant like a `success: false` response.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected response (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("failed to read attachment '{path}': {message}")]
    Attachment { path: String, message: String },

    #[error("not authenticated")]
    Unauthenticated,
}

/// Misuse of the wizard engine.
///
/// Validation failures are never errors; they are returned as values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("field '{field}' expects a {expected} value")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },

    #[error("'{value}' is not an option for '{field}'")]
    InvalidChoice { field: String, value: String },

    #[error("submit is only available on the last step (currently {step} of {total})")]
    NotAtFinalStep { step: u8, total: u8 },

    #[error("a submission is already in flight")]
    SubmissionInFlight,

    #[error("this wizard has already been submitted")]
    AlreadyCompleted,

    #[error("sign in before submitting")]
    Unauthenticated,
}

/// Errors from the account flows (login, password reset).
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    Invalid(String),

    #[error("rejected by backend: {0}")]
    Rejected(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("failed to decode response: {0}")]
    Decode(String),
}
