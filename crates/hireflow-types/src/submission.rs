//! Submission payloads and the sink's response contract.

use serde::{Deserialize, Serialize};

use crate::field::FileRef;
use crate::wizard::WizardKind;

/// How a payload travels to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadEncoding {
    Json,
    Multipart,
}

/// A file to upload alongside the body, under the given wire name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub file: FileRef,
}

/// A compacted, wire-ready wizard submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub kind: WizardKind,
    /// Path relative to the backend base URL, e.g. `/jobs`.
    pub endpoint: String,
    pub encoding: PayloadEncoding,
    pub body: serde_json::Map<String, serde_json::Value>,
    pub attachments: Vec<Attachment>,
    /// Whether the request carries the session bearer credential.
    pub authenticated: bool,
}

/// What the backend answered.
///
/// `success: false` is handled exactly like a transport failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl SubmissionResponse {
    pub fn ok(data: Option<serde_json::Value>) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_tolerates_missing_optionals() {
        let resp: SubmissionResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(resp.success);
        assert!(resp.message.is_none());
        assert!(resp.data.is_none());
    }

    #[test]
    fn test_rejected_carries_message() {
        let resp = SubmissionResponse::rejected("Title already used");
        assert!(!resp.success);
        assert_eq!(resp.message.as_deref(), Some("Title already used"));
    }
}
