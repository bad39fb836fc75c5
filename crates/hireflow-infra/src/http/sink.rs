//! HttpSubmissionSink -- concrete [`SubmissionSink`] posting to the REST backend.
//!
//! JSON payloads go out as the request body. Multipart payloads send every
//! body value as a text part (non-string values JSON-encoded) plus one file
//! part per attachment; attachment bytes are read once, here.
//!
//! The bearer token is read from the shared [`SessionContext`] at send time
//! and only exposed while building the `Authorization` header.

use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use secrecy::ExposeSecret;

use hireflow_core::session::SessionContext;
use hireflow_core::sink::SubmissionSink;
use hireflow_types::config::ClientConfig;
use hireflow_types::error::SinkError;
use hireflow_types::submission::{PayloadEncoding, SubmissionPayload, SubmissionResponse};

use super::{build_client, endpoint_url, error_message};

pub struct HttpSubmissionSink {
    client: reqwest::Client,
    base_url: String,
    session: SessionContext,
}

impl HttpSubmissionSink {
    pub fn new(config: &ClientConfig, session: SessionContext) -> Result<Self, SinkError> {
        let client = build_client(config).map_err(|e| SinkError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, config.api_base_url.clone(), session))
    }

    pub fn with_client(client: reqwest::Client, base_url: String, session: SessionContext) -> Self {
        Self {
            client,
            base_url,
            session,
        }
    }
}

async fn build_form(payload: &SubmissionPayload) -> Result<Form, SinkError> {
    let mut form = Form::new();

    for (key, value) in &payload.body {
        let text = match value {
            serde_json::Value::Null => continue,
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        form = form.text(key.clone(), text);
    }

    for attachment in &payload.attachments {
        let file = &attachment.file;
        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|e| SinkError::Attachment {
                path: file.path.clone(),
                message: e.to_string(),
            })?;
        let part = Part::bytes(bytes)
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| SinkError::Attachment {
                path: file.path.clone(),
                message: e.to_string(),
            })?;
        form = form.part(attachment.name.clone(), part);
    }

    Ok(form)
}

/// Interpret a 2xx body: the response envelope, or any other JSON as `data`.
fn decode_success(body: &str) -> Result<SubmissionResponse, SinkError> {
    if body.trim().is_empty() {
        return Ok(SubmissionResponse::ok(None));
    }
    if let Ok(response) = serde_json::from_str::<SubmissionResponse>(body) {
        return Ok(response);
    }
    serde_json::from_str::<serde_json::Value>(body)
        .map(|data| SubmissionResponse::ok(Some(data)))
        .map_err(|e| SinkError::Decode(e.to_string()))
}

impl SubmissionSink for HttpSubmissionSink {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmissionResponse, SinkError> {
        let url = endpoint_url(&self.base_url, &payload.endpoint);
        let mut request = self.client.post(&url);

        if payload.authenticated {
            let token = self.session.token().ok_or(SinkError::Unauthenticated)?;
            request = request.bearer_auth(token.expose_secret());
        }

        request = match payload.encoding {
            PayloadEncoding::Json => request.json(&payload.body),
            PayloadEncoding::Multipart => request.multipart(build_form(payload).await?),
        };

        tracing::debug!(
            wizard = %payload.kind,
            %url,
            attachments = payload.attachments.len(),
            "posting submission"
        );

        let response = request
            .send()
            .await
            .map_err(|e| SinkError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SinkError::Transport(e.to_string()))?;

        if status.is_success() {
            return decode_success(&body);
        }

        tracing::debug!(wizard = %payload.kind, status = status.as_u16(), "backend refused submission");
        if status == StatusCode::UNAUTHORIZED {
            return Err(SinkError::Unauthenticated);
        }
        match error_message(&body) {
            Some(message) => Ok(SubmissionResponse::rejected(message)),
            None => Err(SinkError::Status {
                status: status.as_u16(),
                message: body,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::Multipart;
    use axum::http::{HeaderMap, StatusCode as AxumStatus, header::AUTHORIZATION};
    use axum::routing::post;
    use axum::{Json, Router};
    use secrecy::SecretString;
    use serde_json::{Value, json};

    use hireflow_core::session::Session;
    use hireflow_types::field::FileRef;
    use hireflow_types::submission::Attachment;
    use hireflow_types::wizard::WizardKind;

    use super::*;
    use crate::http::test_server;

    async fn echo_json(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
        let auth = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Json(json!({ "success": true, "data": { "auth": auth, "body": body } }))
    }

    async fn echo_multipart(mut multipart: Multipart) -> Json<Value> {
        let mut parts = serde_json::Map::new();
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let bytes = field.bytes().await.unwrap();
            parts.insert(
                name,
                json!({
                    "file_name": file_name,
                    "text": String::from_utf8_lossy(&bytes),
                }),
            );
        }
        Json(json!({ "success": true, "data": parts }))
    }

    async fn mock_backend() -> String {
        let router = Router::new()
            .route("/api/jobs", post(echo_json))
            .route("/api/profile/complete", post(echo_multipart))
            .route(
                "/api/rejects",
                post(|| async {
                    (
                        AxumStatus::UNPROCESSABLE_ENTITY,
                        Json(json!({ "success": false, "message": "Title already used" })),
                    )
                }),
            )
            .route(
                "/api/unauthorized",
                post(|| async { (AxumStatus::UNAUTHORIZED, "token expired") }),
            )
            .route(
                "/api/broken",
                post(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .route("/api/bare", post(|| async { Json(json!({ "id": 7 })) }));
        test_server::spawn(router).await
    }

    fn signed_in() -> SessionContext {
        SessionContext::fixed(Session::signed_in(
            SecretString::from("tok-123"),
            "ada@example.com",
            None,
            false,
        ))
    }

    fn sink(base_url: String, session: SessionContext) -> HttpSubmissionSink {
        let config = ClientConfig {
            api_base_url: base_url,
            request_timeout_secs: 5,
            enable_otel: false,
        };
        HttpSubmissionSink::new(&config, session).unwrap()
    }

    fn json_payload(endpoint: &str, authenticated: bool) -> SubmissionPayload {
        let mut body = serde_json::Map::new();
        body.insert("title".into(), json!("Engineer"));
        body.insert("skills".into(), json!(["Rust", "SQL"]));
        SubmissionPayload {
            kind: WizardKind::JobPosting,
            endpoint: endpoint.to_string(),
            encoding: PayloadEncoding::Json,
            body,
            attachments: Vec::new(),
            authenticated,
        }
    }

    #[tokio::test]
    async fn test_json_submission_carries_bearer() {
        let sink = sink(mock_backend().await, signed_in());
        let response = sink.submit(&json_payload("/jobs", true)).await.unwrap();

        assert!(response.success);
        let data = response.data.unwrap();
        assert_eq!(data["auth"], json!("Bearer tok-123"));
        assert_eq!(data["body"]["title"], json!("Engineer"));
        assert_eq!(data["body"]["skills"], json!(["Rust", "SQL"]));
    }

    #[tokio::test]
    async fn test_unauthenticated_payload_sends_no_header() {
        let sink = sink(mock_backend().await, SessionContext::anonymous());
        let response = sink.submit(&json_payload("/jobs", false)).await.unwrap();
        assert_eq!(response.data.unwrap()["auth"], Value::Null);
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_sending() {
        let sink = sink(mock_backend().await, SessionContext::anonymous());
        let err = sink.submit(&json_payload("/jobs", true)).await.unwrap_err();
        assert!(matches!(err, SinkError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_multipart_sends_text_and_file_parts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.pdf");
        tokio::fs::write(&path, b"%PDF resume").await.unwrap();

        let mut body = serde_json::Map::new();
        body.insert("headline".into(), json!("Backend engineer"));
        body.insert("skills".into(), json!(["Rust"]));
        body.insert("openToRemote".into(), json!(true));
        let payload = SubmissionPayload {
            kind: WizardKind::ProfileCompletion,
            endpoint: "/profile/complete".into(),
            encoding: PayloadEncoding::Multipart,
            body,
            attachments: vec![Attachment {
                name: "resume".into(),
                file: FileRef {
                    path: path.display().to_string(),
                    file_name: "cv.pdf".into(),
                    size_bytes: 11,
                    content_type: "application/pdf".into(),
                },
            }],
            authenticated: true,
        };

        let sink = sink(mock_backend().await, signed_in());
        let data = sink.submit(&payload).await.unwrap().data.unwrap();

        assert_eq!(data["headline"]["text"], json!("Backend engineer"));
        assert_eq!(data["skills"]["text"], json!(r#"["Rust"]"#));
        assert_eq!(data["openToRemote"]["text"], json!("true"));
        assert_eq!(data["resume"]["file_name"], json!("cv.pdf"));
        assert_eq!(data["resume"]["text"], json!("%PDF resume"));
    }

    #[tokio::test]
    async fn test_unreadable_attachment_is_reported() {
        let mut payload = json_payload("/profile/complete", true);
        payload.encoding = PayloadEncoding::Multipart;
        payload.attachments.push(Attachment {
            name: "resume".into(),
            file: FileRef {
                path: "/definitely/not/here.pdf".into(),
                file_name: "here.pdf".into(),
                size_bytes: 1,
                content_type: "application/pdf".into(),
            },
        });

        let sink = sink(mock_backend().await, signed_in());
        let err = sink.submit(&payload).await.unwrap_err();
        assert!(matches!(err, SinkError::Attachment { .. }));
    }

    #[tokio::test]
    async fn test_error_status_with_message_is_rejection() {
        let sink = sink(mock_backend().await, signed_in());
        let response = sink.submit(&json_payload("/rejects", true)).await.unwrap();
        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("Title already used"));
    }

    #[tokio::test]
    async fn test_error_statuses_without_message() {
        let sink = sink(mock_backend().await, signed_in());

        let err = sink.submit(&json_payload("/unauthorized", true)).await.unwrap_err();
        assert!(matches!(err, SinkError::Unauthenticated));

        let err = sink.submit(&json_payload("/broken", true)).await.unwrap_err();
        assert!(matches!(err, SinkError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_bare_success_body_becomes_data() {
        let sink = sink(mock_backend().await, signed_in());
        let response = sink.submit(&json_payload("/bare", true)).await.unwrap();
        assert!(response.success);
        assert_eq!(response.data, Some(json!({ "id": 7 })));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let sink = sink("http://127.0.0.1:1/api".to_string(), signed_in());
        let err = sink.submit(&json_payload("/jobs", true)).await.unwrap_err();
        assert!(matches!(err, SinkError::Transport(_)));
    }

    #[test]
    fn test_decode_success_variants() {
        assert!(decode_success("").unwrap().success);
        let resp = decode_success(r#"{"success":false,"message":"nope"}"#).unwrap();
        assert!(!resp.success);
        assert!(matches!(decode_success("not json"), Err(SinkError::Decode(_))));
    }
}
