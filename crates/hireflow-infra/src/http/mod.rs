//! REST backend access: the HTTP submission sink and the auth client.
//!
//! Both share a `reqwest::Client` built with the configured timeout and
//! resolve endpoints against `api_base_url`.

pub mod auth;
pub mod sink;

use std::time::Duration;

use hireflow_types::config::ClientConfig;

pub use auth::AuthClient;
pub use sink::HttpSubmissionSink;

/// Build the shared client with the configured per-request timeout.
pub fn build_client(config: &ClientConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs.max(1)))
        .user_agent(concat!("hflow/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Join a base URL and an endpoint path with exactly one slash.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// The `message` of a JSON error body, if there is a non-empty one.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
