//! Client configuration types for Hireflow.
//!
//! `ClientConfig` is the top-level `config.toml` controlling where the
//! backend lives and how requests behave.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Hireflow client.
///
/// Loaded from `~/.hireflow/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the job-board REST backend, without trailing slash.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout for submissions and auth calls.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[serde(default)]
    pub enable_otel: bool,
}

fn default_api_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            enable_otel: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:5000/api");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(!config.enable_otel);
    }

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ClientConfig = toml::from_str(
            r#"
api_base_url = "https://jobs.example.com/api"
enable_otel = true
"#,
        )
        .unwrap();
        assert_eq!(config.api_base_url, "https://jobs.example.com/api");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.enable_otel);
    }
}
