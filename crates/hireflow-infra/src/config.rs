//! Client configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.hireflow/` in production)
//! into [`ClientConfig`]. Falls back to defaults when the file is missing or
//! malformed, reporting the latter; `HIREFLOW_API_URL` overrides the backend
//! location.

use std::path::Path;

use hireflow_types::config::ClientConfig;

/// Environment variable overriding `api_base_url`.
pub const API_URL_ENV: &str = "HIREFLOW_API_URL";

/// Configuration plus any reason the config file was ignored.
///
/// Loading runs before tracing is installed (the subscriber depends on the
/// config), so problems are handed back for the caller to log.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: ClientConfig,
    pub warning: Option<String>,
}

/// Load `{data_dir}/config.toml`, then apply environment overrides.
pub async fn load_client_config(data_dir: &Path) -> LoadedConfig {
    let LoadedConfig { config, warning } = read_config_file(data_dir).await;
    LoadedConfig {
        config: apply_overrides(config, std::env::var(API_URL_ENV).ok()),
        warning,
    }
}

async fn read_config_file(data_dir: &Path) -> LoadedConfig {
    let config_path = data_dir.join("config.toml");
    let fallback = |warning: Option<String>| LoadedConfig {
        config: ClientConfig::default(),
        warning,
    };

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return fallback(None),
        Err(err) => {
            return fallback(Some(format!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            )));
        }
    };

    match toml::from_str::<ClientConfig>(&content) {
        Ok(config) => LoadedConfig {
            config,
            warning: None,
        },
        Err(err) => fallback(Some(format!(
            "Failed to parse {}: {err}, using defaults",
            config_path.display()
        ))),
    }
}

/// Apply an API URL override and normalize the base URL (no trailing slash).
fn apply_overrides(mut config: ClientConfig, api_url: Option<String>) -> ClientConfig {
    if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
        config.api_base_url = url.trim().to_string();
    }
    while config.api_base_url.ends_with('/') {
        config.api_base_url.pop();
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let loaded = read_config_file(tmp.path()).await;
        assert_eq!(loaded.config, ClientConfig::default());
        assert!(loaded.warning.is_none());
    }

    #[tokio::test]
    async fn valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
api_base_url = "https://jobs.example.com/api"
request_timeout_secs = 10
"#,
        )
        .await
        .unwrap();

        let loaded = read_config_file(tmp.path()).await;
        assert!(loaded.warning.is_none());
        let config = loaded.config;
        assert_eq!(config.api_base_url, "https://jobs.example.com/api");
        assert_eq!(config.request_timeout_secs, 10);
        assert!(!config.enable_otel);
    }

    #[tokio::test]
    async fn invalid_toml_returns_default_with_warning() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let loaded = read_config_file(tmp.path()).await;
        assert_eq!(loaded.config, ClientConfig::default());
        let warning = loaded.warning.expect("parse failure is reported");
        assert!(warning.starts_with("Failed to parse"));
        assert!(warning.contains("config.toml"));
    }

    #[tokio::test]
    async fn unreadable_config_path_is_reported() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::create_dir(tmp.path().join("config.toml"))
            .await
            .unwrap();

        let loaded = read_config_file(tmp.path()).await;
        assert_eq!(loaded.config, ClientConfig::default());
        assert!(loaded.warning.unwrap().starts_with("Failed to read"));
    }

    #[test]
    fn env_override_replaces_base_url() {
        let config = apply_overrides(
            ClientConfig::default(),
            Some("https://staging.example.com/api/".to_string()),
        );
        assert_eq!(config.api_base_url, "https://staging.example.com/api");

        let config = apply_overrides(ClientConfig::default(), Some("  ".to_string()));
        assert_eq!(config.api_base_url, "http://localhost:5000/api");
    }
}
