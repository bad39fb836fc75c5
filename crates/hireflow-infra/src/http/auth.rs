//! AuthClient -- sign-in and password reset against the REST backend.
//!
//! Inputs are checked locally with the same validators the wizards use, so a
//! malformed email never leaves the machine. Passwords stay wrapped in
//! [`SecretString`] until the request body is serialized.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use hireflow_core::session::Session;
use hireflow_core::validate::field::{validate_email, validate_password};
use hireflow_types::config::ClientConfig;
use hireflow_types::error::AuthError;
use hireflow_types::session::UserRole;

use super::{build_client, endpoint_url, error_message};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    token: String,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    profile_complete: bool,
}

#[derive(Serialize)]
struct ForgotPasswordRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct ResetPasswordRequest<'a> {
    token: &'a str,
    password: &'a str,
}

pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(config: &ClientConfig) -> Result<Self, AuthError> {
        let client = build_client(config).map_err(|e| AuthError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, config.api_base_url.clone()))
    }

    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<Session, AuthError> {
        let email = email.trim();
        if !validate_email(email) {
            return Err(AuthError::Invalid("Enter a valid email address".into()));
        }
        if password.expose_secret().is_empty() {
            return Err(AuthError::Invalid("Password is required".into()));
        }

        let body = self
            .post(
                "/auth/login",
                &LoginRequest {
                    email,
                    password: password.expose_secret(),
                },
            )
            .await?;

        let response: LoginResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::Decode(e.to_string()))?;
        if response.token.is_empty() {
            return Err(AuthError::Decode("login response carried an empty token".into()));
        }

        tracing::info!(email, "signed in");
        Ok(Session::signed_in(
            SecretString::from(response.token),
            email,
            response.role.and_then(|r| r.parse::<UserRole>().ok()),
            response.profile_complete,
        ))
    }

    /// Ask the backend to email a reset link. Returns the backend's message.
    pub async fn forgot_password(&self, email: &str) -> Result<Option<String>, AuthError> {
        let email = email.trim();
        if !validate_email(email) {
            return Err(AuthError::Invalid("Enter a valid email address".into()));
        }

        let body = self
            .post("/auth/forgot-password", &ForgotPasswordRequest { email })
            .await?;
        Ok(error_message(&body))
    }

    /// Set a new password using the token from the reset email.
    pub async fn reset_password(
        &self,
        token: &str,
        password: &SecretString,
    ) -> Result<Option<String>, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::Invalid("Reset token is required".into()));
        }
        if !validate_password(password.expose_secret()).is_valid {
            return Err(AuthError::Invalid(
                "Password needs 8+ characters with an uppercase letter, a lowercase letter and a digit"
                    .into(),
            ));
        }

        let body = self
            .post(
                "/auth/reset-password",
                &ResetPasswordRequest {
                    token,
                    password: password.expose_secret(),
                },
            )
            .await?;
        Ok(error_message(&body))
    }

    /// POST a JSON body and return the raw 2xx response text.
    async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<String, AuthError> {
        let url = endpoint_url(&self.base_url, path);
        tracing::debug!(%url, "auth request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        if status.is_success() {
            return Ok(text);
        }
        if status == StatusCode::UNAUTHORIZED && path == "/auth/login" {
            return Err(AuthError::InvalidCredentials);
        }
        Err(AuthError::Rejected(
            error_message(&text).unwrap_or_else(|| format!("status {}", status.as_u16())),
        ))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode as AxumStatus;
    use axum::response::IntoResponse;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};

    use super::*;
    use crate::http::test_server;

    async fn login(Json(body): Json<Value>) -> axum::response::Response {
        if body["password"] == json!("Secret123") {
            Json(json!({
                "token": "jwt-abc",
                "role": "employer",
                "profileComplete": true,
            }))
            .into_response()
        } else {
            (
                AxumStatus::UNAUTHORIZED,
                Json(json!({ "message": "Invalid credentials" })),
            )
                .into_response()
        }
    }

    async fn forgot(Json(body): Json<Value>) -> Json<Value> {
        Json(json!({ "message": format!("Reset link sent to {}", body["email"].as_str().unwrap()) }))
    }

    async fn reset(Json(body): Json<Value>) -> axum::response::Response {
        if body["token"] == json!("good-token") {
            Json(json!({ "message": "Password updated" })).into_response()
        } else {
            (
                AxumStatus::BAD_REQUEST,
                Json(json!({ "message": "Reset link has expired" })),
            )
                .into_response()
        }
    }

    async fn client() -> AuthClient {
        let router = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/forgot-password", post(forgot))
            .route("/api/auth/reset-password", post(reset));
        let base_url = test_server::spawn(router).await;
        AuthClient::new(&ClientConfig {
            api_base_url: base_url,
            request_timeout_secs: 5,
            enable_otel: false,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_login_returns_session() {
        let client = client().await;
        let session = client
            .login(" ada@example.com ", &SecretString::from("Secret123"))
            .await
            .unwrap();

        assert_eq!(
            session.token.as_ref().map(|t| t.expose_secret().to_string()),
            Some("jwt-abc".to_string())
        );
        assert_eq!(session.email.as_deref(), Some("ada@example.com"));
        assert_eq!(session.role, Some(UserRole::Employer));
        assert!(session.profile_complete);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let client = client().await;
        let err = client
            .login("ada@example.com", &SecretString::from("nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_rejects_bad_input_locally() {
        let client = client().await;
        let err = client
            .login("not-an-email", &SecretString::from("Secret123"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Invalid(_)));

        let err = client
            .login("ada@example.com", &SecretString::from(""))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_forgot_password_returns_message() {
        let client = client().await;
        let message = client.forgot_password("ada@example.com").await.unwrap();
        assert_eq!(message.as_deref(), Some("Reset link sent to ada@example.com"));
    }

    #[tokio::test]
    async fn test_reset_password_flow() {
        let client = client().await;

        let message = client
            .reset_password("good-token", &SecretString::from("NewSecret1"))
            .await
            .unwrap();
        assert_eq!(message.as_deref(), Some("Password updated"));

        let err = client
            .reset_password("stale-token", &SecretString::from("NewSecret1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Rejected(ref m) if m == "Reset link has expired"));

        let err = client
            .reset_password("good-token", &SecretString::from("weak"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Invalid(_)));
    }
}
