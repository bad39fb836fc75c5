//! Signed-in session persistence.
//!
//! The bearer token, email, role and profile-completion flag survive between
//! CLI invocations in the single-row `auth_session` table.

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use sqlx::Row;

use hireflow_core::session::Session;
use hireflow_types::error::RepositoryError;
use hireflow_types::session::UserRole;

use crate::sqlite::pool::DatabasePool;

pub struct SqliteSessionStore {
    pool: DatabasePool,
}

impl SqliteSessionStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Replace the stored session. A session without a token clears it.
    pub async fn save(&self, session: &Session) -> Result<(), RepositoryError> {
        let Some(token) = session.token.as_ref() else {
            return self.clear().await;
        };

        sqlx::query(
            r#"INSERT OR REPLACE INTO auth_session (id, token, email, role, profile_complete, updated_at)
               VALUES (1, ?, ?, ?, ?, ?)"#,
        )
        .bind(token.expose_secret())
        .bind(session.email.as_deref().unwrap_or_default())
        .bind(session.role.map(|r| r.to_string()))
        .bind(session.profile_complete)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    /// The stored session, or a signed-out one.
    pub async fn load(&self) -> Result<Session, RepositoryError> {
        let row = sqlx::query(
            "SELECT token, email, role, profile_complete FROM auth_session WHERE id = 1",
        )
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let Some(row) = row else {
            return Ok(Session::default());
        };

        let token: String = row
            .try_get("token")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let email: String = row
            .try_get("email")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let role: Option<String> = row
            .try_get("role")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let profile_complete: bool = row
            .try_get("profile_complete")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(Session::signed_in(
            SecretString::from(token),
            email,
            role.and_then(|r| r.parse::<UserRole>().ok()),
            profile_complete,
        ))
    }

    pub async fn clear(&self) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM auth_session")
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(())
    }
}
