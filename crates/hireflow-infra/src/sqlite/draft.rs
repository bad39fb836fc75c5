//! SQLite implementation of `DraftStore`.
//!
//! One row per wizard kind in `wizard_drafts`. Saves upsert on the kind and
//! keep the row's original `created_at`. Listing reads `current_step` out of
//! the JSON body via [`summarize`] instead of decoding whole drafts.

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use hireflow_core::draft_store::{DraftStore, summarize};
use hireflow_types::draft::{DraftSummary, StoredDraft};
use hireflow_types::error::RepositoryError;
use hireflow_types::wizard::WizardKind;

use crate::sqlite::pool::DatabasePool;

/// SQLite-backed draft persistence.
pub struct SqliteDraftStore {
    pool: DatabasePool,
}

impl SqliteDraftStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn query_err(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

fn row_to_draft(row: &SqliteRow) -> Result<StoredDraft, RepositoryError> {
    let kind: String = row.try_get("kind").map_err(query_err)?;
    let state_json: String = row.try_get("state_json").map_err(query_err)?;
    let created_at: String = row.try_get("created_at").map_err(query_err)?;
    let updated_at: String = row.try_get("updated_at").map_err(query_err)?;

    Ok(StoredDraft {
        kind: kind
            .parse::<WizardKind>()
            .map_err(|e| RepositoryError::Query(format!("invalid kind: {e}")))?,
        state_json,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

// ---------------------------------------------------------------------------
// DraftStore implementation
// ---------------------------------------------------------------------------

impl DraftStore for SqliteDraftStore {
    async fn save_draft(&self, draft: StoredDraft) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO wizard_drafts (kind, state_json, created_at, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT(kind) DO UPDATE SET
                   state_json = excluded.state_json,
                   updated_at = excluded.updated_at"#,
        )
        .bind(draft.kind.slug())
        .bind(&draft.state_json)
        .bind(format_datetime(&draft.created_at))
        .bind(format_datetime(&draft.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;

        Ok(())
    }

    async fn load_draft(&self, kind: WizardKind) -> Result<Option<StoredDraft>, RepositoryError> {
        let row = sqlx::query(
            "SELECT kind, state_json, created_at, updated_at FROM wizard_drafts WHERE kind = ?",
        )
        .bind(kind.slug())
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(query_err)?;

        row.as_ref().map(row_to_draft).transpose()
    }

    async fn list_drafts(&self) -> Result<Vec<DraftSummary>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT kind, state_json, created_at, updated_at FROM wizard_drafts ORDER BY updated_at DESC",
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;

        rows.iter()
            .map(|row| row_to_draft(row).map(|draft| summarize(&draft)))
            .collect()
    }

    async fn delete_draft(&self, kind: WizardKind) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM wizard_drafts WHERE kind = ?")
            .bind(kind.slug())
            .execute(&self.pool.writer)
            .await
            .map_err(query_err)?;

        Ok(())
    }
}
