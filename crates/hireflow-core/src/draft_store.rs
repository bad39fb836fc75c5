//! Draft persistence trait.
//!
//! Defines `DraftStore` for saving and restoring in-progress wizards. One
//! record per wizard kind; a later save for the same kind overwrites the
//! earlier one (last write wins). The record body is the serialized
//! `PersistedDraft`; the engine owns its shape and treats a body that fails
//! to parse as "no draft".

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Mutex;

use hireflow_types::draft::{DraftSummary, StoredDraft};
use hireflow_types::error::RepositoryError;
use hireflow_types::wizard::WizardKind;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Persistence interface for wizard drafts.
///
/// Uses RPITIT (return position `impl Trait` in traits) like every async
/// trait in this workspace.
pub trait DraftStore: Send + Sync {
    /// Save or replace the draft for `draft.kind`.
    ///
    /// Implementations keep the original `created_at` of an existing record.
    fn save_draft(
        &self,
        draft: StoredDraft,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Load the draft for a wizard kind, `None` if nothing was saved.
    fn load_draft(
        &self,
        kind: WizardKind,
    ) -> impl Future<Output = Result<Option<StoredDraft>, RepositoryError>> + Send;

    /// All saved drafts, most recently updated first.
    fn list_drafts(
        &self,
    ) -> impl Future<Output = Result<Vec<DraftSummary>, RepositoryError>> + Send;

    /// Remove the draft for a wizard kind. No-op if none exists.
    fn delete_draft(
        &self,
        kind: WizardKind,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// Listing summary of a stored draft.
///
/// Reads `current_step` out of the JSON body without deserializing the
/// whole draft; a body that is not valid JSON yields `None`.
pub fn summarize(draft: &StoredDraft) -> DraftSummary {
    let current_step = serde_json::from_str::<serde_json::Value>(&draft.state_json)
        .ok()
        .and_then(|v| v.get("current_step").and_then(|s| s.as_u64()))
        .and_then(|s| u8::try_from(s).ok());

    DraftSummary {
        kind: draft.kind,
        current_step,
        updated_at: draft.updated_at,
    }
}

// ---------------------------------------------------------------------------
// In-memory implementation
// ---------------------------------------------------------------------------

/// Process-local draft store, used by tests and by `--ephemeral` runs.
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    drafts: Mutex<BTreeMap<WizardKind, StoredDraft>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<WizardKind, StoredDraft>>, RepositoryError> {
        self.drafts.lock().map_err(|_| RepositoryError::Connection)
    }
}

impl DraftStore for MemoryDraftStore {
    async fn save_draft(&self, mut draft: StoredDraft) -> Result<(), RepositoryError> {
        let mut drafts = self.lock()?;
        if let Some(existing) = drafts.get(&draft.kind) {
            draft.created_at = existing.created_at;
        }
        drafts.insert(draft.kind, draft);
        Ok(())
    }

    async fn load_draft(&self, kind: WizardKind) -> Result<Option<StoredDraft>, RepositoryError> {
        Ok(self.lock()?.get(&kind).cloned())
    }

    async fn list_drafts(&self) -> Result<Vec<DraftSummary>, RepositoryError> {
        let mut summaries: Vec<DraftSummary> = self.lock()?.values().map(summarize).collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }

    async fn delete_draft(&self, kind: WizardKind) -> Result<(), RepositoryError> {
        self.lock()?.remove(&kind);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn stored(kind: WizardKind, json: &str) -> StoredDraft {
        let now = Utc::now();
        StoredDraft {
            kind,
            state_json: json.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_summarize_reads_current_step() {
        let s = summarize(&stored(WizardKind::JobPosting, r#"{"current_step":2,"fields":{}}"#));
        assert_eq!(s.current_step, Some(2));

        let s = summarize(&stored(WizardKind::JobPosting, "not json"));
        assert_eq!(s.current_step, None);
    }

    #[tokio::test]
    async fn test_memory_store_keeps_created_at_on_overwrite() {
        let store = MemoryDraftStore::new();
        let mut first = stored(WizardKind::ResumeBuilder, "{}");
        first.created_at = Utc::now() - Duration::hours(1);
        let created = first.created_at;
        store.save_draft(first).await.unwrap();

        store
            .save_draft(stored(WizardKind::ResumeBuilder, r#"{"current_step":3}"#))
            .await
            .unwrap();

        let loaded = store.load_draft(WizardKind::ResumeBuilder).await.unwrap().unwrap();
        assert_eq!(loaded.created_at, created);
        assert_eq!(loaded.state_json, r#"{"current_step":3}"#);
    }

    #[tokio::test]
    async fn test_memory_store_list_and_delete() {
        let store = MemoryDraftStore::new();
        let mut old = stored(WizardKind::JobPosting, "{}");
        old.updated_at = Utc::now() - Duration::minutes(5);
        store.save_draft(old).await.unwrap();
        store.save_draft(stored(WizardKind::Signup, "{}")).await.unwrap();

        let listed = store.list_drafts().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].kind, WizardKind::Signup);

        store.delete_draft(WizardKind::JobPosting).await.unwrap();
        store.delete_draft(WizardKind::JobPosting).await.unwrap();
        assert!(store.load_draft(WizardKind::JobPosting).await.unwrap().is_none());
    }
}
