//! Application state wiring stores, session and backend clients together.
//!
//! The wizard engine is generic over its draft store and sink; AppState pins
//! it to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use hireflow_core::draft_store::{DraftStore, MemoryDraftStore};
use hireflow_core::engine::WizardEngine;
use hireflow_core::session::{SessionWriter, session_channel};
use hireflow_infra::config::{LoadedConfig, load_client_config};
use hireflow_infra::filesystem::resolve_data_dir;
use hireflow_infra::http::{AuthClient, HttpSubmissionSink};
use hireflow_infra::sqlite::draft::SqliteDraftStore;
use hireflow_infra::sqlite::pool::{DatabasePool, database_url};
use hireflow_infra::sqlite::session::SqliteSessionStore;
use hireflow_types::config::ClientConfig;
use hireflow_types::draft::{DraftSummary, StoredDraft};
use hireflow_types::error::RepositoryError;
use hireflow_types::wizard::WizardKind;

/// Draft persistence chosen at startup.
pub enum AppDraftStore {
    Sqlite(SqliteDraftStore),
    /// `--ephemeral`: drafts die with the process.
    Memory(MemoryDraftStore),
}

impl DraftStore for AppDraftStore {
    async fn save_draft(&self, draft: StoredDraft) -> Result<(), RepositoryError> {
        match self {
            Self::Sqlite(store) => store.save_draft(draft).await,
            Self::Memory(store) => store.save_draft(draft).await,
        }
    }

    async fn load_draft(&self, kind: WizardKind) -> Result<Option<StoredDraft>, RepositoryError> {
        match self {
            Self::Sqlite(store) => store.load_draft(kind).await,
            Self::Memory(store) => store.load_draft(kind).await,
        }
    }

    async fn list_drafts(&self) -> Result<Vec<DraftSummary>, RepositoryError> {
        match self {
            Self::Sqlite(store) => store.list_drafts().await,
            Self::Memory(store) => store.list_drafts().await,
        }
    }

    async fn delete_draft(&self, kind: WizardKind) -> Result<(), RepositoryError> {
        match self {
            Self::Sqlite(store) => store.delete_draft(kind).await,
            Self::Memory(store) => store.delete_draft(kind).await,
        }
    }
}

pub type ConcreteEngine = WizardEngine<AppDraftStore, HttpSubmissionSink>;

pub struct AppState {
    pub data_dir: PathBuf,
    pub config: ClientConfig,
    pub draft_store: Arc<AppDraftStore>,
    pub session_store: SqliteSessionStore,
    pub session: SessionWriter,
    pub sink: Arc<HttpSubmissionSink>,
    pub auth: AuthClient,
}

impl AppState {
    /// Read config, open the database, restore the session, build clients.
    pub async fn init(config: ClientConfig, ephemeral: bool) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;

        let db_pool = DatabasePool::new(&database_url(&data_dir))
            .await
            .context("Failed to open the local database")?;

        let draft_store = if ephemeral {
            tracing::debug!("ephemeral run, drafts are kept in memory");
            AppDraftStore::Memory(MemoryDraftStore::new())
        } else {
            AppDraftStore::Sqlite(SqliteDraftStore::new(db_pool.clone()))
        };

        let session_store = SqliteSessionStore::new(db_pool);
        let initial = match session_store.load().await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "failed to restore session, continuing signed out");
                Default::default()
            }
        };
        let (session, context) = session_channel(initial);

        let sink = HttpSubmissionSink::new(&config, context)
            .context("Failed to build the HTTP client")?;
        let auth = AuthClient::new(&config).context("Failed to build the HTTP client")?;

        Ok(Self {
            data_dir,
            config,
            draft_store: Arc::new(draft_store),
            session_store,
            session,
            sink: Arc::new(sink),
            auth,
        })
    }

    /// Load a wizard, resuming its saved draft if there is one.
    pub async fn mount_wizard(&self, kind: WizardKind) -> ConcreteEngine {
        WizardEngine::mount(
            kind,
            Arc::clone(&self.draft_store),
            Arc::clone(&self.sink),
            self.session.context(),
        )
        .await
    }

    /// Write the current session to disk.
    pub async fn persist_session(&self) -> anyhow::Result<()> {
        self.session_store
            .save(&self.session.context().snapshot())
            .await
            .context("Failed to save session")
    }
}

/// Read the client config from the resolved data directory.
pub async fn load_config() -> LoadedConfig {
    load_client_config(&resolve_data_dir()).await
}
