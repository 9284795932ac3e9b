//! Application state wiring the catalog, completion client and sessions.
//!
//! AppState holds the concrete service instances used by both the CLI and
//! the HTTP API. The controller is generic over its catalog source; AppState
//! pins it to the CSV implementation.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;
use uuid::Uuid;

use cstore_core::catalog::CatalogCache;
use cstore_core::chat::{ChatController, ChatSession};
use cstore_core::llm::CompletionClient;
use cstore_infra::catalog::CsvCatalogSource;
use cstore_infra::config::{load_global_config, read_global_config, resolve_config_path};
use cstore_infra::llm::OpenAiCompatibleClient;
use cstore_types::config::GlobalConfig;

pub type ConcreteCatalogCache = CatalogCache<CsvCatalogSource>;

pub type ConcreteChatController = ChatController<CsvCatalogSource>;

/// A session shared between request handlers.
pub type SharedSession = Arc<Mutex<ChatSession>>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GlobalConfig>,
    pub controller: Arc<ConcreteChatController>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    /// Load configuration and wire services.
    ///
    /// An explicitly named config file must exist and parse; the default
    /// `./cstore.toml` is optional.
    pub async fn init(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match config_path {
            Some(path) => read_global_config(path).await?,
            None => load_global_config(&resolve_config_path(None)).await,
        };

        let client = Arc::new(OpenAiCompatibleClient::from_config(&config.completion));
        tracing::debug!(
            catalog = %config.catalog_path.display(),
            base_url = %client.base_url(),
            "application state initialized"
        );
        Ok(Self::new(config, client))
    }

    /// Wire services around an already-built completion client.
    pub fn new(config: GlobalConfig, client: Arc<dyn CompletionClient>) -> Self {
        let source = CsvCatalogSource::new(config.catalog_path.clone());
        let catalog = Arc::new(CatalogCache::new(
            source,
            Duration::from_secs(config.cache_ttl_secs),
        ));
        let controller = Arc::new(ChatController::new(catalog, client));
        let sessions = SessionStore::new(Duration::from_secs(config.server.session_idle_secs));

        Self {
            config: Arc::new(config),
            controller,
            sessions: Arc::new(sessions),
        }
    }

    pub fn catalog(&self) -> &ConcreteCatalogCache {
        self.controller.catalog()
    }
}

/// In-memory chat sessions keyed by id.
///
/// Each session sits behind its own async mutex; nothing is shared across
/// sessions. A session nobody has looked up for `idle` is evicted, so
/// abandoned browser tabs do not pile up.
pub struct SessionStore {
    sessions: Cache<Uuid, SharedSession>,
}

impl SessionStore {
    pub fn new(idle: Duration) -> Self {
        Self {
            sessions: Cache::builder().time_to_idle(idle).build(),
        }
    }

    /// Start a fresh session and return its id.
    pub async fn create(&self) -> Uuid {
        let id = Uuid::now_v7();
        self.sessions
            .insert(id, Arc::new(Mutex::new(ChatSession::new())))
            .await;
        id
    }

    /// Look up a session, resetting its idle clock.
    pub async fn get(&self, id: &Uuid) -> Option<SharedSession> {
        self.sessions.get(id).await
    }

    /// Drop a session. Returns `false` if it did not exist.
    pub async fn remove(&self, id: &Uuid) -> bool {
        self.sessions.remove(id).await.is_some()
    }

    /// Live session count after pending evictions are applied.
    pub async fn count(&self) -> u64 {
        self.sessions.run_pending_tasks().await;
        self.sessions.entry_count()
    }
}
