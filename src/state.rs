//! Application state for the front-end host: the orchestrator, the assistant
//! transcript, and the configuration it was built from.

use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::backend::{Backend, HttpBackend};
use crate::chat::ChatHistory;
use crate::config::{ClientConfig, StoreKind};
use crate::domain::ChatSurface;
use crate::orchestrator::RequestOrchestrator;
use crate::store::{FileStore, KeyValueStore, MemoryStore};
use crate::view::ViewEvent;

pub type Orchestrator = RequestOrchestrator<HttpBackend, Box<dyn KeyValueStore>>;

/// One orchestrator per host: the host serves a single user, so in-flight
/// flags are shared by every tab and socket. A second quiz from any client
/// is refused as busy until the first one finishes.
pub struct AppState {
    pub orchestrator: Orchestrator,
    pub history: RwLock<ChatHistory>,
    pub config: ClientConfig,
}

impl AppState {
    /// Build the backend client and the pack store named by `config`.
    #[instrument(level = "info", skip_all)]
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let backend = HttpBackend::new(&config.backend)?;
        let store: Box<dyn KeyValueStore> = match config.store.kind {
            StoreKind::File => Box::new(FileStore::new(config.store.path.clone())),
            StoreKind::Memory => Box::new(MemoryStore::new()),
        };
        info!(
            target: "logiclinks",
            backend = %backend.origin(),
            store = ?config.store.kind,
            store_path = %config.store.path.display(),
            timeout_secs = ?config.backend.timeout_secs,
            "Client state ready"
        );

        Ok(Self {
            orchestrator: RequestOrchestrator::new(backend, store, &config.ui),
            history: RwLock::new(ChatHistory::new()),
            config,
        })
    }

    /// Append the assistant-surface chat turns from a finished action to the transcript.
    pub async fn record_assistant_turns(&self, events: &[ViewEvent]) {
        let turns: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Chat { surface: ChatSurface::Assistant, entry } => Some(entry.clone()),
                _ => None,
            })
            .collect();
        if turns.is_empty() {
            return;
        }
        let mut history = self.history.write().await;
        for t in turns {
            history.push(t);
        }
    }
}
