//! Local-first list management.
//!
//! [`Session`] ties the pieces together: it loads the stored document,
//! seeds the state container with it and saves changes in the background
//! once edits settle.
//!
//! ```no_run
//! use listkeeper::{AppConfig, ListType, Session};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let mut session = Session::open(AppConfig::load()).await?;
//! let list_id = session.new_list("Groceries", ListType::Shopping);
//! assert_eq!(session.state().active_list_id.as_deref(), Some(list_id.as_str()));
//! session.shutdown().await;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::broadcast;

pub use listkeeper_core::{init_tracing, AppConfig, ListError, ListResult, LoggingConfig};
pub use listkeeper_domain::commands;
pub use listkeeper_domain::{
    Action, AppData, ItemDetails, ItemUpdate, KanbanColumn, List, ListId, ListItem, ListType,
    ListUpdate, ListsState, ListsStore, TagMetadata, VisualStyle,
};

use listkeeper_domain::synchronize_tags;
pub use listkeeper_persistence::{
    FileStore, KeyValueStore, MemoryStore, PersistenceEvent, PersistenceGateway, STORAGE_KEY,
};

use listkeeper_persistence::DebouncedSaver;

pub struct Session {
    config: AppConfig,
    gateway: Arc<PersistenceGateway>,
    store: ListsStore,
    saver: DebouncedSaver,
}

impl Session {
    /// Open the file-backed store under the configured data directory.
    pub async fn open(config: AppConfig) -> anyhow::Result<Self> {
        init_tracing(&config.logging).context("Failed to initialize logging")?;

        let dir = config.effective_data_dir();
        tracing::info!("Opening list data in {}", dir.display());
        let backend = FileStore::new(&dir).with_quota(config.max_document_bytes);

        Ok(Self::with_store(config, Arc::new(backend)).await)
    }

    /// Open a session over any key-value backend.
    pub async fn with_store(config: AppConfig, backend: Arc<dyn KeyValueStore>) -> Self {
        let gateway = Arc::new(PersistenceGateway::new(backend));

        let mut document = gateway.load().await;
        if document == AppData::default() {
            document.preferences.theme_id = config.default_theme.clone();
        }
        document.tags = synchronize_tags(&document.lists, &document.tags);

        let mut store = ListsStore::from_document(&document);
        let (saver, trigger) = DebouncedSaver::spawn(gateway.clone(), config.quiet_period());
        store.set_listener(Box::new(trigger));

        Self {
            config,
            gateway,
            store,
            saver,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn state(&self) -> &ListsState {
        self.store.state()
    }

    pub fn store(&self) -> &ListsStore {
        &self.store
    }

    /// Apply an action. Actions that can change list tags refresh the tag
    /// registry right after.
    pub fn dispatch(&mut self, action: impl Into<Action>) {
        let action = action.into();
        let affects_tags = action.affects_tags();
        self.store.dispatch(action);
        if affects_tags {
            self.store.sync_tags();
        }
    }

    /// Create and activate an empty list styled with the configured
    /// defaults. Kanban lists get their default columns stored right away.
    pub fn new_list(&mut self, name: impl Into<String>, list_type: ListType) -> ListId {
        let style = VisualStyle::parse(&self.config.default_visual_style).unwrap_or_else(|| {
            tracing::warn!(
                "Unknown visual style '{}', using default",
                self.config.default_visual_style
            );
            VisualStyle::default()
        });
        let list = List::new(name, list_type, self.config.default_theme.clone(), style);
        let list_id = list.id.clone();

        self.store.create_list(list);
        if list_type == ListType::Kanban {
            self.store.ensure_kanban_columns(&list_id);
        }
        list_id
    }

    pub fn sync_tags(&mut self) {
        self.store.sync_tags();
    }

    pub fn set_theme(&mut self, theme_id: impl Into<String>) {
        self.store.set_theme(theme_id);
    }

    /// Write the current state immediately, bypassing the quiet period.
    pub async fn save_now(&self) -> ListResult<usize> {
        self.gateway.save(&self.store.to_document()).await
    }

    pub async fn export(&self) -> ListResult<String> {
        self.gateway.export().await
    }

    /// Replace everything with an imported document. On failure neither
    /// storage nor the in-memory state change.
    pub async fn import(&mut self, text: &str) -> ListResult<()> {
        let document = self.gateway.import(text).await?;
        self.store.load_document(document);
        self.store.sync_tags();
        Ok(())
    }

    /// Delete the stored document and start over with an empty state.
    ///
    /// Edits still waiting for their quiet period are discarded and the
    /// reset itself is not saved, so storage stays empty until the next
    /// edit. If deleting fails the current state is queued for saving again.
    pub async fn clear(&mut self) -> ListResult<()> {
        self.saver.cancel_pending();
        if let Err(e) = self.gateway.clear().await {
            self.saver.queue(self.store.to_document());
            return Err(e);
        }

        let listener = self.store.take_listener();
        self.store
            .load_document(AppData::with_theme(self.config.default_theme.clone()));
        if let Some(listener) = listener {
            self.store.set_listener(listener);
        }
        Ok(())
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<PersistenceEvent> {
        self.gateway.subscribe()
    }

    /// Stop background saving. Edits still inside their quiet period are
    /// not written; call [`Session::save_now`] first to keep them.
    pub async fn shutdown(self) {
        self.saver.shutdown().await;
    }
}
