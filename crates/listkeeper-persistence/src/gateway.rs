//! Reads and writes the root document as a single JSON blob.

use std::sync::Arc;

use listkeeper_core::{ListError, ListResult};
use listkeeper_domain::{AppData, SCHEMA_VERSION};
use serde_json::Value;
use tokio::sync::broadcast;

use crate::migration::{Migrator, SchemaVersion};
use crate::serialization::JsonSerializer;
use crate::traits::{KeyValueStore, PersistenceEvent, Serializer};

/// Storage key of the root document.
pub const STORAGE_KEY: &str = "lists-app-data";

/// Warning shown to the user when a save hits the storage quota.
pub const STORAGE_FULL_MESSAGE: &str =
    "Storage quota exceeded. Please delete some lists to free up space.";

pub struct PersistenceGateway {
    store: Arc<dyn KeyValueStore>,
    migrator: Migrator,
    events: broadcast::Sender<PersistenceEvent>,
}

impl PersistenceGateway {
    /// The event channel buffers 16 events per subscriber.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            store,
            migrator: Migrator::new(),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PersistenceEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: PersistenceEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    /// Load the stored document.
    ///
    /// Never fails: a missing blob yields the default document, and an
    /// unreadable one is discarded in favor of the default. An outdated
    /// document is migrated and written back before it is returned. A
    /// document with an unrecognised version is read as is and written
    /// back under the current version.
    pub async fn load(&self) -> AppData {
        match self.try_load().await {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Discarding stored document: {}", e);
                let event = match e {
                    ListError::Io(_) => PersistenceEvent::Error(e.to_string()),
                    _ => PersistenceEvent::CorruptDocumentDiscarded {
                        reason: e.to_string(),
                    },
                };
                self.emit(event);
                AppData::default()
            }
        }
    }

    async fn try_load(&self) -> ListResult<AppData> {
        let Some(text) = self.store.get(STORAGE_KEY).await? else {
            tracing::debug!("No stored document, starting empty");
            return Ok(AppData::default());
        };

        let value: Value = JsonSerializer::compact().deserialize(&text)?;
        let Some(from) = Migrator::detect_version(&value) else {
            tracing::warn!(
                "Unrecognised schema version {}, reading document as is",
                value["version"]
            );
            let mut document = decode(value)?;
            document.version = SCHEMA_VERSION.to_string();
            if let Err(e) = self.save(&document).await {
                tracing::warn!("Failed to persist restamped document: {}", e);
            }
            return Ok(document);
        };

        if from == SchemaVersion::CURRENT {
            let document = decode(value)?;
            tracing::info!("Loaded document with {} lists", document.lists.len());
            return Ok(document);
        }

        tracing::info!(
            "Migrating data from version {} to {}",
            from,
            SchemaVersion::CURRENT
        );
        let document = decode(self.migrator.migrate(value)?)?;
        self.emit(PersistenceEvent::Migrated {
            from: from.as_str().to_string(),
            to: SchemaVersion::CURRENT.as_str().to_string(),
        });

        if let Err(e) = self.save(&document).await {
            tracing::warn!("Failed to persist migrated document: {}", e);
        }
        Ok(document)
    }

    /// Stamp the current version and write the document.
    ///
    /// Returns the number of bytes written. On failure the previously
    /// stored document is left as it was.
    pub async fn save(&self, document: &AppData) -> ListResult<usize> {
        let stamped;
        let document = if document.is_current() {
            document
        } else {
            stamped = AppData {
                version: SCHEMA_VERSION.to_string(),
                ..document.clone()
            };
            &stamped
        };

        let text = JsonSerializer::compact().serialize(document)?;
        match self.store.set(STORAGE_KEY, &text).await {
            Ok(()) => {
                tracing::debug!("Saved document ({} bytes)", text.len());
                self.emit(PersistenceEvent::Saved { bytes: text.len() });
                Ok(text.len())
            }
            Err(e) if e.is_storage_full() => {
                tracing::warn!("Failed to save: {}", e);
                self.emit(PersistenceEvent::StorageFull {
                    message: STORAGE_FULL_MESSAGE.to_string(),
                });
                Err(e)
            }
            Err(e) => {
                tracing::error!("Failed to save: {}", e);
                self.emit(PersistenceEvent::Error(e.to_string()));
                Err(e)
            }
        }
    }

    /// The stored document as indented JSON text.
    pub async fn export(&self) -> ListResult<String> {
        let document = self.load().await;
        JsonSerializer::pretty().serialize(&document)
    }

    /// Parse, migrate and store a document supplied as text.
    ///
    /// Storage is untouched when the text is not a readable document.
    pub async fn import(&self, text: &str) -> ListResult<AppData> {
        let value: Value = JsonSerializer::compact().deserialize(text).map_err(|e| {
            tracing::warn!("Failed to import data: {}", e);
            e
        })?;
        let mut document = decode(self.migrator.migrate(value)?)?;
        document.version = SCHEMA_VERSION.to_string();

        self.save(&document).await?;
        tracing::info!("Imported document with {} lists", document.lists.len());
        Ok(document)
    }

    /// Delete the stored document.
    pub async fn clear(&self) -> ListResult<()> {
        self.store.remove(STORAGE_KEY).await.map_err(|e| {
            tracing::error!("Failed to clear storage: {}", e);
            e
        })
    }
}

fn decode(value: Value) -> ListResult<AppData> {
    serde_json::from_value(value).map_err(|e| ListError::Serialization(e.to_string()))
}
