use async_trait::async_trait;
use listkeeper_core::ListResult;

/// Events emitted by the persistence gateway.
///
/// `StorageFull` carries the message meant for the user; hosts surface it
/// however they display warnings.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistenceEvent {
    /// The document was written
    Saved { bytes: usize },
    /// A stored document was upgraded on load
    Migrated { from: String, to: String },
    /// The backend refused a write for lack of space
    StorageFull { message: String },
    /// The stored blob could not be read and was ignored
    CorruptDocumentDiscarded { reason: String },
    /// Any other persistence failure
    Error(String),
}

/// Flat string key-value storage.
/// Implementations decide where values live (memory, files, ...).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, `None` when absent
    async fn get(&self, key: &str) -> ListResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    /// Fails with `ListError::StorageFull` when the backend is out of space.
    async fn set(&self, key: &str, value: &str) -> ListResult<()>;

    /// Delete `key`. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> ListResult<()>;
}

/// Trait for serialization/deserialization strategies
pub trait Serializer<T: Send + Sync>: Send + Sync {
    /// Serialize data to text
    fn serialize(&self, data: &T) -> ListResult<String>;

    /// Deserialize data from text
    fn deserialize(&self, text: &str) -> ListResult<T>;
}
