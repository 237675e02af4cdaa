use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage quota exceeded: {needed} bytes requested, limit is {limit} bytes")]
    StorageFull { needed: usize, limit: usize },

    #[error("Migration error: {0}")]
    Migration(String),
}

impl ListError {
    /// True when the storage backend refused a write for lack of space.
    pub fn is_storage_full(&self) -> bool {
        matches!(self, ListError::StorageFull { .. })
    }
}
