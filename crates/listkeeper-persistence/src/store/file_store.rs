use crate::store::atomic_writer::AtomicWriter;
use crate::traits::KeyValueStore;
use async_trait::async_trait;
use listkeeper_core::{ListError, ListResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-backed key-value store: each key is one `<key>.json` file in a
/// directory, written atomically.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    quota_bytes: Option<usize>,
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            quota_bytes: None,
        }
    }

    /// Refuse writes whose value exceeds `quota_bytes`
    pub fn with_quota(mut self, quota_bytes: Option<usize>) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> ListResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ListError::Validation(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> ListResult<Option<String>> {
        AtomicWriter::read_optional(&self.path_for(key)?).await
    }

    async fn set(&self, key: &str, value: &str) -> ListResult<()> {
        let path = self.path_for(key)?;
        if let Some(limit) = self.quota_bytes {
            if value.len() > limit {
                return Err(ListError::StorageFull {
                    needed: value.len(),
                    limit,
                });
            }
        }

        AtomicWriter::write_atomic(&path, value.as_bytes()).await?;
        tracing::info!("Saved {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    async fn remove(&self, key: &str) -> ListResult<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!("Removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("lists-app-data", "{\"version\":\"2.0\"}").await.unwrap();
        assert!(dir.path().join("lists-app-data.json").exists());

        let loaded = store.get("lists-app-data").await.unwrap();
        assert_eq!(loaded.as_deref(), Some("{\"version\":\"2.0\"}"));
    }

    #[tokio::test]
    async fn test_missing_key() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("absent").await.unwrap(), None);
        store.remove("absent").await.unwrap();
    }

    #[tokio::test]
    async fn test_remove() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set("k", "v").await.unwrap();
        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_quota_leaves_file_untouched() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path()).with_quota(Some(4));
        store.set("k", "abc").await.unwrap();

        let err = store.set("k", "abcdef").await.unwrap_err();
        assert!(err.is_storage_full());
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let store = FileStore::new("/tmp");
        assert!(store.path_for("../escape").is_err());
        assert!(store.path_for("").is_err());
        assert!(store.path_for("lists-app-data").is_ok());
    }
}
