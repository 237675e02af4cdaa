use listkeeper_core::ListResult;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

/// Atomic file writer that prevents data corruption
/// Uses write-to-temp-file → atomic-rename pattern for safety
pub struct AtomicWriter;

impl AtomicWriter {
    /// Write data to a file atomically.
    /// A crash mid-write leaves the previous content in place.
    pub async fn write_atomic(path: &Path, data: &[u8]) -> ListResult<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).await?;

        // Temp file in the same directory so the rename stays on one filesystem
        let temp_file = tempfile::NamedTempFile::new_in(parent)?;
        fs::write(temp_file.path(), data).await?;
        temp_file.persist(path).map_err(|e| e.error)?;

        tracing::debug!(
            "Atomically wrote {} bytes to {}",
            data.len(),
            path.display()
        );
        Ok(())
    }

    /// Read a file as text, `None` when it does not exist
    pub async fn read_optional(path: &Path) -> ListResult<Option<String>> {
        match fs::read_to_string(path).await {
            Ok(text) => {
                tracing::debug!("Read {} bytes from {}", text.len(), path.display());
                Ok(Some(text))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_atomic_write() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.json");

        AtomicWriter::write_atomic(&file_path, b"{\"a\":1}").await.unwrap();

        let read = AtomicWriter::read_optional(&file_path).await.unwrap();
        assert_eq!(read.as_deref(), Some("{\"a\":1}"));
    }

    #[tokio::test]
    async fn test_atomic_write_overwrites() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.json");

        AtomicWriter::write_atomic(&file_path, b"First").await.unwrap();
        AtomicWriter::write_atomic(&file_path, b"Second").await.unwrap();

        let read = AtomicWriter::read_optional(&file_path).await.unwrap();
        assert_eq!(read.as_deref(), Some("Second"));
        // Only the target remains; no temp files left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_creates_missing_parent() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("nested").join("data.json");

        AtomicWriter::write_atomic(&file_path, b"x").await.unwrap();
        assert!(file_path.exists());
    }

    #[tokio::test]
    async fn test_read_missing_is_none() {
        let dir = tempdir().unwrap();
        let read = AtomicWriter::read_optional(&dir.path().join("nope.json"))
            .await
            .unwrap();
        assert!(read.is_none());
    }
}
