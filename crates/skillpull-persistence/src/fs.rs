//! Filesystem-backed store

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::store::Store;

/// Store over real filesystem paths
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl FsStore {
    /// Create a filesystem store
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Store for FsStore {
    async fn write(&self, path: &str, content: &[u8]) -> Result<()> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StoreError::io(path, e))?;
            }
        }

        fs::write(path, content)
            .await
            .map_err(|e| StoreError::io(path, e))?;
        debug!(path, bytes = content.len(), "Wrote file");
        Ok(())
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        fs::read(path).await.map_err(|e| StoreError::io(path, e))
    }

    async fn list(&self, dir: &str) -> Result<Vec<String>> {
        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(dir, e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::io(dir, e))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| StoreError::io(dir, e))?;
            if file_type.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        names.sort();
        Ok(names)
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        fs::try_exists(path)
            .await
            .map_err(|e| StoreError::io(path, e))
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let metadata = match fs::symlink_metadata(path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(StoreError::io(path, e)),
        };

        let removed = if metadata.is_dir() {
            fs::remove_dir_all(path).await
        } else {
            fs::remove_file(path).await
        };

        match removed {
            Ok(()) => {
                debug!(path, "Deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn join(dir: &TempDir, rel: &str) -> String {
        dir.path().join(rel).to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn test_write_creates_parents_and_reads_back() {
        let temp = TempDir::new().unwrap();
        let store = FsStore::new();
        let path = join(&temp, "a/b/file.txt");

        store.write(&path, b"hello").await.unwrap();

        assert_eq!(store.read(&path).await.unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_write_overwrites() {
        let temp = TempDir::new().unwrap();
        let store = FsStore::new();
        let path = join(&temp, "f");

        store.write(&path, b"one").await.unwrap();
        store.write(&path, b"two").await.unwrap();

        assert_eq!(store.read(&path).await.unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let temp = TempDir::new().unwrap();
        let store = FsStore::new();
        let path = join(&temp, "nope");

        let err = store.read(&path).await.unwrap_err();

        assert!(matches!(err, StoreError::NotFound(p) if p == path));
    }

    #[tokio::test]
    async fn test_list_returns_sorted_directory_names_only() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("sub2")).unwrap();
        std::fs::create_dir(temp.path().join("sub1")).unwrap();
        std::fs::write(temp.path().join("file.txt"), "").unwrap();

        let dirs = FsStore::new().list(&join(&temp, "")).await.unwrap();

        assert_eq!(dirs, vec!["sub1", "sub2"]);
    }

    #[tokio::test]
    async fn test_list_missing_directory_is_empty() {
        let temp = TempDir::new().unwrap();

        let dirs = FsStore::new().list(&join(&temp, "missing")).await.unwrap();

        assert!(dirs.is_empty());
    }

    #[tokio::test]
    async fn test_exists() {
        let temp = TempDir::new().unwrap();
        let store = FsStore::new();
        let path = join(&temp, "dir/exists.txt");
        store.write(&path, b"").await.unwrap();

        assert!(store.exists(&path).await.unwrap());
        assert!(store.exists(&join(&temp, "dir")).await.unwrap());
        assert!(!store.exists(&join(&temp, "nope")).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_is_recursive_and_forced() {
        let temp = TempDir::new().unwrap();
        let store = FsStore::new();
        store.write(&join(&temp, "sub/deep/file"), b"x").await.unwrap();
        store.write(&join(&temp, "keep.txt"), b"k").await.unwrap();

        store.delete(&join(&temp, "sub")).await.unwrap();
        store.delete(&join(&temp, "sub")).await.unwrap();
        store.delete(&join(&temp, "keep.txt")).await.unwrap();

        assert!(!store.exists(&join(&temp, "sub")).await.unwrap());
        assert!(!store.exists(&join(&temp, "keep.txt")).await.unwrap());
    }
}
