//! The storage trait shared by all backends

use async_trait::async_trait;

use crate::error::Result;

/// Byte store addressed by `/`-separated paths
///
/// Directories are implicit: writing `a/b/c` makes `a` and `a/b` exist.
#[async_trait]
pub trait Store: Send + Sync {
    /// Write `content` to `path`, creating parent directories as needed
    async fn write(&self, path: &str, content: &[u8]) -> Result<()>;

    /// Read the bytes at `path`
    ///
    /// Returns [`StoreError::NotFound`](crate::StoreError::NotFound) when
    /// nothing is stored there.
    async fn read(&self, path: &str) -> Result<Vec<u8>>;

    /// Names of the immediate child directories of `dir`, sorted
    ///
    /// A missing directory lists as empty.
    async fn list(&self, dir: &str) -> Result<Vec<String>>;

    /// Whether a file or directory exists at `path`
    async fn exists(&self, path: &str) -> Result<bool>;

    /// Remove `path` and everything below it; missing paths are ignored
    async fn delete(&self, path: &str) -> Result<()>;
}
