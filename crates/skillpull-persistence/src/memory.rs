//! In-memory store
//!
//! Keys are full paths. A directory exists when some key lies below it.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{Result, StoreError};
use crate::store::Store;

/// Store holding every file in a map
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored files
    pub async fn len(&self) -> usize {
        self.files.read().await.len()
    }

    /// Whether no files are stored
    pub async fn is_empty(&self) -> bool {
        self.files.read().await.is_empty()
    }
}

fn dir_prefix(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn write(&self, path: &str, content: &[u8]) -> Result<()> {
        self.files
            .write()
            .await
            .insert(path.to_string(), content.to_vec());
        Ok(())
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        self.files
            .read()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }

    async fn list(&self, dir: &str) -> Result<Vec<String>> {
        let prefix = dir_prefix(dir);
        let files = self.files.read().await;

        let names: BTreeSet<&str> = files
            .keys()
            .filter_map(|key| key.strip_prefix(prefix.as_str()))
            .filter_map(|rest| rest.split_once('/').map(|(name, _)| name))
            .collect();

        Ok(names.into_iter().map(str::to_string).collect())
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        let files = self.files.read().await;
        if files.contains_key(path) {
            return Ok(true);
        }
        let prefix = dir_prefix(path);
        Ok(files.keys().any(|key| key.starts_with(&prefix)))
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let prefix = dir_prefix(path);
        self.files
            .write()
            .await
            .retain(|key, _| key != path && !key.starts_with(&prefix));
        Ok(())
    }
}
