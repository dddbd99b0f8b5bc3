//! In-process `KeyedStore`, used by tests and ephemeral runs.

use async_trait::async_trait;
use attnlog_core::error::Result;
use attnlog_core::store::KeyedStore;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryKeyedStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryKeyedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All keys currently present, sorted.
    pub async fn keys(&self) -> Vec<String> {
        self.entries.read().await.keys().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyedStore for MemoryKeyedStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
