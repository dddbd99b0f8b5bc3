//! File-backed `KeyedStore`.
//!
//! All keys live in one JSON object document:
//!
//! ```text
//! data_dir/
//! └── store.json   {"studentId": "S123", "S123_sessions": "[...]", ...}
//! ```
//!
//! Every write is a locked read-modify-write followed by an atomic rename, so
//! a crash leaves either the old or the new document on disk. Writes to
//! different keys are still separate transactions.

use crate::storage::{AtomicJsonError, AtomicJsonFile};
use async_trait::async_trait;
use attnlog_core::error::{AttnError, Result};
use attnlog_core::store::KeyedStore;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

type Document = BTreeMap<String, String>;

/// Store document file name inside the data directory.
pub const STORE_FILE_NAME: &str = "store.json";

pub struct JsonFileKeyedStore {
    file: Arc<AtomicJsonFile<Document>>,
}

impl JsonFileKeyedStore {
    /// Opens (without creating) the store document at `path`.
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicJsonFile::new(path)),
        }
    }

    /// Opens `store.json` inside `data_dir`.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(STORE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    async fn run_blocking<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&AtomicJsonFile<Document>) -> std::result::Result<T, AtomicJsonError>
            + Send
            + 'static,
    {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || op(file.as_ref()))
            .await
            .map_err(|e| AttnError::internal(format!("Failed to join task: {}", e)))?
            .map_err(|e| AttnError::store(e.to_string()))
    }
}

#[async_trait]
impl KeyedStore for JsonFileKeyedStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.run_blocking(move |file| Ok(file.load()?.and_then(|mut doc| doc.remove(&key))))
            .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let key = key.to_string();
        let value = value.to_string();
        self.run_blocking(move |file| {
            file.update(Document::new(), |doc| {
                doc.insert(key, value);
                true
            })
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        self.run_blocking(move |file| {
            file.update(Document::new(), |doc| doc.remove(&key).is_some())
        })
        .await
    }
}
