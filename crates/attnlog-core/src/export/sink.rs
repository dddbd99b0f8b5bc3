//! Output ports for finished exports.

use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Writes UTF-8 text to a path inside a writable directory.
#[async_trait]
pub trait FileSink: Send + Sync {
    /// Directory exports are placed in.
    fn directory(&self) -> PathBuf;

    async fn write(&self, path: &Path, contents: &str) -> Result<()>;
}

/// Options passed to the share surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareOptions {
    pub mime_type: String,
    pub title: String,
}

impl ShareOptions {
    pub fn csv() -> Self {
        Self {
            mime_type: "text/csv".to_string(),
            title: "Save CSV".to_string(),
        }
    }
}

/// Offers a written file to the user.
#[async_trait]
pub trait ShareSurface: Send + Sync {
    async fn is_available(&self) -> bool;

    async fn share(&self, path: &Path, options: &ShareOptions) -> Result<()>;
}
