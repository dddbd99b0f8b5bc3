//! Filesystem `FileSink` and the fallback share surface.

use async_trait::async_trait;
use attnlog_core::error::Result;
use attnlog_core::export::{FileSink, ShareOptions, ShareSurface};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Writes exports into a fixed directory, creating it on demand.
#[derive(Debug, Clone)]
pub struct FsFileSink {
    dir: PathBuf,
}

impl FsFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl FileSink for FsFileSink {
    fn directory(&self) -> PathBuf {
        self.dir.clone()
    }

    async fn write(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, contents.as_bytes()).await?;
        tracing::debug!(path = %path.display(), bytes = contents.len(), "export written");
        Ok(())
    }
}

/// Share surface for environments without a share sheet, such as a terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoShareSurface;

#[async_trait]
impl ShareSurface for NoShareSurface {
    async fn is_available(&self) -> bool {
        false
    }

    async fn share(&self, path: &Path, _options: &ShareOptions) -> Result<()> {
        tracing::debug!(path = %path.display(), "share requested but unavailable");
        Ok(())
    }
}
