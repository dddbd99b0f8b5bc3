//! Unified path management for attnlog files.
//!
//! ```text
//! <config_dir>/attnlog/config.toml   # Application configuration
//! <data_dir>/attnlog/store.json      # Keyed store document
//! <cache_dir>/attnlog/exports/       # CSV exports
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "attnlog";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// A platform base directory could not be determined.
    BaseDirNotFound(&'static str),
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::BaseDirNotFound(kind) => write!(f, "Cannot find {} directory", kind),
        }
    }
}

impl std::error::Error for PathError {}

pub struct AttnPaths;

impl AttnPaths {
    /// `<config_dir>/attnlog`
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR))
            .ok_or(PathError::BaseDirNotFound("config"))
    }

    /// `<data_dir>/attnlog`
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|d| d.join(APP_DIR))
            .ok_or(PathError::BaseDirNotFound("data"))
    }

    /// `<cache_dir>/attnlog/exports`
    pub fn export_dir() -> Result<PathBuf, PathError> {
        dirs::cache_dir()
            .map(|d| d.join(APP_DIR).join("exports"))
            .ok_or(PathError::BaseDirNotFound("cache"))
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}

impl From<PathError> for attnlog_core::AttnError {
    fn from(err: PathError) -> Self {
        attnlog_core::AttnError::config(err.to_string())
    }
}
