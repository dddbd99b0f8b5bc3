//! Application configuration model.
//!
//! Every field has a default, so an empty TOML document is a valid config.

use crate::error::{AttnError, Result};
use crate::log::DEFAULT_MAX_ENTRIES;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Whether log lists are partitioned by session.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScopeMode {
    /// Identity -> session -> two log lists.
    #[default]
    SessionScoped,
    /// Identity -> two log lists, no sessions.
    SessionLess,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// History cap applied to every log list.
    pub max_entries: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the keyed store document. Platform data dir when unset.
    pub data_dir: Option<PathBuf>,
    /// Directory CSV exports are written to. Platform cache dir when unset.
    pub export_dir: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub scope: ScopeMode,
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.logging.max_entries == 0 {
            return Err(AttnError::config("logging.max_entries must be at least 1"));
        }
        Ok(())
    }
}
