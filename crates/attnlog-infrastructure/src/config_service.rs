//! Configuration loading.
//!
//! Sources, highest priority first (CLI flags are applied by the binary on
//! top of the result):
//!
//! 1. Environment variables (`ATTNLOG_*`)
//! 2. Config file (`<config_dir>/attnlog/config.toml` or an explicit path)
//! 3. Default values
//!
//! # Environment Variables
//!
//! - `ATTNLOG_MAX_ENTRIES`: history cap per log list
//! - `ATTNLOG_SCOPE`: `session_scoped` or `session_less`
//! - `ATTNLOG_DATA_DIR`: directory holding `store.json`
//! - `ATTNLOG_EXPORT_DIR`: directory CSV exports are written to

use crate::paths::AttnPaths;
use attnlog_core::config::{AppConfig, ScopeMode};
use attnlog_core::error::{AttnError, Result};
use std::path::{Path, PathBuf};

pub struct ConfigService;

impl ConfigService {
    /// Loads the file, applies the process environment and validates.
    pub fn resolve(explicit_path: Option<&Path>) -> Result<AppConfig> {
        let mut config = Self::load_file(explicit_path)?;
        Self::apply_env(&mut config, std::env::vars())?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the config file.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load_file(explicit_path: Option<&Path>) -> Result<AppConfig> {
        let (path, required) = match explicit_path {
            Some(path) => (path.to_path_buf(), true),
            None => match AttnPaths::config_file() {
                Ok(path) => (path, false),
                Err(e) => {
                    tracing::warn!("No config directory ({}), using defaults", e);
                    return Ok(AppConfig::default());
                }
            },
        };

        if !path.exists() {
            if required {
                return Err(AttnError::not_found("config file", path.display().to_string()));
            }
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(AppConfig::default());
        }

        let raw = std::fs::read_to_string(&path)?;
        let config = AppConfig::from_toml_str(&raw)?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Applies `ATTNLOG_*` overrides from `vars`.
    pub fn apply_env<I>(config: &mut AppConfig, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            match name.as_str() {
                "ATTNLOG_MAX_ENTRIES" => {
                    config.logging.max_entries = value.trim().parse().map_err(|_| {
                        AttnError::config(format!("ATTNLOG_MAX_ENTRIES is not a number: {}", value))
                    })?;
                }
                "ATTNLOG_SCOPE" => {
                    config.scope = match value.trim() {
                        "session_scoped" => ScopeMode::SessionScoped,
                        "session_less" => ScopeMode::SessionLess,
                        other => {
                            return Err(AttnError::config(format!(
                                "ATTNLOG_SCOPE must be session_scoped or session_less, got {}",
                                other
                            )));
                        }
                    };
                }
                "ATTNLOG_DATA_DIR" => config.storage.data_dir = Some(PathBuf::from(value)),
                "ATTNLOG_EXPORT_DIR" => config.storage.export_dir = Some(PathBuf::from(value)),
                _ => {}
            }
        }
        Ok(())
    }

    /// The data directory from config, or the platform default.
    pub fn data_dir(config: &AppConfig) -> Result<PathBuf> {
        match &config.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(AttnPaths::data_dir()?),
        }
    }

    /// The export directory from config, or the platform cache default.
    pub fn export_dir(config: &AppConfig) -> Result<PathBuf> {
        match &config.storage.export_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(AttnPaths::export_dir()?),
        }
    }
}
