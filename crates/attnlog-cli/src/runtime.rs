//! Wiring of config, store, context and exporter for one invocation.

use crate::Args;
use crate::prompt;
use anyhow::{Context, Result};
use attnlog_application::{CsvExportService, SessionContext};
use attnlog_core::clock::{Clock, SystemClock};
use attnlog_core::config::{AppConfig, ScopeMode};
use attnlog_core::confirm::ConfirmationToken;
use attnlog_core::LogbookRepository;
use attnlog_infrastructure::{ConfigService, FsFileSink, JsonFileKeyedStore, NoShareSurface};
use std::sync::Arc;

pub struct Runtime {
    pub context: SessionContext,
    pub exporter: CsvExportService,
    assume_yes: bool,
}

impl Runtime {
    /// Resolves configuration, opens the store and restores the context.
    pub async fn start(args: &Args) -> Result<Self> {
        let mut config = ConfigService::resolve(args.config.as_deref())
            .context("Failed to load configuration")?;
        apply_overrides(&mut config, args);
        config.validate().context("Invalid configuration")?;

        let data_dir = ConfigService::data_dir(&config)?;
        let export_dir = ConfigService::export_dir(&config)?;
        tracing::info!(
            data_dir = %data_dir.display(),
            export_dir = %export_dir.display(),
            scope = ?config.scope,
            max_entries = config.logging.max_entries,
            "Starting"
        );

        let store = Arc::new(JsonFileKeyedStore::in_dir(&data_dir));
        let repository = LogbookRepository::new(store, config.logging.max_entries);
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let mut context = SessionContext::new(repository.clone(), clock.clone(), config.scope);
        context.restore().await;
        for warning in context.take_warnings() {
            eprintln!("warning: {}", warning);
        }

        let exporter = CsvExportService::new(
            repository,
            Arc::new(FsFileSink::new(export_dir)),
            Arc::new(NoShareSurface),
            clock,
        );

        Ok(Self {
            context,
            exporter,
            assume_yes: args.yes,
        })
    }

    /// Puts the token's question to the user. `--yes` answers for them.
    pub fn ask(&self, token: &ConfirmationToken) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        prompt::ask_yes_no(&token.prompt())
    }

    /// Prints and drops warnings raised by the last operation.
    pub fn flush_warnings(&mut self) {
        for warning in self.context.take_warnings() {
            eprintln!("warning: {}", warning);
        }
    }
}

/// CLI flags override file and environment values.
fn apply_overrides(config: &mut AppConfig, args: &Args) {
    if let Some(max_entries) = args.max_entries {
        config.logging.max_entries = max_entries;
    }
    if args.session_less {
        config.scope = ScopeMode::SessionLess;
    }
    if let Some(dir) = &args.data_dir {
        config.storage.data_dir = Some(dir.clone());
    }
    if let Some(dir) = &args.export_dir {
        config.storage.export_dir = Some(dir.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_flags_override_config() {
        let args = Args::try_parse_from([
            "attnlog",
            "--max-entries",
            "7",
            "--session-less",
            "--data-dir",
            "/tmp/data",
            "status",
        ])
        .unwrap();
        let mut config = AppConfig::default();

        apply_overrides(&mut config, &args);

        assert_eq!(config.logging.max_entries, 7);
        assert_eq!(config.scope, ScopeMode::SessionLess);
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/tmp/data")));
        assert_eq!(config.storage.export_dir, None);
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let args = Args::try_parse_from(["attnlog", "status"]).unwrap();
        let mut config = AppConfig::default();
        config.logging.max_entries = 42;

        apply_overrides(&mut config, &args);

        assert_eq!(config.logging.max_entries, 42);
        assert_eq!(config.scope, ScopeMode::SessionScoped);
    }

    #[tokio::test]
    async fn test_start_restores_from_data_dir() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let data_dir = temp_dir.path().to_str().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "").unwrap();

        let args = Args::try_parse_from([
            "attnlog",
            "--config",
            config_path.to_str().unwrap(),
            "--data-dir",
            data_dir,
            "status",
        ])
        .unwrap();

        let mut runtime = Runtime::start(&args).await.unwrap();
        runtime.context.submit_identity("S1").await.unwrap();
        runtime.context.create_or_select_session("L1").await.unwrap();

        let restored = Runtime::start(&args).await.unwrap();
        assert_eq!(
            restored.context.active_session().map(|s| s.as_str()),
            Some("L1")
        );
    }
}
