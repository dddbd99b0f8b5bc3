use attnlog_core::clock::Clock;
use attnlog_core::error::Result;
use attnlog_core::export::{
    ExportTable, ExportTarget, FileSink, ShareOptions, ShareSurface, export_file_name,
    rows_from_pair,
};
use attnlog_core::ids::StudentId;
use attnlog_core::session::SessionRegistry;
use attnlog_core::store::LogScope;
use attnlog_core::LogbookRepository;
use std::path::PathBuf;
use std::sync::Arc;

/// Terminal state of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Session-scoped export requested but the registry is empty.
    NoSessions,
    /// The merged row set was empty; no file was produced.
    NoData,
    /// File written and handed to the share surface.
    Shared { path: PathBuf, rows: usize },
    /// File written; no share surface available.
    Saved { path: PathBuf, rows: usize },
}

/// Builds CSV exports from persisted log lists.
///
/// Lists are always read from the store, never from in-memory context state,
/// so exporting a non-active session cannot see stale data.
pub struct CsvExportService {
    repository: LogbookRepository,
    sink: Arc<dyn FileSink>,
    share: Arc<dyn ShareSurface>,
    clock: Arc<dyn Clock>,
}

impl CsvExportService {
    pub fn new(
        repository: LogbookRepository,
        sink: Arc<dyn FileSink>,
        share: Arc<dyn ShareSurface>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            sink,
            share,
            clock,
        }
    }

    /// Loads and merges every list covered by `target`, newest first.
    pub async fn build_table(
        &self,
        student: &StudentId,
        target: &ExportTarget,
        registry: &SessionRegistry,
    ) -> Result<ExportTable> {
        let mut table = ExportTable::new(target.has_session_column());

        let scopes: Vec<LogScope> = match target {
            ExportTarget::Session(session) => {
                vec![LogScope::session(student.clone(), session.clone())]
            }
            ExportTarget::AllSessions => registry
                .ids()
                .map(|id| LogScope::session(student.clone(), id.clone()))
                .collect(),
            ExportTarget::StudentOnly => vec![LogScope::student_only(student.clone())],
        };

        for scope in &scopes {
            let logs = self.repository.load_pair(scope).await?;
            table.extend(rows_from_pair(scope, &logs));
        }

        table.sort_newest_first();
        Ok(table)
    }

    /// Runs a full export: load, merge, serialize, write, share.
    pub async fn export(
        &self,
        student: &StudentId,
        target: &ExportTarget,
        registry: &SessionRegistry,
    ) -> Result<ExportOutcome> {
        if matches!(target, ExportTarget::AllSessions) && registry.is_empty() {
            tracing::info!(student_id = %student, "No sessions to export");
            return Ok(ExportOutcome::NoSessions);
        }

        let table = self.build_table(student, target, registry).await?;
        if table.is_empty() {
            tracing::info!(student_id = %student, ?target, "No data to export");
            return Ok(ExportOutcome::NoData);
        }

        let csv = table.to_csv()?;
        let token = self.clock.now().timestamp_millis();
        let path = self
            .sink
            .directory()
            .join(export_file_name(student, target, token));

        tracing::debug!(path = %path.display(), rows = table.len(), "Writing export");
        self.sink.write(&path, &csv).await?;

        let rows = table.len();
        if self.share.is_available().await {
            tracing::debug!(path = %path.display(), "Sharing export");
            self.share.share(&path, &ShareOptions::csv()).await?;
            tracing::info!(path = %path.display(), rows, "Export shared");
            Ok(ExportOutcome::Shared { path, rows })
        } else {
            tracing::info!(path = %path.display(), rows, "Export saved");
            Ok(ExportOutcome::Saved { path, rows })
        }
    }
}
