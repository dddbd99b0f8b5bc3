use crate::runtime::Runtime;
use anyhow::Result;
use attnlog_application::ExportOutcome;
use attnlog_core::config::ScopeMode;
use attnlog_core::ids::SessionId;

/// Exports the named session, every session (`--all`), the active session,
/// or in session-less mode the student's two lists.
pub async fn run(runtime: &Runtime, session: Option<&str>, all: bool) -> Result<()> {
    let context = &runtime.context;
    let exporter = &runtime.exporter;

    let outcome = if context.mode() == ScopeMode::SessionLess {
        context.export_student(exporter).await?
    } else if all {
        context.export_all_sessions(exporter).await?
    } else {
        let session = match session {
            Some(raw) => SessionId::parse(raw)?,
            None => context
                .active_session()
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("No active session; pass --session <ID> or --all"))?,
        };
        context.export_session(exporter, &session).await?
    };

    match outcome {
        ExportOutcome::NoSessions => println!("No sessions to export."),
        ExportOutcome::NoData => println!("No data to export."),
        ExportOutcome::Shared { path, rows } | ExportOutcome::Saved { path, rows } => {
            println!("Exported {} row(s) to {}", rows, path.display())
        }
    }
    Ok(())
}
