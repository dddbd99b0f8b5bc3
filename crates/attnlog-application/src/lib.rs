//! Application layer of attnlog.
//!
//! - `context`: the identity/session state machine every user action goes through
//! - `export_service`: CSV export from persisted log lists to a file sink

pub mod context;
pub mod export_service;

pub use context::{
    ContextSnapshot, ContextWarning, Confirmed, Phase, SessionContext, SessionSummary,
    UndoRequest,
};
pub use export_service::{CsvExportService, ExportOutcome};
