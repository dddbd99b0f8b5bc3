use attnlog_core::ids::{SessionId, StudentId};
use attnlog_core::log::{Action, LogPair, LogRecord};
use attnlog_core::session::{Session, SessionRegistry};
use attnlog_core::store::LogScope;
use serde::Serialize;
use std::fmt;

/// Observable phase of the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NoIdentity,
    NoSession,
    ActiveSession,
}

/// The lists currently being logged to.
#[derive(Debug, Clone)]
pub(crate) struct ActiveScope {
    pub scope: LogScope,
    pub logs: LogPair,
}

#[derive(Debug, Clone)]
pub(crate) enum State {
    NoIdentity,
    HasIdentity {
        student: StudentId,
        registry: SessionRegistry,
        active: Option<ActiveScope>,
    },
}

/// Non-fatal problem surfaced to the user, typically a failed read that
/// fell back to an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextWarning(pub String);

impl fmt::Display for ContextWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of [`super::SessionContext::request_undo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoRequest {
    NothingToUndo,
    NeedsConfirmation(attnlog_core::confirm::ConfirmationToken),
}

/// What a confirmed destructive action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmed {
    Undone(LogRecord),
    SessionDeleted(SessionId),
    IdentityReset,
}

/// Read-only view of the context for display.
#[derive(Debug, Clone, Serialize)]
pub struct ContextSnapshot {
    pub phase: Phase,
    pub student_id: Option<String>,
    pub session_id: Option<String>,
    pub sessions: Vec<SessionSummary>,
    pub attentive: Vec<LogRecord>,
    pub bored: Vec<LogRecord>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: String,
    pub created_at: String,
    pub last_accessed: String,
}

impl From<&Session> for SessionSummary {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id.to_string(),
            created_at: session.created_at.to_rfc3339(),
            last_accessed: session.last_accessed.to_rfc3339(),
        }
    }
}

impl ContextSnapshot {
    pub fn count(&self, action: Action) -> usize {
        match action {
            Action::Attentive => self.attentive.len(),
            Action::Bored => self.bored.len(),
        }
    }
}
