//! Identity/session context.
//!
//! Owns the active identity, its session registry and the two active log
//! lists, and drives the transitions
//!
//! ```text
//! NoIdentity --submit_identity--> NoSession --create_or_select / open--> ActiveSession
//!                                     ^                                      |
//!                                     +------------change_session------------+
//! any state --reset (confirmed)--> NoIdentity
//! ```
//!
//! In the session-less variant `submit_identity` goes straight to
//! `ActiveSession` with a scope that has no session.
//!
//! Destructive operations are two-phase: `request_*` returns a
//! [`ConfirmationToken`] and nothing is removed until [`SessionContext::confirm`]
//! receives that same token.

mod state;


pub use state::{
    ContextSnapshot, ContextWarning, Confirmed, Phase, SessionSummary, UndoRequest,
};

use crate::export_service::{CsvExportService, ExportOutcome};
use attnlog_core::clock::Clock;
use attnlog_core::config::ScopeMode;
use attnlog_core::confirm::{ConfirmationToken, PendingAction};
use attnlog_core::error::{AttnError, Result};
use attnlog_core::export::ExportTarget;
use attnlog_core::ids::{SessionId, StudentId};
use attnlog_core::log::{Action, LogPair, LogRecord, pick_undo_target};
use attnlog_core::session::{Selection, SessionRegistry};
use attnlog_core::store::LogScope;
use attnlog_core::LogbookRepository;
use state::{ActiveScope, State};
use std::sync::Arc;

/// The single-writer context every user action goes through.
pub struct SessionContext {
    repository: LogbookRepository,
    clock: Arc<dyn Clock>,
    mode: ScopeMode,
    state: State,
    pending: Option<ConfirmationToken>,
    warnings: Vec<ContextWarning>,
}

impl SessionContext {
    pub fn new(repository: LogbookRepository, clock: Arc<dyn Clock>, mode: ScopeMode) -> Self {
        Self {
            repository,
            clock,
            mode,
            state: State::NoIdentity,
            pending: None,
            warnings: Vec::new(),
        }
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    pub fn mode(&self) -> ScopeMode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        match &self.state {
            State::NoIdentity => Phase::NoIdentity,
            State::HasIdentity { active: None, .. } => Phase::NoSession,
            State::HasIdentity { active: Some(_), .. } => Phase::ActiveSession,
        }
    }

    pub fn student(&self) -> Option<&StudentId> {
        match &self.state {
            State::NoIdentity => None,
            State::HasIdentity { student, .. } => Some(student),
        }
    }

    pub fn registry(&self) -> Option<&SessionRegistry> {
        match &self.state {
            State::NoIdentity => None,
            State::HasIdentity { registry, .. } => Some(registry),
        }
    }

    pub fn active_session(&self) -> Option<&SessionId> {
        self.active().and_then(|a| a.scope.session.as_ref())
    }

    /// The active log lists, newest first.
    pub fn logs(&self) -> Option<&LogPair> {
        self.active().map(|a| &a.logs)
    }

    /// Drains warnings accumulated since the last call.
    pub fn take_warnings(&mut self) -> Vec<ContextWarning> {
        std::mem::take(&mut self.warnings)
    }

    pub fn snapshot(&self) -> ContextSnapshot {
        let (attentive, bored) = match self.logs() {
            Some(logs) => (
                logs.attentive.records().to_vec(),
                logs.bored.records().to_vec(),
            ),
            None => (Vec::new(), Vec::new()),
        };
        ContextSnapshot {
            phase: self.phase(),
            student_id: self.student().map(|s| s.to_string()),
            session_id: self.active_session().map(|s| s.to_string()),
            sessions: self
                .registry()
                .map(|r| r.sessions().iter().map(Into::into).collect())
                .unwrap_or_default(),
            attentive,
            bored,
        }
    }

    fn active(&self) -> Option<&ActiveScope> {
        match &self.state {
            State::HasIdentity { active, .. } => active.as_ref(),
            State::NoIdentity => None,
        }
    }

    fn active_mut(&mut self) -> Result<&mut ActiveScope> {
        match &mut self.state {
            State::HasIdentity {
                active: Some(active),
                ..
            } => Ok(active),
            _ => Err(AttnError::invalid_state("No active session")),
        }
    }

    fn require_student(&self) -> Result<StudentId> {
        self.student()
            .cloned()
            .ok_or_else(|| AttnError::invalid_state("No student ID set"))
    }

    fn require_session_scoped(&self) -> Result<()> {
        match self.mode {
            ScopeMode::SessionScoped => Ok(()),
            ScopeMode::SessionLess => Err(AttnError::invalid_state(
                "Sessions are disabled in session-less mode",
            )),
        }
    }

    fn warn(&mut self, message: String) {
        tracing::warn!("{}", message);
        self.warnings.push(ContextWarning(message));
    }

    // ============================================================================
    // Startup and identity
    // ============================================================================

    /// Restores the persisted identity (and active session, if any).
    ///
    /// Read failures fall back to the empty value and are reported through
    /// [`SessionContext::take_warnings`]; they never abort startup.
    pub async fn restore(&mut self) {
        let student = match self.repository.load_identity().await {
            Ok(Some(student)) => student,
            Ok(None) => {
                tracing::debug!("No persisted student ID");
                return;
            }
            Err(e) => {
                self.warn(format!("Failed to load student ID: {}", e));
                return;
            }
        };

        tracing::info!(student_id = %student, "Restoring student");
        self.enter_identity(student).await;

        if self.mode != ScopeMode::SessionScoped {
            return;
        }

        let session = match self.repository.load_active_session().await {
            Ok(Some(session)) => session,
            Ok(None) => return,
            Err(e) => {
                self.warn(format!("Failed to load active session: {}", e));
                return;
            }
        };

        let known = self.registry().is_some_and(|r| r.contains(&session));
        if known {
            self.enter_session(session).await;
        } else {
            self.warn(format!(
                "Active session '{}' is not in the registry, ignoring it",
                session
            ));
            if let Err(e) = self.repository.remove_active_session().await {
                tracing::warn!("Failed to clear dangling active session: {}", e);
            }
        }
    }

    /// Sets the student identity from raw input.
    ///
    /// Only allowed while no identity is active. The registry (or, in the
    /// session-less variant, the two log lists) is loaded on entry.
    pub async fn submit_identity(&mut self, input: &str) -> Result<()> {
        let student = StudentId::parse(input)?;
        if let State::HasIdentity { student: current, .. } = &self.state {
            return Err(AttnError::invalid_state(format!(
                "Student ID '{}' is already set; reset it first",
                current
            )));
        }

        self.repository.save_identity(&student).await?;
        tracing::info!(student_id = %student, "Student ID set");
        self.enter_identity(student).await;
        Ok(())
    }

    async fn enter_identity(&mut self, student: StudentId) {
        let registry = match self.mode {
            ScopeMode::SessionScoped => match self.repository.load_registry(&student).await {
                Ok(registry) => registry,
                Err(e) => {
                    self.warn(format!("Failed to load sessions: {}", e));
                    SessionRegistry::new()
                }
            },
            ScopeMode::SessionLess => SessionRegistry::new(),
        };

        let active = match self.mode {
            ScopeMode::SessionScoped => None,
            ScopeMode::SessionLess => {
                let scope = LogScope::student_only(student.clone());
                let logs = self.load_logs_or_empty(&scope).await;
                Some(ActiveScope { scope, logs })
            }
        };

        self.pending = None;
        self.state = State::HasIdentity {
            student,
            registry,
            active,
        };
    }

    async fn load_logs_or_empty(&mut self, scope: &LogScope) -> LogPair {
        match self.repository.load_pair(scope).await {
            Ok(logs) => logs,
            Err(e) => {
                self.warn(format!("Failed to load logs: {}", e));
                LogPair::empty(self.repository.max_entries())
            }
        }
    }

    // ============================================================================
    // Sessions
    // ============================================================================

    /// Creates a new session or refreshes an existing one, then makes it
    /// active.
    pub async fn create_or_select_session(&mut self, input: &str) -> Result<Selection> {
        self.require_session_scoped()?;
        let session = SessionId::parse(input)?;
        let student = self.require_student()?;

        let mut registry = self.registry().cloned().unwrap_or_default();
        let selection = registry.create_or_select(&session, self.clock.now());
        self.repository.save_registry(&student, &registry).await?;

        if let State::HasIdentity { registry: current, .. } = &mut self.state {
            *current = registry;
        }
        tracing::info!(student_id = %student, session_id = %session, ?selection, "Session selected");

        self.enter_session(session).await;
        Ok(selection)
    }

    /// Activates a session from the registry without touching its
    /// `last_accessed`.
    pub async fn open_session(&mut self, session: &SessionId) -> Result<()> {
        self.require_session_scoped()?;
        self.require_student()?;
        let known = self.registry().is_some_and(|r| r.contains(session));
        if !known {
            return Err(AttnError::not_found("session", session.to_string()));
        }
        self.enter_session(session.clone()).await;
        Ok(())
    }

    async fn enter_session(&mut self, session: SessionId) {
        let Some(student) = self.student().cloned() else {
            return;
        };
        let scope = LogScope::session(student, session.clone());
        let logs = self.load_logs_or_empty(&scope).await;

        if let Err(e) = self.repository.save_active_session(&session).await {
            self.warn(format!(
                "Failed to save active session '{}', it will not be resumed: {}",
                session, e
            ));
        }

        self.pending = None;
        if let State::HasIdentity { active, .. } = &mut self.state {
            *active = Some(ActiveScope { scope, logs });
        }
    }

    /// Leaves the active session and returns to session selection.
    pub async fn change_session(&mut self) -> Result<()> {
        self.require_session_scoped()?;
        self.active_mut()?;
        self.leave_session().await;
        Ok(())
    }

    async fn leave_session(&mut self) {
        if let State::HasIdentity { active, .. } = &mut self.state {
            *active = None;
        }
        self.pending = None;
        if let Err(e) = self.repository.remove_active_session().await {
            tracing::warn!("Failed to clear active session: {}", e);
        }
    }

    // ============================================================================
    // Logging
    // ============================================================================

    /// Appends a record of `action` stamped with the current time.
    ///
    /// The in-memory list is updated before the write; if the write fails the
    /// error is returned and the in-memory list keeps the attempted record.
    pub async fn record(&mut self, action: Action) -> Result<LogRecord> {
        let record = LogRecord::stamped(action, self.clock.now());
        self.pending = None;

        let active = self.active_mut()?;
        let list = active.logs.get_mut(action);
        list.prepend(record.clone());
        let snapshot = list.clone();
        let scope = active.scope.clone();

        tracing::debug!(action = %action, timestamp = %record.timestamp, "Recording");
        self.repository.save_log(&scope, action, &snapshot).await?;
        Ok(record)
    }

    // ============================================================================
    // Destructive actions (two-phase)
    // ============================================================================

    /// Prepares removal of the most recent record across both lists.
    pub fn request_undo(&mut self) -> Result<UndoRequest> {
        let logs = &self.active_mut()?.logs;
        let Some(action) = pick_undo_target(logs) else {
            self.pending = None;
            return Ok(UndoRequest::NothingToUndo);
        };
        let record = logs
            .get(action)
            .head()
            .cloned()
            .ok_or_else(|| AttnError::internal("Undo target list is empty"))?;

        let token = self.arm(PendingAction::Undo { action, record });
        Ok(UndoRequest::NeedsConfirmation(token))
    }

    /// Prepares deletion of a session and its two log lists.
    pub fn request_delete_session(&mut self, session: &SessionId) -> Result<ConfirmationToken> {
        self.require_session_scoped()?;
        self.require_student()?;
        let known = self.registry().is_some_and(|r| r.contains(session));
        if !known {
            return Err(AttnError::not_found("session", session.to_string()));
        }
        Ok(self.arm(PendingAction::DeleteSession(session.clone())))
    }

    /// Prepares removal of the identity and everything it owns.
    pub fn request_reset_identity(&mut self) -> Result<ConfirmationToken> {
        let student = self.require_student()?;
        Ok(self.arm(PendingAction::ResetIdentity(student)))
    }

    fn arm(&mut self, action: PendingAction) -> ConfirmationToken {
        let token = ConfirmationToken::new(action);
        self.pending = Some(token.clone());
        token
    }

    /// Declines a pending action. No side effects.
    pub fn cancel(&mut self, token: &ConfirmationToken) {
        if self.pending.as_ref().is_some_and(|p| p.id() == token.id()) {
            tracing::debug!(token = %token.id(), "Confirmation declined");
            self.pending = None;
        }
    }

    /// Commits a pending destructive action.
    ///
    /// The token must be the one most recently issued and nothing may have
    /// changed the context since; otherwise nothing is removed.
    pub async fn confirm(&mut self, token: ConfirmationToken) -> Result<Confirmed> {
        if !self.pending.as_ref().is_some_and(|p| p.id() == token.id()) {
            return Err(AttnError::confirmation(
                "Token is stale or was never issued",
            ));
        }
        self.pending = None;

        match token.action().clone() {
            PendingAction::Undo { action, record } => self.commit_undo(action, record).await,
            PendingAction::DeleteSession(session) => self.commit_delete_session(session).await,
            PendingAction::ResetIdentity(student) => self.commit_reset(student).await,
        }
    }

    async fn commit_undo(&mut self, action: Action, expected: LogRecord) -> Result<Confirmed> {
        let active = self.active_mut()?;
        if active.logs.get(action).head() != Some(&expected) {
            return Err(AttnError::confirmation("Log changed since undo was requested"));
        }

        let mut list = active.logs.get(action).clone();
        let removed = list
            .pop_head()
            .ok_or_else(|| AttnError::internal("Undo target list is empty"))?;
        let scope = active.scope.clone();

        self.repository.save_log(&scope, action, &list).await?;

        *self.active_mut()?.logs.get_mut(action) = list;
        tracing::info!(action = %action, timestamp = %removed.timestamp, "Undid last log");
        Ok(Confirmed::Undone(removed))
    }

    async fn commit_delete_session(&mut self, session: SessionId) -> Result<Confirmed> {
        let student = self.require_student()?;
        let mut registry = self.registry().cloned().unwrap_or_default();
        if registry.remove(&session).is_none() {
            return Err(AttnError::not_found("session", session.to_string()));
        }

        // Log keys before the registry, so a failed removal leaves the session
        // registered and still reachable by export and reset.
        self.repository
            .remove_pair(&LogScope::session(student.clone(), session.clone()))
            .await?;
        self.repository.save_registry(&student, &registry).await?;
        if let State::HasIdentity { registry: current, .. } = &mut self.state {
            *current = registry;
        }

        if self.active_session() == Some(&session) {
            self.leave_session().await;
        }

        tracing::info!(student_id = %student, session_id = %session, "Session deleted");
        Ok(Confirmed::SessionDeleted(session))
    }

    /// Removes every key the identity owns, then the identity itself.
    ///
    /// Not transactional: if a removal fails midway the error is returned,
    /// earlier keys stay removed and the in-memory state is left unchanged.
    async fn commit_reset(&mut self, student: StudentId) -> Result<Confirmed> {
        let registry = self.registry().cloned().unwrap_or_default();

        for session in registry.ids() {
            self.repository
                .remove_pair(&LogScope::session(student.clone(), session.clone()))
                .await?;
        }
        if self.mode == ScopeMode::SessionLess {
            self.repository
                .remove_pair(&LogScope::student_only(student.clone()))
                .await?;
        }
        self.repository.remove_registry(&student).await?;
        self.repository.remove_active_session().await?;
        self.repository.remove_identity().await?;

        self.state = State::NoIdentity;
        self.pending = None;
        tracing::info!(student_id = %student, sessions = registry.len(), "Student reset");
        Ok(Confirmed::IdentityReset)
    }

    // ============================================================================
    // Export
    // ============================================================================

    /// Exports one session of the current student.
    pub async fn export_session(
        &self,
        exporter: &CsvExportService,
        session: &SessionId,
    ) -> Result<ExportOutcome> {
        self.require_session_scoped()?;
        let student = self.require_student()?;
        let registry = self.registry().cloned().unwrap_or_default();
        if !registry.contains(session) {
            return Err(AttnError::not_found("session", session.to_string()));
        }
        exporter
            .export(&student, &ExportTarget::Session(session.clone()), &registry)
            .await
    }

    /// Exports every session of the current student.
    pub async fn export_all_sessions(&self, exporter: &CsvExportService) -> Result<ExportOutcome> {
        self.require_session_scoped()?;
        let student = self.require_student()?;
        let registry = self.registry().cloned().unwrap_or_default();
        exporter
            .export(&student, &ExportTarget::AllSessions, &registry)
            .await
    }

    /// Exports the student's two lists in the session-less variant.
    pub async fn export_student(&self, exporter: &CsvExportService) -> Result<ExportOutcome> {
        if self.mode != ScopeMode::SessionLess {
            return Err(AttnError::invalid_state(
                "Whole-student export without sessions needs session-less mode",
            ));
        }
        let student = self.require_student()?;
        exporter
            .export(&student, &ExportTarget::StudentOnly, &SessionRegistry::new())
            .await
    }
}
