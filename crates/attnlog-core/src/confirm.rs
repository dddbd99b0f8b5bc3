//! Two-phase confirmation for destructive actions.
//!
//! A destructive operation first yields a [`ConfirmationToken`] describing
//! what would be removed. Nothing changes until the same token is handed
//! back for confirmation; declining simply drops it.

use crate::ids::{SessionId, StudentId};
use crate::log::{Action, LogRecord};
use uuid::Uuid;

/// The destructive operation a token stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Remove the head of the `action` list, currently `record`.
    Undo { action: Action, record: LogRecord },
    /// Remove a session and both of its log lists.
    DeleteSession(SessionId),
    /// Remove the identity and every dependent key.
    ResetIdentity(StudentId),
}

impl PendingAction {
    /// Question to put to the user.
    pub fn prompt(&self) -> String {
        match self {
            PendingAction::Undo { action, record } => {
                format!("Delete the last log: {} at {}?", action, record.timestamp)
            }
            PendingAction::DeleteSession(id) => format!(
                "Delete session \"{}\" and all of its data?",
                id
            ),
            PendingAction::ResetIdentity(id) => format!(
                "This deletes student ID \"{}\" and ALL sessions and data. Continue?",
                id
            ),
        }
    }
}

/// Single-use handle for a pending destructive action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationToken {
    id: Uuid,
    action: PendingAction,
}

impl ConfirmationToken {
    pub fn new(action: PendingAction) -> Self {
        Self {
            id: Uuid::new_v4(),
            action,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn action(&self) -> &PendingAction {
        &self.action
    }

    pub fn prompt(&self) -> String {
        self.action.prompt()
    }
}
