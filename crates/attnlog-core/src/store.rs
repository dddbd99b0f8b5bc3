//! Keyed store port and the structured key scheme.
//!
//! The underlying store is a flat string-to-string map. The two-level
//! namespace (student, session, log kind) is expressed as [`StoreKey`] and
//! only flattened to a string at this boundary.

use crate::error::Result;
use crate::ids::{SessionId, StudentId};
use crate::log::Action;
use async_trait::async_trait;
use std::fmt;

/// An asynchronous get/set/remove-by-key string store.
///
/// Implementations must treat removal of a missing key as success.
#[async_trait]
pub trait KeyedStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;
}

/// The scope a pair of log lists belongs to.
///
/// `session` is `None` in the session-less variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogScope {
    pub student: StudentId,
    pub session: Option<SessionId>,
}

impl LogScope {
    pub fn session(student: StudentId, session: SessionId) -> Self {
        Self {
            student,
            session: Some(session),
        }
    }

    pub fn student_only(student: StudentId) -> Self {
        Self {
            student,
            session: None,
        }
    }
}

/// Every key the application reads or writes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// The single active student on this device.
    Identity,
    /// The session that was active when the process last ran.
    ActiveSession,
    /// JSON array of sessions for a student.
    Registry(StudentId),
    /// JSON array of log records for one action kind in a scope.
    Log { scope: LogScope, action: Action },
}

impl StoreKey {
    pub fn log(scope: &LogScope, action: Action) -> Self {
        Self::Log {
            scope: scope.clone(),
            action,
        }
    }

    /// The flattened key written to the store.
    pub fn as_key(&self) -> String {
        match self {
            StoreKey::Identity => "studentId".to_string(),
            StoreKey::ActiveSession => "activeSession".to_string(),
            StoreKey::Registry(student) => format!("{}_sessions", student),
            StoreKey::Log { scope, action } => match &scope.session {
                Some(session) => format!("{}_{}_{}", scope.student, session, action.key_suffix()),
                None => format!("{}_{}", scope.student, action.key_suffix()),
            },
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_key())
    }
}
