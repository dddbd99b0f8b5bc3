//! Flat export rows.

use crate::log::{Action, LogPair};
use crate::store::LogScope;
use serde::{Deserialize, Serialize};

/// One CSV data row.
///
/// `session_id` is `None` for rows produced in the session-less variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    pub student_id: String,
    pub session_id: Option<String>,
    pub action: Action,
    pub timestamp: String,
}

/// Maps both lists of `scope` to rows, attentive list first.
pub fn rows_from_pair(scope: &LogScope, logs: &LogPair) -> Vec<ExportRow> {
    Action::ALL
        .iter()
        .flat_map(|action| logs.get(*action).records())
        .map(|record| ExportRow {
            student_id: scope.student.to_string(),
            session_id: scope.session.as_ref().map(|s| s.to_string()),
            action: record.action,
            timestamp: record.timestamp.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{SessionId, StudentId};
    use crate::log::LogRecord;

    #[test]
    fn test_rows_carry_scope() {
        let mut logs = LogPair::empty(10);
        logs.attentive.prepend(LogRecord {
            timestamp: "2026-02-24T10:00:00".into(),
            action: Action::Attentive,
        });
        logs.bored.prepend(LogRecord {
            timestamp: "2026-02-24T10:00:05".into(),
            action: Action::Bored,
        });
        let scope = LogScope::session(
            StudentId::parse("S123").unwrap(),
            SessionId::parse("Lesson1").unwrap(),
        );

        let rows = rows_from_pair(&scope, &logs);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].action, Action::Attentive);
        assert!(rows.iter().all(|r| r.student_id == "S123"));
        assert!(rows.iter().all(|r| r.session_id.as_deref() == Some("Lesson1")));
    }
}
