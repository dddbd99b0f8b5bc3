//! Merged, sorted export table and its CSV serialization.

use super::row::ExportRow;
use crate::error::{AttnError, Result};
use crate::ids::{SessionId, StudentId};

/// What an export covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    /// One session of a student.
    Session(SessionId),
    /// Every session in the student's registry.
    AllSessions,
    /// The student's two lists in the session-less variant.
    StudentOnly,
}

impl ExportTarget {
    /// Whether rows carry a `session_id` column.
    pub fn has_session_column(&self) -> bool {
        !matches!(self, ExportTarget::StudentOnly)
    }
}

/// Rows from one or many scopes, merged into a single table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    with_session: bool,
    rows: Vec<ExportRow>,
}

impl ExportTable {
    pub fn new(with_session: bool) -> Self {
        Self {
            with_session,
            rows: Vec::new(),
        }
    }

    pub fn extend(&mut self, rows: impl IntoIterator<Item = ExportRow>) {
        self.rows.extend(rows);
    }

    /// Sorts newest first by timestamp string.
    ///
    /// The sort is stable: rows with equal timestamps keep insertion order.
    pub fn sort_newest_first(&mut self) {
        self.rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    }

    pub fn rows(&self) -> &[ExportRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn header(&self) -> &'static [&'static str] {
        if self.with_session {
            &["student_id", "session_id", "action", "timestamp"]
        } else {
            &["student_id", "action", "timestamp"]
        }
    }

    /// Serializes the table as CSV with CRLF record terminators.
    ///
    /// Fields containing the delimiter, a quote or a line break are quoted;
    /// embedded quotes are doubled.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_writer(Vec::new());

        writer.write_record(self.header())?;
        for row in &self.rows {
            if self.with_session {
                writer.write_record([
                    row.student_id.as_str(),
                    row.session_id.as_deref().unwrap_or(""),
                    row.action.label(),
                    row.timestamp.as_str(),
                ])?;
            } else {
                writer.write_record([
                    row.student_id.as_str(),
                    row.action.label(),
                    row.timestamp.as_str(),
                ])?;
            }
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AttnError::internal(format!("Failed to flush CSV buffer: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| AttnError::Serialization {
            format: "CSV".to_string(),
            message: e.to_string(),
        })
    }
}

/// Builds the export file name: `logs_{student}_{session|all_sessions}_{token}.csv`.
///
/// `token` is the creation time in epoch milliseconds. Path separators in
/// user-supplied ids are replaced so the name stays a single path component.
pub fn export_file_name(student: &StudentId, target: &ExportTarget, token: i64) -> String {
    let student = path_safe(student.as_str());
    match target {
        ExportTarget::Session(session) => {
            format!("logs_{}_{}_{}.csv", student, path_safe(session.as_str()), token)
        }
        ExportTarget::AllSessions => format!("logs_{}_all_sessions_{}.csv", student, token),
        ExportTarget::StudentOnly => format!("logs_{}_{}.csv", student, token),
    }
}

fn path_safe(raw: &str) -> String {
    raw.chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::Action;

    fn row(session: Option<&str>, action: Action, ts: &str) -> ExportRow {
        ExportRow {
            student_id: "S123".into(),
            session_id: session.map(String::from),
            action,
            timestamp: ts.into(),
        }
    }

    #[test]
    fn test_sort_is_descending_and_stable() {
        let mut table = ExportTable::new(true);
        table.extend([
            row(Some("L"), Action::Attentive, "2026-02-24T10:00:00"),
            row(Some("L"), Action::Attentive, "2026-02-24T10:00:05"),
            row(Some("L"), Action::Bored, "2026-02-24T10:00:05"),
            row(Some("L"), Action::Bored, "2026-02-24T09:59:59"),
        ]);

        table.sort_newest_first();

        let got: Vec<_> = table
            .rows()
            .iter()
            .map(|r| (r.timestamp.as_str(), r.action))
            .collect();
        assert_eq!(
            got,
            vec![
                ("2026-02-24T10:00:05", Action::Attentive),
                ("2026-02-24T10:00:05", Action::Bored),
                ("2026-02-24T10:00:00", Action::Attentive),
                ("2026-02-24T09:59:59", Action::Bored),
            ]
        );
    }

    #[test]
    fn test_csv_with_session_column() {
        let mut table = ExportTable::new(true);
        table.extend([row(Some("Lesson1"), Action::Bored, "2026-02-24T10:00:05")]);

        let csv = table.to_csv().unwrap();

        assert_eq!(
            csv,
            "student_id,session_id,action,timestamp\r\nS123,Lesson1,ΒΑΡΙΕΜΑΙ,2026-02-24T10:00:05\r\n"
        );
    }

    #[test]
    fn test_csv_session_less_shape() {
        let mut table = ExportTable::new(false);
        table.extend([row(None, Action::Attentive, "2026-02-24T10:00:00")]);

        let csv = table.to_csv().unwrap();

        assert!(csv.starts_with("student_id,action,timestamp\r\n"));
        assert!(csv.contains("S123,ΠΡΟΣΕΧΩ,2026-02-24T10:00:00"));
    }

    #[test]
    fn test_csv_quotes_awkward_fields() {
        let mut table = ExportTable::new(true);
        table.extend([ExportRow {
            student_id: "O\"Brien, J".into(),
            session_id: Some("line\nbreak".into()),
            action: Action::Attentive,
            timestamp: "2026-02-24T10:00:00".into(),
        }]);

        let csv = table.to_csv().unwrap();

        assert!(csv.contains("\"O\"\"Brien, J\",\"line\nbreak\",ΠΡΟΣΕΧΩ"));

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[0], "O\"Brien, J");
        assert_eq!(&record[1], "line\nbreak");
    }

    #[test]
    fn test_file_names() {
        let student = StudentId::parse("S123").unwrap();
        let session = SessionId::parse("Lesson1").unwrap();
        assert_eq!(
            export_file_name(&student, &ExportTarget::Session(session), 1771927200000),
            "logs_S123_Lesson1_1771927200000.csv"
        );
        assert_eq!(
            export_file_name(&student, &ExportTarget::AllSessions, 7),
            "logs_S123_all_sessions_7.csv"
        );
        assert_eq!(
            export_file_name(&student, &ExportTarget::StudentOnly, 7),
            "logs_S123_7.csv"
        );
        let odd = StudentId::parse("a/b").unwrap();
        assert_eq!(
            export_file_name(&odd, &ExportTarget::AllSessions, 1),
            "logs_a_b_all_sessions_1.csv"
        );
    }
}
