//! Log record domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Second-precision ISO-8601 layout without zone suffix.
///
/// Fixed width and zero padded, so string order equals time order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One of the two observable behaviours.
///
/// Persisted and exported by their Greek labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// "I am paying attention"
    #[serde(rename = "ΠΡΟΣΕΧΩ")]
    Attentive,
    /// "I am bored"
    #[serde(rename = "ΒΑΡΙΕΜΑΙ")]
    Bored,
}

impl Action {
    /// Both kinds, attentive first. Undo tie-breaks follow this order.
    pub const ALL: [Action; 2] = [Action::Attentive, Action::Bored];

    /// The label written to the store and to CSV.
    pub fn label(self) -> &'static str {
        match self {
            Action::Attentive => "ΠΡΟΣΕΧΩ",
            Action::Bored => "ΒΑΡΙΕΜΑΙ",
        }
    }

    /// Suffix of the store key holding this kind's log list.
    pub fn key_suffix(self) -> &'static str {
        match self {
            Action::Attentive => "prosekho",
            Action::Bored => "variemai",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single timestamped observation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: String,
    pub action: Action,
}

impl LogRecord {
    /// Creates a record stamped with `at`, truncated to whole seconds.
    pub fn stamped(action: Action, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_stamped_truncates_to_seconds() {
        let at = Utc
            .with_ymd_and_hms(2026, 2, 24, 10, 0, 5)
            .unwrap()
            .checked_add_signed(chrono::Duration::milliseconds(987))
            .unwrap();
        let record = LogRecord::stamped(Action::Bored, at);
        assert_eq!(record.timestamp, "2026-02-24T10:00:05");
    }

    #[test]
    fn test_persisted_shape() {
        let record = LogRecord {
            timestamp: "2026-02-24T10:00:00".to_string(),
            action: Action::Attentive,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"timestamp":"2026-02-24T10:00:00","action":"ΠΡΟΣΕΧΩ"}"#
        );
        let back: LogRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let result = serde_json::from_str::<LogRecord>(
            r#"{"timestamp":"2026-02-24T10:00:00","action":"ΚΟΙΜΑΜΑΙ"}"#,
        );
        assert!(result.is_err());
    }
}
