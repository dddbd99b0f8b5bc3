//! Undo engine: finds and removes the globally most recent record.
//!
//! Only per-list recency is tracked, so the winner is decided by comparing
//! the two heads. On equal timestamps the attentive list wins.

use super::list::LogPair;
use super::model::{Action, LogRecord};

/// Picks the list whose head is the most recent record, or `None` when both
/// lists are empty.
pub fn pick_undo_target(logs: &LogPair) -> Option<Action> {
    match (logs.attentive.head(), logs.bored.head()) {
        (None, None) => None,
        (Some(_), None) => Some(Action::Attentive),
        (None, Some(_)) => Some(Action::Bored),
        (Some(a), Some(b)) => {
            if b.timestamp > a.timestamp {
                Some(Action::Bored)
            } else {
                Some(Action::Attentive)
            }
        }
    }
}

/// Removes the head of the winning list. The other list is untouched.
pub fn undo_last(logs: &mut LogPair) -> Option<LogRecord> {
    let target = pick_undo_target(logs)?;
    logs.get_mut(target).pop_head()
}
