//! Bounded, newest-first log list.

use super::model::{Action, LogRecord};

/// Default history cap per list.
pub const DEFAULT_MAX_ENTRIES: usize = 200;

/// The records of one action kind inside one scope, newest first.
///
/// Inserting beyond `cap` silently drops the oldest records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogList {
    records: Vec<LogRecord>,
    cap: usize,
}

impl LogList {
    pub fn new(cap: usize) -> Self {
        Self {
            records: Vec::new(),
            cap,
        }
    }

    /// Wraps records loaded from the store.
    ///
    /// Loaded data is kept as-is; the cap applies from the next prepend.
    pub fn from_records(records: Vec<LogRecord>, cap: usize) -> Self {
        Self { records, cap }
    }

    /// Puts `record` at the head and truncates to the cap.
    pub fn prepend(&mut self, record: LogRecord) {
        self.records.insert(0, record);
        self.records.truncate(self.cap);
    }

    /// The most recent record.
    pub fn head(&self) -> Option<&LogRecord> {
        self.records.first()
    }

    /// Removes and returns the most recent record.
    pub fn pop_head(&mut self) -> Option<LogRecord> {
        if self.records.is_empty() {
            None
        } else {
            Some(self.records.remove(0))
        }
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }
}

/// The two lists of one scope, addressed by action kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogPair {
    pub attentive: LogList,
    pub bored: LogList,
}

impl LogPair {
    pub fn empty(cap: usize) -> Self {
        Self {
            attentive: LogList::new(cap),
            bored: LogList::new(cap),
        }
    }

    pub fn get(&self, action: Action) -> &LogList {
        match action {
            Action::Attentive => &self.attentive,
            Action::Bored => &self.bored,
        }
    }

    pub fn get_mut(&mut self, action: Action) -> &mut LogList {
        match action {
            Action::Attentive => &mut self.attentive,
            Action::Bored => &mut self.bored,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.attentive.is_empty() && self.bored.is_empty()
    }

    pub fn clear(&mut self) {
        self.attentive.clear();
        self.bored.clear();
    }
}
