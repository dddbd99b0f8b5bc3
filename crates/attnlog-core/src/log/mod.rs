//! Log domain module.
//!
//! # Module Structure
//!
//! - `model`: `Action` labels and the immutable `LogRecord`
//! - `list`: bounded newest-first `LogList` and the per-scope `LogPair`
//! - `undo`: selection and removal of the most recent record across a pair

mod list;
mod model;
mod undo;

pub use list::{DEFAULT_MAX_ENTRIES, LogList, LogPair};
pub use model::{Action, LogRecord, TIMESTAMP_FORMAT};
pub use undo::{pick_undo_target, undo_last};
