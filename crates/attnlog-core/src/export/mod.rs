//! CSV export domain module.
//!
//! - `row`: flat `ExportRow` and mapping from a scope's log pair
//! - `table`: merged `ExportTable`, newest-first sort, CSV serialization, file naming
//! - `sink`: `FileSink` and `ShareSurface` ports

mod row;
mod sink;
mod table;

pub use row::{ExportRow, rows_from_pair};
pub use sink::{FileSink, ShareOptions, ShareSurface};
pub use table::{ExportTable, ExportTarget, export_file_name};
