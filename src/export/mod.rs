//! Report export for the Attendance Engine.
//!
//! Raw clock events are turned into display-ready [`ExportRow`]s and then
//! serialized to CSV for download.

mod row;
mod writer;

pub use row::{ExportFormat, ExportRow};
pub use writer::{CSV_HEADER, export_csv};
