//! CSV serialization of export rows.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::{EngineError, EngineResult};

use super::row::ExportRow;

/// Header of the export, in column order.
pub const CSV_HEADER: [&str; 7] = [
    "ID",
    "Date",
    "Time",
    "EmployeeName",
    "EmployeeCode",
    "Action",
    "PhotoPresent",
];

/// Renders rows as CSV text, in the order given.
///
/// The employee name is always quoted, with embedded quotes doubled. The
/// other columns are written as they are: ids, dates, times and codes never
/// contain separators. Identical input yields byte-identical output.
///
/// # Example
///
/// ```
/// use attendance_engine::export::{ExportRow, export_csv};
/// use attendance_engine::models::ClockKind;
///
/// let rows = vec![ExportRow {
///     id: 1,
///     date: "15/01/2026".to_string(),
///     time: "08:00:00".to_string(),
///     employee_name: "Mario Rossi".to_string(),
///     employee_code: "mario".to_string(),
///     kind: ClockKind::In,
///     has_photo: true,
/// }];
///
/// let csv = export_csv(&rows).unwrap();
/// assert_eq!(
///     csv,
///     "ID,Date,Time,EmployeeName,EmployeeCode,Action,PhotoPresent\n\
///      1,15/01/2026,08:00:00,\"Mario Rossi\",mario,ENTRATA,SI\n"
/// );
/// ```
pub fn export_csv(rows: &[ExportRow]) -> EngineResult<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.write_record([
            row.id.to_string(),
            row.date.clone(),
            row.time.clone(),
            quote_name(&row.employee_name),
            row.employee_code.clone(),
            row.kind.report_label().to_string(),
            photo_flag(row.has_photo).to_string(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })
}

fn quote_name(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn photo_flag(has_photo: bool) -> &'static str {
    if has_photo { "SI" } else { "NO" }
}
