//! Export rows.
//!
//! Rows carry display-ready strings. Dates and times are formatted once,
//! here, with a fixed offset and fixed patterns, so the writer never depends
//! on the host locale or time zone.

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ClockEvent, ClockKind, Employee, EventId};

/// How timestamps are rendered in exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFormat {
    /// Offset applied before formatting.
    pub offset: FixedOffset,
    /// `chrono` pattern for the date column.
    pub date_format: String,
    /// `chrono` pattern for the time column.
    pub time_format: String,
}

impl Default for ExportFormat {
    fn default() -> Self {
        Self {
            offset: Utc.fix(),
            date_format: "%d/%m/%Y".to_string(),
            time_format: "%H:%M:%S".to_string(),
        }
    }
}

/// One exported clock event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    /// Event id.
    pub id: EventId,
    /// Formatted local date.
    pub date: String,
    /// Formatted local time.
    pub time: String,
    /// Employee display name.
    pub employee_name: String,
    /// Employee access code.
    pub employee_code: String,
    /// IN or OUT.
    pub kind: ClockKind,
    /// Whether a photo was attached.
    pub has_photo: bool,
}

impl ExportRow {
    /// Builds a row from an event and the employee who recorded it.
    pub fn from_event(event: &ClockEvent, employee: &Employee, format: &ExportFormat) -> Self {
        let local = event.local_timestamp(format.offset);
        Self {
            id: event.id,
            date: local.format(&format.date_format).to_string(),
            time: local.format(&format.time_format).to_string(),
            employee_name: employee.name.clone(),
            employee_code: employee.code.clone(),
            kind: event.kind,
            has_photo: event.has_photo(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use chrono::TimeZone;

    fn employee() -> Employee {
        Employee {
            id: 3,
            code: "mario".to_string(),
            name: "Rossi, Mario".to_string(),
            role: Role::Worker,
            hourly_wage: None,
        }
    }

    fn event(photo_ref: Option<&str>) -> ClockEvent {
        ClockEvent {
            id: 41,
            employee_id: 3,
            kind: ClockKind::In,
            timestamp: Utc.with_ymd_and_hms(2026, 1, 15, 7, 5, 9).unwrap(),
            photo_ref: photo_ref.map(str::to_string),
        }
    }

    #[test]
    fn test_default_format() {
        let row = ExportRow::from_event(&event(None), &employee(), &ExportFormat::default());
        assert_eq!(row.date, "15/01/2026");
        assert_eq!(row.time, "07:05:09");
        assert_eq!(row.employee_name, "Rossi, Mario");
        assert!(!row.has_photo);
    }

    #[test]
    fn test_offset_can_change_the_date() {
        let format = ExportFormat {
            offset: FixedOffset::west_opt(8 * 3600).unwrap(),
            ..ExportFormat::default()
        };
        let row = ExportRow::from_event(&event(Some("/uploads/41.jpg")), &employee(), &format);
        assert_eq!(row.date, "14/01/2026");
        assert_eq!(row.time, "23:05:09");
        assert!(row.has_photo);
    }
}
