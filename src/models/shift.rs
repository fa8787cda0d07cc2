//! Shift model.
//!
//! A shift is a reconstructed (IN, OUT) interval. Shifts are never persisted:
//! they exist only for the duration of one aggregation call.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EmployeeId;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Returns the fractional hours between two instants.
///
/// The reconstructor only pairs an IN with a later OUT, so callers see a
/// non-negative duration; a reversed interval is clamped to zero.
///
/// # Examples
///
/// ```
/// use attendance_engine::models::hours_between;
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let start = Utc.with_ymd_and_hms(2026, 1, 15, 8, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap();
/// assert_eq!(hours_between(start, end), Decimal::new(15, 1)); // 1.5 hours
/// ```
pub fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> Decimal {
    let millis = (end - start).num_milliseconds().max(0);
    Decimal::from(millis) / Decimal::from(MILLIS_PER_HOUR)
}

/// Represents a closed work interval for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// The employee who worked the shift.
    pub employee_id: EmployeeId,
    /// Timestamp of the IN event that opened the shift.
    pub start: DateTime<Utc>,
    /// Timestamp of the OUT event that closed the shift.
    pub end: DateTime<Utc>,
    /// Worked hours, `end - start` in fractional hours.
    pub hours: Decimal,
}

impl Shift {
    /// Creates a shift and derives its duration.
    pub fn new(employee_id: EmployeeId, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            employee_id,
            start,
            end,
            hours: hours_between(start, end),
        }
    }

    /// Returns the local calendar date the shift started on.
    pub fn start_date(&self, offset: FixedOffset) -> NaiveDate {
        self.start.with_timezone(&offset).date_naive()
    }

    /// Returns the ISO week (year, week number) the shift is attributed to.
    pub fn iso_week(&self, offset: FixedOffset) -> (i32, u32) {
        let week = self.start_date(offset).iso_week();
        (week.year(), week.week())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, day, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_seven_hour_shift() {
        let shift = Shift::new(1, at(15, 8, 0), at(15, 15, 0));
        assert_eq!(shift.hours, Decimal::new(7, 0));
    }

    #[test]
    fn test_overnight_shift() {
        let shift = Shift::new(1, at(15, 22, 0), at(16, 6, 0));
        assert_eq!(shift.hours, Decimal::new(8, 0));
    }

    #[test]
    fn test_quarter_hour_precision() {
        let shift = Shift::new(1, at(15, 9, 0), at(15, 17, 15));
        assert_eq!(shift.hours, Decimal::new(825, 2));
    }

    #[test]
    fn test_zero_duration_shift() {
        let shift = Shift::new(1, at(15, 9, 0), at(15, 9, 0));
        assert_eq!(shift.hours, Decimal::ZERO);
    }

    #[test]
    fn test_reversed_interval_clamps_to_zero() {
        assert_eq!(hours_between(at(15, 10, 0), at(15, 9, 0)), Decimal::ZERO);
    }

    #[test]
    fn test_iso_week_uses_local_start() {
        // 2026-01-18 23:30 UTC is Monday 2026-01-19 00:30 at UTC+1.
        let shift = Shift::new(1, at(18, 23, 30), at(19, 1, 0));
        assert_eq!(shift.iso_week(FixedOffset::east_opt(0).unwrap()), (2026, 3));
        assert_eq!(shift.iso_week(FixedOffset::east_opt(3600).unwrap()), (2026, 4));
    }

    #[test]
    fn test_shift_serialization() {
        let shift = Shift::new(1, at(15, 8, 0), at(15, 15, 0));
        let json = serde_json::to_string(&shift).unwrap();
        let deserialized: Shift = serde_json::from_str(&json).unwrap();
        assert_eq!(shift, deserialized);
    }
}
