//! Aggregation result models.
//!
//! This module contains the [`Summary`] returned to dashboards and the
//! [`WeeklyBucket`] used by weekly views. Both are derived artifacts that are
//! recomputed from raw events on every request and have no persisted identity.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EmployeeId, Shift};

/// Per-employee totals inside a [`Summary`].
///
/// # Example
///
/// ```
/// use attendance_engine::models::EmployeeTotals;
/// use rust_decimal::Decimal;
///
/// let totals = EmployeeTotals {
///     employee_id: 1,
///     shift_count: 1,
///     total_hours: Decimal::new(7, 0),
///     wage: Decimal::new(700, 2),
///     total_pay: Decimal::new(4900, 2),
/// };
/// assert_eq!(totals.total_pay, Decimal::new(49, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTotals {
    /// The employee these totals belong to.
    pub employee_id: EmployeeId,
    /// Number of closed shifts that contributed.
    pub shift_count: usize,
    /// Sum of worked hours over the shifts.
    pub total_hours: Decimal,
    /// Hourly wage used for valuation.
    pub wage: Decimal,
    /// `total_hours * wage`.
    pub total_pay: Decimal,
}

/// Totals for one or more employees over a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// One row per employee, ordered by employee id.
    pub per_employee: Vec<EmployeeTotals>,
    /// Sum of `total_hours` over all rows.
    pub grand_total_hours: Decimal,
    /// Sum of `total_pay` over all rows.
    pub grand_total_pay: Decimal,
}

impl Summary {
    /// Returns the row for a given employee, if present.
    pub fn for_employee(&self, employee_id: EmployeeId) -> Option<&EmployeeTotals> {
        self.per_employee
            .iter()
            .find(|row| row.employee_id == employee_id)
    }
}

/// A Monday-to-Sunday group of shifts, keyed by the shift start date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyBucket {
    /// Monday 00:00 local time.
    pub week_start: NaiveDateTime,
    /// Sunday 23:59:59.999 local time.
    pub week_end: NaiveDateTime,
    /// Shifts that started within the week, in input order.
    pub shifts: Vec<Shift>,
    /// Sum of the shifts' hours.
    pub total_hours: Decimal,
}

impl WeeklyBucket {
    /// Creates an empty bucket for the week starting on `monday`.
    pub fn starting(monday: NaiveDate) -> Self {
        let week_start = monday.and_time(NaiveTime::MIN);
        let week_end = week_start + TimeDelta::days(7) - TimeDelta::milliseconds(1);
        Self {
            week_start,
            week_end,
            shifts: Vec::new(),
            total_hours: Decimal::ZERO,
        }
    }

    /// Adds a shift to the bucket and updates the total.
    pub fn push(&mut self, shift: Shift) {
        self.total_hours += shift.hours;
        self.shifts.push(shift);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_bucket_bounds() {
        let monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
        let bucket = WeeklyBucket::starting(monday);
        assert_eq!(bucket.week_start.to_string(), "2026-01-12 00:00:00");
        assert_eq!(bucket.week_end.to_string(), "2026-01-18 23:59:59.999");
        assert!(bucket.shifts.is_empty());
    }

    #[test]
    fn test_bucket_push_accumulates_hours() {
        let mut bucket = WeeklyBucket::starting(NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
        let start = Utc.with_ymd_and_hms(2026, 1, 13, 8, 0, 0).unwrap();
        bucket.push(Shift::new(1, start, start + TimeDelta::hours(4)));
        bucket.push(Shift::new(1, start + TimeDelta::days(1), start + TimeDelta::days(1) + TimeDelta::minutes(90)));
        assert_eq!(bucket.shifts.len(), 2);
        assert_eq!(bucket.total_hours, Decimal::new(55, 1));
    }

    #[test]
    fn test_summary_for_employee() {
        let summary = Summary {
            per_employee: vec![EmployeeTotals {
                employee_id: 3,
                shift_count: 2,
                total_hours: Decimal::new(10, 0),
                wage: Decimal::new(8, 0),
                total_pay: Decimal::new(80, 0),
            }],
            grand_total_hours: Decimal::new(10, 0),
            grand_total_pay: Decimal::new(80, 0),
        };
        assert!(summary.for_employee(3).is_some());
        assert!(summary.for_employee(4).is_none());
    }
}
