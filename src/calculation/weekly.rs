//! Weekly grouping of shifts.
//!
//! Weeks run Monday 00:00 to Sunday 23:59:59.999 in local time (ISO 8601).
//! A shift belongs to the week containing its start and is never split, so a
//! shift from Sunday 23:00 to Monday 01:00 is counted entirely in the week
//! that contains the Sunday.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{Shift, WeeklyBucket};

use super::valuation::valuate;

/// Returns the Monday of the ISO week containing `date`.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::week_start_of;
/// use chrono::NaiveDate;
///
/// // 2026-01-18 is a Sunday.
/// let sunday = NaiveDate::from_ymd_opt(2026, 1, 18).unwrap();
/// assert_eq!(week_start_of(sunday), NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
/// ```
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    let days_since_monday = u64::from(date.weekday().num_days_from_monday());
    date - Days::new(days_since_monday)
}

/// Groups shifts into weekly buckets by the local date of their start.
///
/// Buckets are returned in ascending week order and only weeks that contain
/// at least one shift are present.
pub fn group_by_week(shifts: &[Shift], offset: FixedOffset) -> Vec<WeeklyBucket> {
    let mut buckets: BTreeMap<NaiveDate, WeeklyBucket> = BTreeMap::new();

    for shift in shifts {
        let monday = week_start_of(shift.start_date(offset));
        buckets
            .entry(monday)
            .or_insert_with(|| WeeklyBucket::starting(monday))
            .push(shift.clone());
    }

    buckets.into_values().collect()
}

/// A weekly bucket valued at a wage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuedWeek {
    /// The week and its shifts.
    #[serde(flatten)]
    pub bucket: WeeklyBucket,
    /// `total_hours * wage` for the week.
    pub total_pay: Decimal,
}

/// Values each bucket at the given wage.
pub fn value_weeks(buckets: Vec<WeeklyBucket>, wage: Decimal) -> EngineResult<Vec<ValuedWeek>> {
    buckets
        .into_iter()
        .map(|bucket| {
            Ok(ValuedWeek {
                total_pay: valuate(bucket.total_hours, wage)?,
                bucket,
            })
        })
        .collect()
}
