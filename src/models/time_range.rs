//! Time window used to filter event fetches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An inclusive, optionally open-ended time window.
///
/// # Example
///
/// ```
/// use attendance_engine::models::TimeRange;
/// use chrono::{TimeZone, Utc};
///
/// let range = TimeRange {
///     start: Some(Utc.with_ymd_and_hms(2026, 1, 12, 0, 0, 0).unwrap()),
///     end: None,
/// };
/// assert!(range.contains(Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()));
/// assert!(!range.contains(Utc.with_ymd_and_hms(2026, 1, 11, 9, 0, 0).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Earliest included instant; `None` means unbounded.
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    /// Latest included instant; `None` means unbounded.
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

impl TimeRange {
    /// A window with no bounds.
    pub fn all() -> Self {
        Self::default()
    }

    /// A window between two instants, both inclusive.
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Returns true if `timestamp` lies inside the window.
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| timestamp >= start)
            && self.end.is_none_or(|end| timestamp <= end)
    }

    /// Returns true when both bounds are set and `start` is after `end`.
    pub fn is_inverted(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start > end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_unbounded_contains_everything() {
        assert!(TimeRange::all().contains(at(1)));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let range = TimeRange::between(at(10), at(20));
        assert!(range.contains(at(10)));
        assert!(range.contains(at(20)));
        assert!(!range.contains(at(9)));
        assert!(!range.contains(at(21)));
    }

    #[test]
    fn test_inverted_range() {
        assert!(TimeRange::between(at(20), at(10)).is_inverted());
        assert!(!TimeRange::between(at(10), at(10)).is_inverted());
        assert!(!TimeRange::all().is_inverted());
    }
}
