//! Clock event model and related types.
//!
//! A clock event is a single IN or OUT timestamp recorded for an employee.
//! Events are the only persisted input of the engine; shifts are derived
//! from them on every read.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of an employee.
pub type EmployeeId = u64;

/// Identifier of a clock event, assigned by the store in insertion order.
pub type EventId = u64;

/// Direction of a clock event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClockKind {
    /// The employee started working.
    In,
    /// The employee stopped working.
    Out,
}

impl ClockKind {
    /// Returns the wire name of the kind (`IN` / `OUT`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ClockKind::In => "IN",
            ClockKind::Out => "OUT",
        }
    }

    /// Returns the label used in exported reports.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::ClockKind;
    ///
    /// assert_eq!(ClockKind::In.report_label(), "ENTRATA");
    /// assert_eq!(ClockKind::Out.report_label(), "USCITA");
    /// ```
    pub fn report_label(&self) -> &'static str {
        match self {
            ClockKind::In => "ENTRATA",
            ClockKind::Out => "USCITA",
        }
    }
}

impl std::fmt::Display for ClockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single clock in / clock out record.
///
/// Immutable once created, except for deletion or a timestamp edit made by
/// an administrator to correct a mistake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockEvent {
    /// Unique identifier, ascending in insertion order.
    pub id: EventId,
    /// The employee who clocked.
    pub employee_id: EmployeeId,
    /// Whether this is an IN or an OUT.
    pub kind: ClockKind,
    /// When the event happened.
    pub timestamp: DateTime<Utc>,
    /// Opaque reference to the photo taken as proof, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_ref: Option<String>,
}

impl ClockEvent {
    /// Returns true when a photo reference is attached.
    pub fn has_photo(&self) -> bool {
        self.photo_ref.as_deref().is_some_and(|r| !r.is_empty())
    }

    /// Returns the wall-clock time of the event at the given UTC offset.
    pub fn local_timestamp(&self, offset: FixedOffset) -> NaiveDateTime {
        self.timestamp.with_timezone(&offset).naive_local()
    }

    /// Ordering key used by the reconstructor: timestamp, then id.
    pub fn chronological_key(&self) -> (DateTime<Utc>, EventId) {
        (self.timestamp, self.id)
    }
}

/// A clock event that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClockEvent {
    /// The employee who clocked.
    pub employee_id: EmployeeId,
    /// Whether this is an IN or an OUT.
    pub kind: ClockKind,
    /// When the event happened.
    pub timestamp: DateTime<Utc>,
    /// Opaque photo reference, if any.
    #[serde(default)]
    pub photo_ref: Option<String>,
}

impl NewClockEvent {
    /// Attaches an id, producing the stored record.
    pub fn with_id(self, id: EventId) -> ClockEvent {
        ClockEvent {
            id,
            employee_id: self.employee_id,
            kind: self.kind,
            timestamp: self.timestamp,
            photo_ref: self.photo_ref,
        }
    }
}
