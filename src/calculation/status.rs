//! Current clock status of an employee.

use serde::{Deserialize, Serialize};

use crate::models::{ClockEvent, ClockKind};

/// Whether an employee is currently clocked in, and their latest event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockStatus {
    /// `IN` when the latest event is an IN, otherwise `OUT`.
    pub status: ClockKind,
    /// The latest event, if the employee ever clocked.
    pub last_event: Option<ClockEvent>,
}

/// Derives the status from the employee's events.
///
/// The latest event is the maximum by (timestamp, id); input order does not
/// matter. An employee with no events is `OUT`.
pub fn current_status(events: &[ClockEvent]) -> ClockStatus {
    let last_event = events.iter().max_by_key(|e| e.chronological_key()).cloned();
    let status = match last_event.as_ref().map(|e| e.kind) {
        Some(ClockKind::In) => ClockKind::In,
        _ => ClockKind::Out,
    };

    ClockStatus { status, last_event }
}
