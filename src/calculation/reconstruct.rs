//! Shift reconstruction.
//!
//! This module turns one employee's chronologically ordered clock events into
//! closed shifts. Pairing is a single forward pass with one event of
//! look-ahead; malformed sequences are resolved by the pairing policy and
//! never produce an error.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ClockEvent, ClockKind, EmployeeId, Shift};

/// The result of reconstructing shifts from an event sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconstruction {
    /// Closed shifts, in chronological order.
    pub shifts: Vec<Shift>,
    /// IN events that were not immediately followed by an OUT.
    pub open_count: usize,
    /// OUT events reached without an IN to close.
    pub orphan_out_count: usize,
}

impl Reconstruction {
    /// Sum of the worked hours of all shifts.
    pub fn total_hours(&self) -> Decimal {
        self.shifts.iter().map(|s| s.hours).sum()
    }
}

/// A strategy that pairs an ordered event sequence into shifts.
///
/// Swapping the policy changes how incomplete sequences are resolved without
/// touching aggregation.
pub type PairingPolicy = fn(&[ClockEvent]) -> Reconstruction;

/// The pairing policy used by [`reconstruct`].
pub const DEFAULT_PAIRING_POLICY: PairingPolicy = adjacent_pairing;

/// Pairs each IN with the event immediately after it, if that event is an OUT.
///
/// - `IN, OUT` emits a shift and consumes both events.
/// - An IN followed by another IN, or by nothing, is unmatched: it counts
///   towards `open_count` and is dropped. It never pairs with a later OUT.
/// - An OUT reached on its own is an orphan and is skipped.
///
/// Two consecutive INs therefore collapse onto the second one: payroll
/// depends on this, so changes to it need product sign-off.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::adjacent_pairing;
/// use attendance_engine::models::{ClockEvent, ClockKind};
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let at = |id: u64, kind, hour, minute| ClockEvent {
///     id,
///     employee_id: 1,
///     kind,
///     timestamp: Utc.with_ymd_and_hms(2026, 1, 15, hour, minute, 0).unwrap(),
///     photo_ref: None,
/// };
/// let events = vec![
///     at(1, ClockKind::In, 8, 0),
///     at(2, ClockKind::In, 8, 5),
///     at(3, ClockKind::Out, 16, 5),
/// ];
///
/// let result = adjacent_pairing(&events);
/// assert_eq!(result.shifts.len(), 1);
/// assert_eq!(result.shifts[0].hours, Decimal::new(8, 0));
/// assert_eq!(result.open_count, 1);
/// ```
pub fn adjacent_pairing(events: &[ClockEvent]) -> Reconstruction {
    let mut result = Reconstruction::default();
    let mut i = 0;

    while i < events.len() {
        let current = &events[i];
        match current.kind {
            ClockKind::In => match events.get(i + 1) {
                Some(next) if next.kind == ClockKind::Out => {
                    result.shifts.push(Shift::new(
                        current.employee_id,
                        current.timestamp,
                        next.timestamp,
                    ));
                    i += 2;
                }
                _ => {
                    result.open_count += 1;
                    i += 1;
                }
            },
            ClockKind::Out => {
                result.orphan_out_count += 1;
                i += 1;
            }
        }
    }

    result
}

/// Reconstructs shifts for one employee's ordered events using the default policy.
pub fn reconstruct(events: &[ClockEvent]) -> Reconstruction {
    reconstruct_with(DEFAULT_PAIRING_POLICY, events)
}

/// Reconstructs shifts using an explicit pairing policy.
pub fn reconstruct_with(policy: PairingPolicy, events: &[ClockEvent]) -> Reconstruction {
    policy(events)
}

/// Sorts events ascending by timestamp, breaking ties by id.
pub fn sort_chronologically(events: &mut [ClockEvent]) {
    events.sort_by_key(ClockEvent::chronological_key);
}

/// Splits a mixed event list per employee and reconstructs each independently.
///
/// The relative order of each employee's events is preserved, so an input
/// ordered by (timestamp, id) yields ordered per-employee sequences.
pub fn reconstruct_by_employee(events: &[ClockEvent]) -> BTreeMap<EmployeeId, Reconstruction> {
    let mut per_employee: BTreeMap<EmployeeId, Vec<ClockEvent>> = BTreeMap::new();
    for event in events {
        per_employee
            .entry(event.employee_id)
            .or_default()
            .push(event.clone());
    }

    per_employee
        .into_iter()
        .map(|(employee_id, events)| (employee_id, reconstruct(&events)))
        .collect()
}
