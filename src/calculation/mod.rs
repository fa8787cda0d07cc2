//! Calculation logic for the Attendance Engine.
//!
//! This module contains the pure, stateless part of the engine: shift
//! reconstruction from clock events, aggregation into per-employee and grand
//! totals, weekly grouping, wage valuation and the current clock status.
//! Nothing here performs I/O or holds state between calls.

mod aggregate;
mod reconstruct;
mod status;
mod valuation;
mod weekly;

pub use aggregate::{aggregate, wage_for};
pub use reconstruct::{
    DEFAULT_PAIRING_POLICY, PairingPolicy, Reconstruction, adjacent_pairing, reconstruct,
    reconstruct_by_employee, reconstruct_with, sort_chronologically,
};
pub use status::{ClockStatus, current_status};
pub use valuation::{checked_total, max_hourly_wage, parse_wage, validate_wage, valuate};
pub use weekly::{ValuedWeek, group_by_week, value_weeks, week_start_of};
