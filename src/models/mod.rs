//! Core data models for the Attendance Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod clock_event;
mod employee;
mod payment;
mod shift;
mod summary;
mod time_range;

pub use clock_event::{ClockEvent, ClockKind, EmployeeId, EventId, NewClockEvent};
pub use employee::{Employee, NewEmployee, Role, default_hourly_wage};
pub use payment::{NewPayment, Payment, PaymentId};
pub use shift::{Shift, hours_between};
pub use summary::{EmployeeTotals, Summary, WeeklyBucket};
pub use time_range::TimeRange;
