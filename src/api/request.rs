//! Request types for the Attendance Engine API.
//!
//! This module defines the JSON bodies and query strings accepted by the
//! endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{ClockKind, EmployeeId, EventId, NewPayment, TimeRange};

/// Request body for `POST /register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Requested access code.
    pub code: String,
}

/// Request body for `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Access code.
    pub code: String,
}

/// Request body for `POST /admin/code`.
///
/// The current code travels in the access code header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCodeRequest {
    /// The replacement access code.
    pub code: String,
}

/// Request body for `POST /clock`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockRequest {
    /// The employee clocking.
    pub employee_id: EmployeeId,
    /// `IN` or `OUT`.
    pub kind: ClockKind,
    /// Reference to an already uploaded photo.
    #[serde(default)]
    pub photo_ref: Option<String>,
}

/// Request body for `POST /admin/entries/update`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEntryRequest {
    /// The event to correct.
    pub id: EventId,
    /// The corrected instant.
    pub timestamp: DateTime<Utc>,
}

/// Request body for `POST /admin/wage`.
///
/// The wage is kept as raw JSON so numbers and numeric strings are both
/// accepted and everything else is reported as an invalid wage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateWageRequest {
    /// The employee whose wage changes.
    pub employee_id: EmployeeId,
    /// The new hourly wage.
    pub hourly_wage: Value,
}

/// Request body for `POST /admin/payments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// The employee who was paid.
    pub employee_id: EmployeeId,
    /// Amount paid.
    pub amount: Decimal,
    /// When the payment was made.
    pub payment_date: NaiveDate,
    /// First day of the covered period.
    pub period_start: NaiveDate,
    /// Last day of the covered period.
    pub period_end: NaiveDate,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<PaymentRequest> for NewPayment {
    fn from(req: PaymentRequest) -> Self {
        NewPayment {
            employee_id: req.employee_id,
            amount: req.amount,
            payment_date: req.payment_date,
            period_start: req.period_start,
            period_end: req.period_end,
            notes: req.notes,
        }
    }
}

/// Query string selecting one employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeQuery {
    /// The employee.
    pub employee_id: EmployeeId,
}

/// Query string with an optional employee and time window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RangeQuery {
    /// Restrict to one employee.
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
    /// Earliest included instant.
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    /// Latest included instant.
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

impl RangeQuery {
    /// The time window of the query.
    pub fn range(&self) -> TimeRange {
        TimeRange {
            start: self.start,
            end: self.end,
        }
    }
}

/// Query string of `GET /payments`; the employee is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentsQuery {
    /// The employee whose payments are listed.
    pub employee_id: EmployeeId,
}

/// Query string of `GET /admin/payments`, optionally narrowed to one employee.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerQuery {
    /// Restrict to one employee.
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
}
