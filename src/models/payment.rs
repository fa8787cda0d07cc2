//! Payment records.
//!
//! A payment notes that an employee was paid for a period. Payments are a
//! plain ledger: the engine never derives them from hours.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// Identifier of a payment.
pub type PaymentId = u64;

/// A recorded payment to an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier.
    pub id: PaymentId,
    /// The employee who was paid.
    pub employee_id: EmployeeId,
    /// Amount paid.
    pub amount: Decimal,
    /// When the payment was made.
    pub payment_date: NaiveDate,
    /// First day of the period the payment covers (inclusive).
    pub period_start: NaiveDate,
    /// Last day of the period the payment covers (inclusive).
    pub period_end: NaiveDate,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A payment that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPayment {
    /// The employee who was paid.
    pub employee_id: EmployeeId,
    /// Amount paid; must be positive.
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

impl NewPayment {
    /// Attaches an id, producing the stored record.
    pub fn with_id(self, id: PaymentId) -> Payment {
        Payment {
            id,
            employee_id: self.employee_id,
            amount: self.amount,
            payment_date: self.payment_date,
            period_start: self.period_start,
            period_end: self.period_end,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
        }
    }
}
