//! Employee model and related types.
//!
//! This module defines the Employee struct and Role enum for representing
//! people who clock in and out, and the administrators reviewing them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// The hourly wage applied when an employee has none configured (7.00).
///
/// # Examples
///
/// ```
/// use attendance_engine::models::default_hourly_wage;
/// use rust_decimal::Decimal;
///
/// assert_eq!(default_hourly_wage(), Decimal::new(700, 2));
/// ```
pub fn default_hourly_wage() -> Decimal {
    Decimal::new(700, 2)
}

/// What an employee is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Records their own clock events.
    Worker,
    /// Reviews, corrects and exports everyone's events.
    Admin,
}

/// Represents an employee known to the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: EmployeeId,
    /// Unique access code, used as the login credential.
    pub code: String,
    /// Display name.
    pub name: String,
    /// The employee's role.
    pub role: Role,
    /// Current hourly wage. `None` means the default wage applies.
    #[serde(default)]
    pub hourly_wage: Option<Decimal>,
}

impl Employee {
    /// Returns true if the employee is an administrator.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Returns the wage to value this employee's hours with.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::{Employee, Role};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: 1,
    ///     code: "mario".to_string(),
    ///     name: "Mario Rossi".to_string(),
    ///     role: Role::Worker,
    ///     hourly_wage: None,
    /// };
    /// assert_eq!(employee.effective_wage(Decimal::new(700, 2)), Decimal::new(700, 2));
    /// ```
    pub fn effective_wage(&self, default_wage: Decimal) -> Decimal {
        self.hourly_wage.unwrap_or(default_wage)
    }
}

/// An employee that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// Unique access code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// The employee's role.
    pub role: Role,
    /// Hourly wage, `None` for the default.
    #[serde(default)]
    pub hourly_wage: Option<Decimal>,
}

impl NewEmployee {
    /// Attaches an id, producing the stored record.
    pub fn with_id(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            code: self.code,
            name: self.name,
            role: self.role,
            hourly_wage: self.hourly_wage,
        }
    }
}
