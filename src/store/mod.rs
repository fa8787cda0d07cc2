//! Storage boundary of the Attendance Engine.
//!
//! The engine itself never touches storage: the service layer fetches a
//! snapshot through these traits, hands it to the pure calculation functions
//! and discards the result afterwards. Every trait method is a single atomic
//! call; failures surface as [`EngineError::StoreUnavailable`] and are not
//! retried here.
//!
//! [`EngineError::StoreUnavailable`]: crate::error::EngineError::StoreUnavailable

mod memory;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{
    ClockEvent, Employee, EmployeeId, EventId, NewClockEvent, NewEmployee, NewPayment, Payment,
    PaymentId, TimeRange,
};

pub use memory::InMemoryStore;

/// Selects which events a fetch returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Restrict to one employee.
    pub employee_id: Option<EmployeeId>,
    /// Restrict to a time window.
    pub range: TimeRange,
    /// Keep only the most recent `limit` matching events.
    pub limit: Option<usize>,
}

impl EventFilter {
    /// All events of one employee.
    pub fn for_employee(employee_id: EmployeeId) -> Self {
        Self {
            employee_id: Some(employee_id),
            ..Self::default()
        }
    }

    /// Restricts the filter to a time window.
    pub fn within(mut self, range: TimeRange) -> Self {
        self.range = range;
        self
    }

    /// Keeps only the most recent `limit` events.
    pub fn most_recent(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns true if `event` passes the employee and range criteria.
    pub fn matches(&self, event: &ClockEvent) -> bool {
        self.employee_id.is_none_or(|id| event.employee_id == id)
            && self.range.contains(event.timestamp)
    }
}

/// Clock event persistence.
pub trait EventStore {
    /// Appends an event. Fails if the employee does not exist.
    fn insert_event(&self, event: NewClockEvent) -> EngineResult<ClockEvent>;

    /// Returns matching events ordered ascending by (timestamp, id).
    fn fetch_events(&self, filter: &EventFilter) -> EngineResult<Vec<ClockEvent>>;

    /// Returns one event.
    fn get_event(&self, id: EventId) -> EngineResult<ClockEvent>;

    /// Removes an event, returning it.
    fn delete_event(&self, id: EventId) -> EngineResult<ClockEvent>;

    /// Moves an event to a new timestamp, returning the updated event.
    fn update_event_timestamp(
        &self,
        id: EventId,
        timestamp: DateTime<Utc>,
    ) -> EngineResult<ClockEvent>;
}

/// Employee persistence.
pub trait EmployeeStore {
    /// Adds an employee. Fails if the code is taken.
    fn insert_employee(&self, employee: NewEmployee) -> EngineResult<Employee>;

    /// Returns one employee.
    fn get_employee(&self, id: EmployeeId) -> EngineResult<Employee>;

    /// Looks an employee up by access code.
    fn find_by_code(&self, code: &str) -> EngineResult<Option<Employee>>;

    /// Returns all employees ordered by id.
    fn list_employees(&self) -> EngineResult<Vec<Employee>>;

    /// Returns the configured wage; `None` when unset or the employee is unknown.
    fn fetch_wage(&self, id: EmployeeId) -> EngineResult<Option<Decimal>>;

    /// Replaces the current wage. The value must already be validated.
    fn update_wage(&self, id: EmployeeId, wage: Decimal) -> EngineResult<Employee>;

    /// Replaces the access code. Fails if another employee holds it.
    fn update_code(&self, id: EmployeeId, code: &str) -> EngineResult<Employee>;
}

/// Payment ledger persistence.
pub trait PaymentStore {
    /// Records a payment. Fails if the employee does not exist.
    fn insert_payment(&self, payment: NewPayment) -> EngineResult<Payment>;

    /// Returns payments, newest payment date first.
    fn list_payments(&self, employee_id: Option<EmployeeId>) -> EngineResult<Vec<Payment>>;

    /// Removes a payment, returning it.
    fn delete_payment(&self, id: PaymentId) -> EngineResult<Payment>;
}

/// Everything the service layer needs from storage.
pub trait Store: EventStore + EmployeeStore + PaymentStore + Send + Sync {}

impl<T> Store for T where T: EventStore + EmployeeStore + PaymentStore + Send + Sync {}
