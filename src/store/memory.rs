//! In-memory store.
//!
//! Backs the server binary and the tests. All tables live behind one
//! `parking_lot::RwLock`, so every trait call is atomic with respect to the
//! others.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    ClockEvent, Employee, EmployeeId, EventId, NewClockEvent, NewEmployee, NewPayment, Payment,
    PaymentId,
};

use super::{EmployeeStore, EventFilter, EventStore, PaymentStore};

#[derive(Debug, Default)]
struct Tables {
    employees: BTreeMap<EmployeeId, Employee>,
    events: BTreeMap<EventId, ClockEvent>,
    payments: BTreeMap<PaymentId, Payment>,
    last_employee_id: u64,
    last_event_id: u64,
    last_payment_id: u64,
}

impl Tables {
    fn require_employee(&self, id: EmployeeId) -> EngineResult<&Employee> {
        self.employees
            .get(&id)
            .ok_or(EngineError::EmployeeNotFound { id })
    }
}

fn next_id(last: &mut u64) -> u64 {
    *last += 1;
    *last
}

/// A store that keeps everything in process memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventStore for InMemoryStore {
    fn insert_event(&self, event: NewClockEvent) -> EngineResult<ClockEvent> {
        let mut tables = self.tables.write();
        tables.require_employee(event.employee_id)?;

        let id = next_id(&mut tables.last_event_id);
        let stored = event.with_id(id);
        tables.events.insert(id, stored.clone());
        debug!(event_id = id, employee_id = stored.employee_id, kind = %stored.kind, "Stored clock event");
        Ok(stored)
    }

    fn fetch_events(&self, filter: &EventFilter) -> EngineResult<Vec<ClockEvent>> {
        let tables = self.tables.read();
        let mut events: Vec<ClockEvent> = tables
            .events
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        events.sort_by_key(ClockEvent::chronological_key);

        if let Some(limit) = filter.limit {
            let excess = events.len().saturating_sub(limit);
            events.drain(..excess);
        }
        Ok(events)
    }

    fn get_event(&self, id: EventId) -> EngineResult<ClockEvent> {
        self.tables
            .read()
            .events
            .get(&id)
            .cloned()
            .ok_or(EngineError::EventNotFound { id })
    }

    fn delete_event(&self, id: EventId) -> EngineResult<ClockEvent> {
        self.tables
            .write()
            .events
            .remove(&id)
            .ok_or(EngineError::EventNotFound { id })
    }

    fn update_event_timestamp(
        &self,
        id: EventId,
        timestamp: DateTime<Utc>,
    ) -> EngineResult<ClockEvent> {
        let mut tables = self.tables.write();
        let event = tables
            .events
            .get_mut(&id)
            .ok_or(EngineError::EventNotFound { id })?;
        event.timestamp = timestamp;
        Ok(event.clone())
    }
}

impl EmployeeStore for InMemoryStore {
    fn insert_employee(&self, employee: NewEmployee) -> EngineResult<Employee> {
        let mut tables = self.tables.write();
        if tables.employees.values().any(|e| e.code == employee.code) {
            return Err(EngineError::DuplicateCode {
                code: employee.code,
            });
        }

        let id = next_id(&mut tables.last_employee_id);
        let stored = employee.with_id(id);
        tables.employees.insert(id, stored.clone());
        Ok(stored)
    }

    fn get_employee(&self, id: EmployeeId) -> EngineResult<Employee> {
        self.tables.read().require_employee(id).cloned()
    }

    fn find_by_code(&self, code: &str) -> EngineResult<Option<Employee>> {
        Ok(self
            .tables
            .read()
            .employees
            .values()
            .find(|e| e.code == code)
            .cloned())
    }

    fn list_employees(&self) -> EngineResult<Vec<Employee>> {
        Ok(self.tables.read().employees.values().cloned().collect())
    }

    fn fetch_wage(&self, id: EmployeeId) -> EngineResult<Option<Decimal>> {
        Ok(self
            .tables
            .read()
            .employees
            .get(&id)
            .and_then(|e| e.hourly_wage))
    }

    fn update_wage(&self, id: EmployeeId, wage: Decimal) -> EngineResult<Employee> {
        let mut tables = self.tables.write();
        let employee = tables
            .employees
            .get_mut(&id)
            .ok_or(EngineError::EmployeeNotFound { id })?;
        employee.hourly_wage = Some(wage);
        Ok(employee.clone())
    }

    fn update_code(&self, id: EmployeeId, code: &str) -> EngineResult<Employee> {
        let mut tables = self.tables.write();
        if tables
            .employees
            .values()
            .any(|e| e.code == code && e.id != id)
        {
            return Err(EngineError::DuplicateCode {
                code: code.to_string(),
            });
        }

        let employee = tables
            .employees
            .get_mut(&id)
            .ok_or(EngineError::EmployeeNotFound { id })?;
        employee.code = code.to_string();
        Ok(employee.clone())
    }
}

impl PaymentStore for InMemoryStore {
    fn insert_payment(&self, payment: NewPayment) -> EngineResult<Payment> {
        let mut tables = self.tables.write();
        tables.require_employee(payment.employee_id)?;

        let id = next_id(&mut tables.last_payment_id);
        let stored = payment.with_id(id);
        tables.payments.insert(id, stored.clone());
        Ok(stored)
    }

    fn list_payments(&self, employee_id: Option<EmployeeId>) -> EngineResult<Vec<Payment>> {
        let tables = self.tables.read();
        let mut payments: Vec<Payment> = tables
            .payments
            .values()
            .filter(|p| employee_id.is_none_or(|id| p.employee_id == id))
            .cloned()
            .collect();
        payments.sort_by(|a, b| b.payment_date.cmp(&a.payment_date).then(b.id.cmp(&a.id)));
        Ok(payments)
    }

    fn delete_payment(&self, id: PaymentId) -> EngineResult<Payment> {
        self.tables
            .write()
            .payments
            .remove(&id)
            .ok_or(EngineError::PaymentNotFound { id })
    }
}
