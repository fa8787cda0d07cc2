//! Service layer of the Attendance Engine.
//!
//! [`AttendanceService`] is the only caller of the store. Every read fetches
//! a fresh snapshot, runs the pure calculation functions over it and returns
//! the result; nothing derived from events is ever cached or persisted.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::calculation::{
    ClockStatus, Reconstruction, ValuedWeek, aggregate, checked_total, current_status,
    group_by_week, reconstruct, reconstruct_by_employee, validate_wage, valuate, value_weeks,
};
use crate::error::{EngineError, EngineResult};
use crate::export::{self, ExportFormat, ExportRow};
use crate::models::{
    ClockEvent, ClockKind, Employee, EmployeeId, EventId, NewClockEvent, NewEmployee, NewPayment,
    Payment, PaymentId, Role, Shift, Summary, TimeRange, default_hourly_wage,
};
use crate::store::{EventFilter, InMemoryStore, Store};

/// Settings the service applies to every computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Wage used for employees without a configured one.
    pub default_wage: Decimal,
    /// Offset of the local calendar used for weeks and exported dates.
    pub offset: FixedOffset,
    /// Number of most recent events an employee history covers.
    pub history_limit: usize,
    /// `chrono` pattern for exported dates.
    pub date_format: String,
    /// `chrono` pattern for exported times.
    pub time_format: String,
}

impl ServiceSettings {
    /// The export format derived from these settings.
    pub fn export_format(&self) -> ExportFormat {
        ExportFormat {
            offset: self.offset,
            date_format: self.date_format.clone(),
            time_format: self.time_format.clone(),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        let format = ExportFormat::default();
        Self {
            default_wage: default_hourly_wage(),
            offset: Utc.fix(),
            history_limit: 100,
            date_format: format.date_format,
            time_format: format.time_format,
        }
    }
}

/// An employee's recent events and the shifts reconstructed from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeHistory {
    /// The employee.
    pub employee_id: EmployeeId,
    /// The raw events, oldest first.
    pub events: Vec<ClockEvent>,
    /// Shifts and unmatched event counts.
    #[serde(flatten)]
    pub reconstruction: Reconstruction,
    /// Sum of the shift hours.
    pub total_hours: Decimal,
}

/// One employee's hours and pay grouped by ISO week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyReport {
    /// The employee.
    pub employee_id: EmployeeId,
    /// Wage the weeks were valued at.
    pub wage: Decimal,
    /// Weeks with at least one shift, oldest first.
    pub weeks: Vec<ValuedWeek>,
    /// Hours across all weeks.
    pub total_hours: Decimal,
    /// Pay across all weeks, `total_hours * wage`.
    pub total_pay: Decimal,
}

/// Checks an access code before it is stored.
///
/// Codes are exported unquoted, so they may not contain whitespace, commas
/// or quotes.
pub fn validate_code(code: &str) -> EngineResult<()> {
    if code.is_empty() {
        return Err(EngineError::InvalidRequest {
            field: "code".to_string(),
            message: "must not be empty".to_string(),
        });
    }
    if code
        .chars()
        .any(|c| c.is_whitespace() || c == ',' || c == '"')
    {
        return Err(EngineError::InvalidRequest {
            field: "code".to_string(),
            message: "must not contain whitespace, commas or quotes".to_string(),
        });
    }
    Ok(())
}

/// Checks a display name before it is stored.
pub fn validate_name(name: &str) -> EngineResult<()> {
    if name.trim().is_empty() {
        return Err(EngineError::InvalidRequest {
            field: "name".to_string(),
            message: "must not be empty".to_string(),
        });
    }
    if name.contains(['\n', '\r']) {
        return Err(EngineError::InvalidRequest {
            field: "name".to_string(),
            message: "must be a single line".to_string(),
        });
    }
    Ok(())
}

fn check_range(range: &TimeRange) -> EngineResult<()> {
    if range.is_inverted() {
        return Err(EngineError::InvalidRequest {
            field: "range".to_string(),
            message: "start must not be after end".to_string(),
        });
    }
    Ok(())
}

/// Attendance operations over a store.
#[derive(Clone)]
pub struct AttendanceService {
    store: Arc<dyn Store>,
    settings: ServiceSettings,
}

impl AttendanceService {
    /// Creates a service over the given store.
    pub fn new(store: Arc<dyn Store>, settings: ServiceSettings) -> Self {
        Self { store, settings }
    }

    /// Creates a service over a fresh in-memory store.
    pub fn in_memory(settings: ServiceSettings) -> Self {
        Self::new(Arc::new(InMemoryStore::new()), settings)
    }

    /// Returns the active settings.
    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Registers a new worker.
    pub fn register(&self, name: &str, code: &str) -> EngineResult<Employee> {
        self.add_employee(name, code, Role::Worker)
    }

    /// Registers a new administrator.
    pub fn register_admin(&self, name: &str, code: &str) -> EngineResult<Employee> {
        self.add_employee(name, code, Role::Admin)
    }

    /// Returns the administrator holding `code`, creating it if the code is free.
    ///
    /// Fails with `DuplicateCode` when the code belongs to a worker.
    pub fn ensure_admin(&self, name: &str, code: &str) -> EngineResult<Employee> {
        match self.store.find_by_code(code.trim())? {
            Some(existing) if existing.is_admin() => Ok(existing),
            Some(existing) => Err(EngineError::DuplicateCode {
                code: existing.code,
            }),
            None => self.register_admin(name, code),
        }
    }

    fn add_employee(&self, name: &str, code: &str, role: Role) -> EngineResult<Employee> {
        let name = name.trim();
        let code = code.trim();
        validate_name(name)?;
        validate_code(code)?;

        let employee = self.store.insert_employee(NewEmployee {
            code: code.to_string(),
            name: name.to_string(),
            role,
            hourly_wage: None,
        })?;
        info!(employee_id = employee.id, role = ?employee.role, "Registered employee");
        Ok(employee)
    }

    /// Resolves an access code to its employee.
    pub fn login(&self, code: &str) -> EngineResult<Employee> {
        self.store
            .find_by_code(code.trim())?
            .ok_or(EngineError::InvalidCode)
    }

    /// Resolves an access code and checks that it belongs to an administrator.
    pub fn require_admin(&self, code: &str) -> EngineResult<Employee> {
        let employee = self.login(code)?;
        if !employee.is_admin() {
            warn!(employee_id = employee.id, "Admin operation refused");
            return Err(EngineError::Forbidden {
                message: "administrator role required".to_string(),
            });
        }
        Ok(employee)
    }

    /// Resolves an access code and checks that it may act for `employee_id`.
    ///
    /// Workers may only act for themselves; administrators for anyone.
    pub fn authorize_for(&self, code: &str, employee_id: EmployeeId) -> EngineResult<Employee> {
        let caller = self.login(code)?;
        if caller.id != employee_id && !caller.is_admin() {
            warn!(caller_id = caller.id, employee_id, "Refused access to another employee");
            return Err(EngineError::Forbidden {
                message: "access code does not belong to this employee".to_string(),
            });
        }
        Ok(caller)
    }

    /// Replaces an administrator's own access code.
    ///
    /// `current_code` must resolve to an administrator. The new code is
    /// validated like a registration code and must not be held by anyone else.
    pub fn update_code(&self, current_code: &str, new_code: &str) -> EngineResult<Employee> {
        let admin = self.require_admin(current_code)?;
        let new_code = new_code.trim();
        validate_code(new_code)?;

        let employee = self.store.update_code(admin.id, new_code)?;
        info!(employee_id = employee.id, "Updated access code");
        Ok(employee)
    }

    /// Records a clock event at the current instant.
    pub fn clock(
        &self,
        employee_id: EmployeeId,
        kind: ClockKind,
        photo_ref: Option<String>,
    ) -> EngineResult<ClockEvent> {
        self.clock_at(employee_id, kind, Utc::now(), photo_ref)
    }

    /// Records a clock event at the given instant.
    pub fn clock_at(
        &self,
        employee_id: EmployeeId,
        kind: ClockKind,
        timestamp: DateTime<Utc>,
        photo_ref: Option<String>,
    ) -> EngineResult<ClockEvent> {
        let event = self.store.insert_event(NewClockEvent {
            employee_id,
            kind,
            timestamp,
            photo_ref: photo_ref.filter(|r| !r.trim().is_empty()),
        })?;
        info!(
            event_id = event.id,
            employee_id,
            kind = %kind,
            has_photo = event.has_photo(),
            "Clock event recorded"
        );
        Ok(event)
    }

    /// Returns whether the employee is currently clocked in.
    pub fn status(&self, employee_id: EmployeeId) -> EngineResult<ClockStatus> {
        self.store.get_employee(employee_id)?;
        let events = self
            .store
            .fetch_events(&EventFilter::for_employee(employee_id).most_recent(1))?;
        Ok(current_status(&events))
    }

    /// Lists raw events, oldest first.
    ///
    /// Unlike the derived views this shows every event, including the ones
    /// that do not form a shift.
    pub fn list_events(
        &self,
        employee_id: Option<EmployeeId>,
        range: TimeRange,
    ) -> EngineResult<Vec<ClockEvent>> {
        check_range(&range)?;
        self.store.fetch_events(&EventFilter {
            employee_id,
            range,
            limit: None,
        })
    }

    /// Returns the employee's most recent events and the shifts they form.
    pub fn employee_history(
        &self,
        employee_id: EmployeeId,
        range: TimeRange,
    ) -> EngineResult<EmployeeHistory> {
        check_range(&range)?;
        self.store.get_employee(employee_id)?;

        let filter = EventFilter::for_employee(employee_id)
            .within(range)
            .most_recent(self.settings.history_limit);
        let events = self.store.fetch_events(&filter)?;
        let reconstruction = reconstruct(&events);
        debug!(
            employee_id,
            events = events.len(),
            shifts = reconstruction.shifts.len(),
            open = reconstruction.open_count,
            "Reconstructed history"
        );

        Ok(EmployeeHistory {
            employee_id,
            total_hours: reconstruction.total_hours(),
            events,
            reconstruction,
        })
    }

    /// Aggregates hours and pay for one employee or everybody.
    pub fn summary(
        &self,
        employee_id: Option<EmployeeId>,
        range: TimeRange,
    ) -> EngineResult<Summary> {
        check_range(&range)?;
        let events = self.store.fetch_events(&EventFilter {
            employee_id,
            range,
            limit: None,
        })?;

        let reconstructions = reconstruct_by_employee(&events);
        let mut wages = HashMap::new();
        let mut open_events = 0;
        let mut shifts_by_employee: BTreeMap<EmployeeId, Vec<Shift>> = BTreeMap::new();
        for (id, reconstruction) in reconstructions {
            if let Some(wage) = self.store.fetch_wage(id)? {
                wages.insert(id, wage);
            }
            open_events += reconstruction.open_count;
            shifts_by_employee.insert(id, reconstruction.shifts);
        }

        let summary = aggregate(&shifts_by_employee, &wages, self.settings.default_wage)?;
        debug!(
            events = events.len(),
            employees = summary.per_employee.len(),
            open = open_events,
            grand_total_hours = %summary.grand_total_hours,
            "Computed summary"
        );
        Ok(summary)
    }

    /// Groups one employee's shifts by ISO week and values each week.
    pub fn weekly_report(
        &self,
        employee_id: EmployeeId,
        range: TimeRange,
    ) -> EngineResult<WeeklyReport> {
        check_range(&range)?;
        let employee = self.store.get_employee(employee_id)?;
        let events = self
            .store
            .fetch_events(&EventFilter::for_employee(employee_id).within(range))?;

        let reconstruction = reconstruct(&events);
        let wage = employee.effective_wage(self.settings.default_wage);
        let total_hours = reconstruction.total_hours();
        let weeks = value_weeks(
            group_by_week(&reconstruction.shifts, self.settings.offset),
            wage,
        )?;
        debug!(employee_id, weeks = weeks.len(), "Computed weekly report");

        Ok(WeeklyReport {
            employee_id,
            wage,
            weeks,
            total_hours,
            total_pay: valuate(total_hours, wage)?,
        })
    }

    /// Renders raw events as CSV, oldest first.
    pub fn export_csv(
        &self,
        employee_id: Option<EmployeeId>,
        range: TimeRange,
    ) -> EngineResult<String> {
        let events = self.list_events(employee_id, range)?;
        let employees: HashMap<EmployeeId, Employee> = self
            .store
            .list_employees()?
            .into_iter()
            .map(|e| (e.id, e))
            .collect();

        let format = self.settings.export_format();
        let mut rows = Vec::with_capacity(events.len());
        for event in &events {
            match employees.get(&event.employee_id) {
                Some(employee) => rows.push(ExportRow::from_event(event, employee, &format)),
                None => warn!(
                    event_id = event.id,
                    employee_id = event.employee_id,
                    "Skipping event of unknown employee"
                ),
            }
        }

        let csv = export::export_csv(&rows)?;
        info!(rows = rows.len(), "Exported events");
        Ok(csv)
    }

    /// Deletes an event. Derived views change on the next read.
    pub fn delete_event(&self, id: EventId) -> EngineResult<ClockEvent> {
        let event = self.store.delete_event(id)?;
        info!(event_id = id, employee_id = event.employee_id, "Deleted clock event");
        Ok(event)
    }

    /// Moves an event to a corrected timestamp.
    pub fn update_event_timestamp(
        &self,
        id: EventId,
        timestamp: DateTime<Utc>,
    ) -> EngineResult<ClockEvent> {
        let event = self.store.update_event_timestamp(id, timestamp)?;
        info!(event_id = id, timestamp = %timestamp, "Corrected clock event");
        Ok(event)
    }

    /// Validates and stores a new hourly wage.
    pub fn update_wage(&self, employee_id: EmployeeId, raw_wage: &Value) -> EngineResult<Employee> {
        let wage = validate_wage(raw_wage)?;
        let employee = self.store.update_wage(employee_id, wage)?;
        info!(employee_id, wage = %wage, "Updated hourly wage");
        Ok(employee)
    }

    /// Records a payment.
    pub fn record_payment(&self, payment: NewPayment) -> EngineResult<Payment> {
        if payment.amount <= Decimal::ZERO {
            return Err(EngineError::InvalidRequest {
                field: "amount".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if payment.period_start > payment.period_end {
            return Err(EngineError::InvalidRequest {
                field: "period_start".to_string(),
                message: "must not be after period_end".to_string(),
            });
        }

        let payment = self.store.insert_payment(payment)?;
        info!(
            payment_id = payment.id,
            employee_id = payment.employee_id,
            amount = %payment.amount,
            "Recorded payment"
        );
        Ok(payment)
    }

    /// Lists payments, newest first.
    pub fn list_payments(&self, employee_id: Option<EmployeeId>) -> EngineResult<Vec<Payment>> {
        self.store.list_payments(employee_id)
    }

    /// Deletes a payment.
    pub fn delete_payment(&self, id: PaymentId) -> EngineResult<Payment> {
        let payment = self.store.delete_payment(id)?;
        info!(payment_id = id, "Deleted payment");
        Ok(payment)
    }

    /// Sum of the recorded payments.
    pub fn total_paid(&self, employee_id: Option<EmployeeId>) -> EngineResult<Decimal> {
        checked_total(
            self.store
                .list_payments(employee_id)?
                .iter()
                .map(|p| p.amount),
        )
    }
}
