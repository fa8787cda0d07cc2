//! HTTP API module for the Attendance Engine.
//!
//! This module provides the REST endpoints workers use to register, clock
//! in and out and review their hours, and the administrator endpoints for
//! corrections, wages, reports, payments and access codes.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{ACCESS_CODE_HEADER, create_router};
pub use request::{
    ClockRequest, EmployeeQuery, LedgerQuery, LoginRequest, PaymentRequest, PaymentsQuery,
    RangeQuery, RegisterRequest, UpdateCodeRequest, UpdateEntryRequest, UpdateWageRequest,
};
pub use response::{ApiError, PaymentsResponse};
pub use state::AppState;
