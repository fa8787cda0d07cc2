//! Application state for the Attendance Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tracing::info;

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::service::AttendanceService;

/// Shared application state.
///
/// Holds the attendance service every handler delegates to.
#[derive(Clone)]
pub struct AppState {
    service: Arc<AttendanceService>,
}

impl AppState {
    /// Creates a new application state around a service.
    pub fn new(service: AttendanceService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Creates a state backed by an in-memory store using the loaded settings,
    /// seeding the configured bootstrap administrator.
    pub fn from_config(config: &ConfigLoader) -> EngineResult<Self> {
        let service = AttendanceService::in_memory(config.service_settings());
        if let Some(admin) = &config.config().bootstrap_admin {
            let admin = service.ensure_admin(&admin.name, &admin.code)?;
            info!(employee_id = admin.id, "Bootstrap administrator ready");
        }
        Ok(Self::new(service))
    }

    /// Returns a reference to the attendance service.
    pub fn service(&self) -> &AttendanceService {
        &self.service
    }
}
