//! Configuration types for the Attendance Engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every key is optional;
//! missing keys take the defaults below.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::default_hourly_wage;

fn default_history_limit() -> usize {
    100
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

fn default_time_format() -> String {
    "%H:%M:%S".to_string()
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Socket address the server listens on.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

/// CSV export settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExportConfig {
    /// `chrono` pattern for the Date column.
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// `chrono` pattern for the Time column.
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            time_format: default_time_format(),
        }
    }
}

/// An administrator created at startup when no employee holds its code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BootstrapAdmin {
    /// Display name.
    pub name: String,
    /// Access code.
    pub code: String,
}

/// The full engine configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Wage for employees without a configured one.
    #[serde(default = "default_hourly_wage")]
    pub default_hourly_wage: Decimal,
    /// Offset of the local calendar from UTC, in minutes.
    #[serde(default)]
    pub utc_offset_minutes: i32,
    /// Number of most recent events shown in an employee history.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// CSV export settings.
    #[serde(default)]
    pub export: ExportConfig,
    /// Administrator to seed at startup.
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_hourly_wage: default_hourly_wage(),
            utc_offset_minutes: 0,
            history_limit: default_history_limit(),
            server: ServerConfig::default(),
            export: ExportConfig::default(),
            bootstrap_admin: None,
        }
    }
}
