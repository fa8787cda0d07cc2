//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from a YAML file and checking it before use.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use chrono::FixedOffset;
use chrono::format::{Item, StrftimeItems};

use crate::calculation::max_hourly_wage;
use crate::error::{EngineError, EngineResult};
use crate::service::{ServiceSettings, validate_code, validate_name};

use super::types::EngineConfig;

/// Loads and provides access to the engine configuration.
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/attendance.yaml").unwrap();
/// println!("Default wage: {}", loader.config().default_hourly_wage);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
    offset: FixedOffset,
}

impl ConfigLoader {
    /// Loads configuration from the specified file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file (e.g., "./config/attendance.yaml")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing
    /// - The file contains invalid YAML
    /// - A value is out of range (wage, offset, export pattern)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config: EngineConfig =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Self::from_config(config)
    }

    /// Validates an already parsed configuration.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        if config.default_hourly_wage.is_sign_negative() && !config.default_hourly_wage.is_zero() {
            return Err(invalid(
                "default_hourly_wage",
                "must not be negative".to_string(),
            ));
        }
        if config.default_hourly_wage > max_hourly_wage() {
            return Err(invalid(
                "default_hourly_wage",
                format!("must not exceed {}", max_hourly_wage()),
            ));
        }

        let offset = config
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| invalid("utc_offset_minutes", "must be within ±24 hours".to_string()))?;

        if config.history_limit == 0 {
            return Err(invalid("history_limit", "must be at least 1".to_string()));
        }

        config
            .server
            .bind_address
            .parse::<SocketAddr>()
            .map_err(|e| invalid("server.bind_address", e.to_string()))?;

        check_pattern("export.date_format", &config.export.date_format)?;
        check_pattern("export.time_format", &config.export.time_format)?;

        if let Some(admin) = &config.bootstrap_admin {
            validate_name(&admin.name)
                .and_then(|_| validate_code(&admin.code))
                .map_err(|e| invalid("bootstrap_admin", e.to_string()))?;
        }

        Ok(Self { config, offset })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the offset of the local calendar.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Returns the address the HTTP server binds to.
    pub fn bind_address(&self) -> &str {
        &self.config.server.bind_address
    }

    /// Builds the service settings described by this configuration.
    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            default_wage: self.config.default_hourly_wage,
            offset: self.offset,
            history_limit: self.config.history_limit,
            date_format: self.config.export.date_format.clone(),
            time_format: self.config.export.time_format.clone(),
        }
    }
}

fn invalid(field: &str, message: String) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message,
    }
}

/// Rejects patterns `chrono` would fail to render at export time.
///
/// Date and time columns are written unquoted, so the pattern may not
/// contain the field separator, quotes or line breaks.
fn check_pattern(field: &str, pattern: &str) -> EngineResult<()> {
    if pattern.is_empty() {
        return Err(invalid(field, "must not be empty".to_string()));
    }
    if pattern.contains([',', '"', '\n', '\r']) {
        return Err(invalid(
            field,
            format!("pattern '{}' must not contain commas, quotes or line breaks", pattern),
        ));
    }
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(invalid(field, format!("invalid format pattern '{}'", pattern)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/attendance.yaml"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn parse(yaml: &str) -> EngineResult<ConfigLoader> {
        ConfigLoader::from_config(serde_yaml::from_str(yaml).unwrap())
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.config().default_hourly_wage, dec("7.00"));
        assert_eq!(loader.config().history_limit, 100);
        assert_eq!(loader.offset(), FixedOffset::east_opt(0).unwrap());
    }

    #[test]
    fn test_missing_file_returns_config_not_found() {
        let result = ConfigLoader::load("./config/missing.yaml");
        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("missing.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_offset_in_minutes() {
        let loader = parse("utc_offset_minutes: 120").unwrap();
        assert_eq!(loader.offset(), FixedOffset::east_opt(7200).unwrap());
        assert_eq!(loader.service_settings().offset, loader.offset());

        let loader = parse("utc_offset_minutes: -300").unwrap();
        assert_eq!(loader.offset(), FixedOffset::west_opt(18000).unwrap());
    }

    #[test]
    fn test_out_of_range_offset_is_rejected() {
        let result = parse("utc_offset_minutes: 1500");
        assert!(matches!(
            result,
            Err(EngineError::InvalidConfig { ref field, .. }) if field == "utc_offset_minutes"
        ));
    }

    #[test]
    fn test_negative_wage_is_rejected() {
        assert!(matches!(
            parse("default_hourly_wage: -1"),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_oversized_default_wage_is_rejected() {
        assert!(matches!(
            parse("default_hourly_wage: \"79228162514264337593543950335\""),
            Err(EngineError::InvalidConfig { ref field, .. }) if field == "default_hourly_wage"
        ));
        assert!(parse("default_hourly_wage: \"10000\"").is_ok());
    }

    #[test]
    fn test_zero_history_limit_is_rejected() {
        assert!(matches!(
            parse("history_limit: 0"),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_bad_bind_address_is_rejected() {
        let result = parse("server:\n  bind_address: \"not an address\"");
        assert!(matches!(
            result,
            Err(EngineError::InvalidConfig { ref field, .. }) if field == "server.bind_address"
        ));
    }

    #[test]
    fn test_bad_export_pattern_is_rejected() {
        let result = parse("export:\n  date_format: \"%Q\"");
        assert!(matches!(
            result,
            Err(EngineError::InvalidConfig { ref field, .. }) if field == "export.date_format"
        ));
    }

    #[test]
    fn test_export_pattern_with_separator_is_rejected() {
        let result = parse("export:\n  date_format: \"%d,%m,%Y\"");
        assert!(matches!(
            result,
            Err(EngineError::InvalidConfig { ref field, .. }) if field == "export.date_format"
        ));

        let result = parse("export:\n  time_format: '%H\"%M'");
        assert!(matches!(
            result,
            Err(EngineError::InvalidConfig { ref field, .. }) if field == "export.time_format"
        ));
    }

    #[test]
    fn test_bootstrap_admin_code_is_validated() {
        let result = parse("bootstrap_admin:\n  name: Admin\n  code: \"has space\"");
        assert!(matches!(
            result,
            Err(EngineError::InvalidConfig { ref field, .. }) if field == "bootstrap_admin"
        ));
    }

    #[test]
    fn test_service_settings() {
        let loader = parse("default_hourly_wage: \"8.25\"\nhistory_limit: 20").unwrap();
        let settings = loader.service_settings();
        assert_eq!(settings.default_wage, dec("8.25"));
        assert_eq!(settings.history_limit, 20);
        assert_eq!(settings.export_format().date_format, "%d/%m/%Y");
    }
}
