//! Error types for the Attendance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur around attendance aggregation.
//! Malformed clock sequences are deliberately absent: the reconstructor
//! resolves them by policy and never fails.

use thiserror::Error;

/// The main error type for the Attendance Engine.
///
/// All fallible operations in the engine, the store and the service layer
/// return this error type.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/attendance.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/attendance.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds an unusable value.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending configuration key.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A wage update carried a non-numeric or negative value.
    #[error("Invalid wage '{value}': {message}")]
    InvalidWage {
        /// The rejected input, as received.
        value: String,
        /// Why the value was rejected.
        message: String,
    },

    /// Valuing hours or summing amounts exceeded the decimal range.
    #[error("Calculation overflowed: {message}")]
    CalculationOverflow {
        /// The operation that overflowed.
        message: String,
    },

    /// No employee is registered with the given access code.
    #[error("Invalid access code")]
    InvalidCode,

    /// An employee with the given access code already exists.
    #[error("Access code already in use: {code}")]
    DuplicateCode {
        /// The duplicated code.
        code: String,
    },

    /// The referenced employee does not exist.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The missing employee id.
        id: u64,
    },

    /// The referenced clock event does not exist.
    #[error("Clock event not found: {id}")]
    EventNotFound {
        /// The missing event id.
        id: u64,
    },

    /// The referenced payment does not exist.
    #[error("Payment not found: {id}")]
    PaymentNotFound {
        /// The missing payment id.
        id: u64,
    },

    /// A request field failed validation.
    #[error("Invalid request field '{field}': {message}")]
    InvalidRequest {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The caller lacks the role required for the operation.
    #[error("Forbidden: {message}")]
    Forbidden {
        /// A description of the missing permission.
        message: String,
    },

    /// The backing store could not complete the call. Transient; callers may retry.
    #[error("Store unavailable: {message}")]
    StoreUnavailable {
        /// A description of the store failure.
        message: String,
    },

    /// Rendering an export failed.
    #[error("Export failed: {message}")]
    ExportError {
        /// A description of the export failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

impl From<csv::Error> for EngineError {
    fn from(error: csv::Error) -> Self {
        EngineError::ExportError {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/attendance.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/attendance.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_wage_displays_value_and_message() {
        let error = EngineError::InvalidWage {
            value: "-3".to_string(),
            message: "wage cannot be negative".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid wage '-3': wage cannot be negative");
    }

    #[test]
    fn test_calculation_overflow_displays_message() {
        let error = EngineError::CalculationOverflow {
            message: "8 hours at 10000 per hour".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Calculation overflowed: 8 hours at 10000 per hour"
        );
    }

    #[test]
    fn test_not_found_variants_display_ids() {
        assert_eq!(
            EngineError::EmployeeNotFound { id: 4 }.to_string(),
            "Employee not found: 4"
        );
        assert_eq!(
            EngineError::EventNotFound { id: 17 }.to_string(),
            "Clock event not found: 17"
        );
        assert_eq!(
            EngineError::PaymentNotFound { id: 2 }.to_string(),
            "Payment not found: 2"
        );
    }

    #[test]
    fn test_duplicate_code_displays_code() {
        let error = EngineError::DuplicateCode {
            code: "mario".to_string(),
        };
        assert_eq!(error.to_string(), "Access code already in use: mario");
    }

    #[test]
    fn test_store_unavailable_displays_message() {
        let error = EngineError::StoreUnavailable {
            message: "connection reset".to_string(),
        };
        assert_eq!(error.to_string(), "Store unavailable: connection reset");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_code() -> EngineResult<()> {
            Err(EngineError::InvalidCode)
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_code()?;
            Ok(())
        }

        assert!(matches!(propagates_error(), Err(EngineError::InvalidCode)));
    }
}
