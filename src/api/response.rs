//! Response types for the Attendance Engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::Payment;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a not found error response for an entity.
    pub fn not_found(entity: &str, id: u64) -> Self {
        Self::with_details(
            format!("{}_NOT_FOUND", entity.to_uppercase()),
            format!("{} not found: {}", entity, id),
            format!("No {} with id {} exists", entity, id),
        )
    }
}

/// Body of `GET /payments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentsResponse {
    /// Payments, newest first.
    pub payments: Vec<Payment>,
    /// Sum of the listed payments.
    pub total_paid: Decimal,
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidConfig { field, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Invalid configuration",
                    format!("{}: {}", field, message),
                ),
            },
            EngineError::InvalidWage { value, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_WAGE",
                    format!("Invalid wage '{}'", value),
                    message,
                ),
            },
            EngineError::CalculationOverflow { message } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "CALCULATION_OVERFLOW",
                    "Totals exceed the supported range",
                    message,
                ),
            },
            EngineError::InvalidCode => ApiErrorResponse {
                status: StatusCode::UNAUTHORIZED,
                error: ApiError::new("INVALID_CODE", "Invalid access code"),
            },
            EngineError::DuplicateCode { code } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "DUPLICATE_CODE",
                    format!("Access code already in use: {}", code),
                    "Choose a different access code",
                ),
            },
            EngineError::EmployeeNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::not_found("Employee", id),
            },
            EngineError::EventNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::not_found("Event", id),
            },
            EngineError::PaymentNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::not_found("Payment", id),
            },
            EngineError::InvalidRequest { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(format!(
                    "Invalid field '{}': {}",
                    field, message
                )),
            },
            EngineError::Forbidden { message } => ApiErrorResponse {
                status: StatusCode::FORBIDDEN,
                error: ApiError::new("FORBIDDEN", message),
            },
            EngineError::StoreUnavailable { message } => ApiErrorResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: ApiError::with_details(
                    "STORE_UNAVAILABLE",
                    "Storage is temporarily unavailable",
                    message,
                ),
            },
            EngineError::ExportError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("EXPORT_ERROR", "Export failed", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_not_found_error() {
        let error = ApiError::not_found("Event", 12);
        assert_eq!(error.code, "EVENT_NOT_FOUND");
        assert!(error.message.contains("12"));
    }

    #[test]
    fn test_engine_error_status_codes() {
        let cases = [
            (EngineError::InvalidCode, StatusCode::UNAUTHORIZED),
            (
                EngineError::Forbidden {
                    message: "admin".to_string(),
                },
                StatusCode::FORBIDDEN,
            ),
            (
                EngineError::DuplicateCode {
                    code: "mario".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (EngineError::EmployeeNotFound { id: 1 }, StatusCode::NOT_FOUND),
            (
                EngineError::InvalidWage {
                    value: "abc".to_string(),
                    message: "not a number".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                EngineError::StoreUnavailable {
                    message: "down".to_string(),
                },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                EngineError::CalculationOverflow {
                    message: "pay".to_string(),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];

        for (engine_error, status) in cases {
            let api_error: ApiErrorResponse = engine_error.into();
            assert_eq!(api_error.status, status);
        }
    }

    #[test]
    fn test_invalid_wage_code() {
        let api_error: ApiErrorResponse = EngineError::InvalidWage {
            value: "abc".to_string(),
            message: "not a decimal number".to_string(),
        }
        .into();
        assert_eq!(api_error.error.code, "INVALID_WAGE");
        assert!(api_error.error.message.contains("abc"));
    }
}
