//! Valuation of worked hours and validation of wage input.
//!
//! Wages are a single current value per employee. There is no effective-dated
//! history, so revaluing past hours always uses the wage in force today.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::{EngineError, EngineResult};

/// Highest hourly wage accepted from wage updates and configuration.
pub fn max_hourly_wage() -> Decimal {
    Decimal::new(10_000, 0)
}

/// Converts hours into pay.
///
/// Fails with `CalculationOverflow` instead of panicking when the product
/// leaves the decimal range.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::valuate;
/// use rust_decimal::Decimal;
///
/// let pay = valuate(Decimal::new(75, 1), Decimal::new(8, 0)).unwrap();
/// assert_eq!(pay, Decimal::new(60, 0));
/// assert!(valuate(Decimal::MAX, Decimal::new(2, 0)).is_err());
/// ```
pub fn valuate(hours: Decimal, wage: Decimal) -> EngineResult<Decimal> {
    hours
        .checked_mul(wage)
        .ok_or_else(|| EngineError::CalculationOverflow {
            message: format!("{} hours at {} per hour", hours, wage),
        })
}

/// Sums amounts, failing with `CalculationOverflow` instead of panicking.
pub fn checked_total<I>(amounts: I) -> EngineResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().try_fold(Decimal::ZERO, |total, amount| {
        total
            .checked_add(amount)
            .ok_or_else(|| EngineError::CalculationOverflow {
                message: format!("adding {} to {}", amount, total),
            })
    })
}

/// Parses a textual wage, rejecting non-numeric, negative and oversized values.
///
/// Plain decimals and exponent notation (`1e-2`) are both accepted.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::parse_wage;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_wage(" 9.50 ").unwrap(), Decimal::new(950, 2));
/// assert!(parse_wage("-1").is_err());
/// assert!(parse_wage("nove").is_err());
/// assert!(parse_wage("79228162514264337593543950335").is_err());
/// ```
pub fn parse_wage(raw: &str) -> EngineResult<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidWage {
            value: raw.to_string(),
            message: "wage is required".to_string(),
        });
    }

    let wage = Decimal::from_str(trimmed)
        .or_else(|e| Decimal::from_scientific(trimmed).map_err(|_| e))
        .map_err(|e| EngineError::InvalidWage {
            value: raw.to_string(),
            message: format!("not a decimal number ({})", e),
        })?;

    check_wage(wage, raw)
}

/// Validates a wage received as JSON (a number or a numeric string).
pub fn validate_wage(input: &Value) -> EngineResult<Decimal> {
    match input {
        Value::Number(number) => parse_wage(&number.to_string()),
        Value::String(text) => parse_wage(text),
        other => Err(EngineError::InvalidWage {
            value: other.to_string(),
            message: "expected a number or a numeric string".to_string(),
        }),
    }
}

/// Range check shared by wage updates and the configured default wage.
fn check_wage(wage: Decimal, raw: &str) -> EngineResult<Decimal> {
    if wage.is_sign_negative() && !wage.is_zero() {
        return Err(EngineError::InvalidWage {
            value: raw.to_string(),
            message: "wage cannot be negative".to_string(),
        });
    }
    if wage > max_hourly_wage() {
        return Err(EngineError::InvalidWage {
            value: raw.to_string(),
            message: format!("wage cannot exceed {}", max_hourly_wage()),
        });
    }
    Ok(wage)
}
