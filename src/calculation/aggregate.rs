//! Aggregation of reconstructed shifts into per-employee and grand totals.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{EmployeeId, EmployeeTotals, Shift, Summary};

use super::valuation::{checked_total, valuate};

/// Returns the wage for an employee: the configured one, else `default_wage`.
pub fn wage_for(
    employee_id: EmployeeId,
    wage_by_employee: &HashMap<EmployeeId, Decimal>,
    default_wage: Decimal,
) -> Decimal {
    wage_by_employee
        .get(&employee_id)
        .copied()
        .unwrap_or(default_wage)
}

/// Aggregates shifts into a [`Summary`].
///
/// Hours are summed per employee and valued once with that employee's wage,
/// rather than per shift. Grand totals are the sums of the per-employee rows.
/// Rows come out in employee id order, so identical input always yields an
/// identical summary.
///
/// Fails with `CalculationOverflow` when a pay total leaves the decimal range.
///
/// # Arguments
///
/// * `shifts_by_employee` - Shifts inside the filtered window, per employee
/// * `wage_by_employee` - Configured wages; employees missing here use `default_wage`
/// * `default_wage` - Fallback hourly wage
///
/// # Example
///
/// ```
/// use std::collections::{BTreeMap, HashMap};
///
/// use attendance_engine::calculation::aggregate;
/// use attendance_engine::models::Shift;
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let start = Utc.with_ymd_and_hms(2026, 1, 15, 8, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2026, 1, 15, 15, 0, 0).unwrap();
/// let shifts = BTreeMap::from([(1, vec![Shift::new(1, start, end)])]);
///
/// let summary = aggregate(&shifts, &HashMap::new(), Decimal::new(700, 2)).unwrap();
/// assert_eq!(summary.grand_total_hours, Decimal::new(7, 0));
/// assert_eq!(summary.grand_total_pay, Decimal::new(4900, 2));
/// ```
pub fn aggregate(
    shifts_by_employee: &BTreeMap<EmployeeId, Vec<Shift>>,
    wage_by_employee: &HashMap<EmployeeId, Decimal>,
    default_wage: Decimal,
) -> EngineResult<Summary> {
    let per_employee = shifts_by_employee
        .iter()
        .map(|(&employee_id, shifts)| {
            let total_hours = checked_total(shifts.iter().map(|s| s.hours))?;
            let wage = wage_for(employee_id, wage_by_employee, default_wage);
            Ok(EmployeeTotals {
                employee_id,
                shift_count: shifts.len(),
                total_hours,
                wage,
                total_pay: valuate(total_hours, wage)?,
            })
        })
        .collect::<EngineResult<Vec<EmployeeTotals>>>()?;

    let grand_total_hours = checked_total(per_employee.iter().map(|row| row.total_hours))?;
    let grand_total_pay = checked_total(per_employee.iter().map(|row| row.total_pay))?;

    Ok(Summary {
        per_employee,
        grand_total_hours,
        grand_total_pay,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn dec(num: i64, scale: u32) -> Decimal {
        Decimal::new(num, scale)
    }

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, day, hour, minute, 0).unwrap()
    }

    fn shift(employee_id: EmployeeId, day: u32, from: u32, to: u32) -> Shift {
        Shift::new(employee_id, at(day, from, 0), at(day, to, 0))
    }

    #[test]
    fn test_seven_hours_at_seven_pays_forty_nine() {
        let shifts = BTreeMap::from([(1, vec![shift(1, 15, 8, 15)])]);
        let summary = aggregate(&shifts, &HashMap::new(), dec(7, 0)).unwrap();

        let row = summary.for_employee(1).unwrap();
        assert_eq!(row.total_hours, dec(7, 0));
        assert_eq!(row.total_pay, dec(4900, 2));
        assert_eq!(summary.grand_total_pay, dec(49, 0));
    }

    #[test]
    fn test_missing_wage_uses_default() {
        let shifts = BTreeMap::from([(1, vec![shift(1, 15, 9, 10)])]);
        let summary = aggregate(&shifts, &HashMap::new(), dec(700, 2)).unwrap();
        assert_eq!(summary.per_employee[0].wage, dec(700, 2));
    }

    #[test]
    fn test_configured_wage_overrides_default() {
        let shifts = BTreeMap::from([(1, vec![shift(1, 15, 9, 13)])]);
        let wages = HashMap::from([(1, dec(1250, 2))]);
        let summary = aggregate(&shifts, &wages, dec(700, 2)).unwrap();

        let row = &summary.per_employee[0];
        assert_eq!(row.wage, dec(1250, 2));
        assert_eq!(row.total_pay, dec(50, 0));
    }

    #[test]
    fn test_grand_totals_sum_rows() {
        let shifts = BTreeMap::from([
            (2, vec![shift(2, 15, 8, 12), shift(2, 16, 8, 10)]),
            (1, vec![shift(1, 15, 9, 17)]),
        ]);
        let wages = HashMap::from([(2, dec(10, 0))]);
        let summary = aggregate(&shifts, &wages, dec(7, 0)).unwrap();

        let ids: Vec<EmployeeId> = summary.per_employee.iter().map(|r| r.employee_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(summary.per_employee[1].shift_count, 2);
        assert_eq!(summary.grand_total_hours, dec(14, 0));
        // 8h * 7 + 6h * 10
        assert_eq!(summary.grand_total_pay, dec(116, 0));
    }

    #[test]
    fn test_employee_without_shifts_has_zero_row() {
        let shifts = BTreeMap::from([(5, Vec::new())]);
        let summary = aggregate(&shifts, &HashMap::new(), dec(7, 0)).unwrap();
        assert_eq!(summary.per_employee[0].total_hours, Decimal::ZERO);
        assert_eq!(summary.per_employee[0].total_pay, Decimal::ZERO);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let third_of_hour = Shift::new(1, at(15, 8, 0), at(15, 8, 20));
        let shifts = BTreeMap::from([
            (1, vec![third_of_hour.clone(), third_of_hour.clone(), third_of_hour]),
            (2, vec![shift(2, 15, 8, 15)]),
        ]);
        let wages = HashMap::from([(1, dec(913, 2))]);

        let first = aggregate(&shifts, &wages, dec(7, 0)).unwrap();
        let second = aggregate(&shifts, &wages, dec(7, 0)).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_pay_overflow_is_an_error() {
        let shifts = BTreeMap::from([(1, vec![shift(1, 15, 8, 16)])]);
        let wages = HashMap::from([(1, Decimal::MAX)]);
        let result = aggregate(&shifts, &wages, dec(7, 0));
        assert!(matches!(
            result,
            Err(crate::error::EngineError::CalculationOverflow { .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        let summary = aggregate(&BTreeMap::new(), &HashMap::new(), dec(7, 0)).unwrap();
        assert!(summary.per_employee.is_empty());
        assert_eq!(summary.grand_total_hours, Decimal::ZERO);
        assert_eq!(summary.grand_total_pay, Decimal::ZERO);
    }
}
