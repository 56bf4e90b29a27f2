//! Payroll statement aggregation.
//!
//! Combines the three engine components for one employee and one period:
//! filter the employee's shifts into the period, resolve the wage on each
//! shift date, compute each shift and sum the results.

use chrono::Utc;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{CalculatedShift, PayrollPeriod, PayrollStatement, Shift, StatementTotals, WageRate};

use super::shift_pay::calculate_shift_pay;
use super::wage_resolution::resolve_wage;

/// Computes every shift of `employee_id` that falls inside `period`.
///
/// A shift belongs to the period when its date, taken at 00:00, lies within
/// `[period.start, period.end]`. Shifts of other employees are ignored. The
/// result is ordered by date; shifts on the same date keep their input order.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::NoApplicableRate`] if a shift falls
/// in the period but `history` is empty. With no shifts in the period the
/// history is never consulted.
pub fn calculate_period_shifts(
    employee_id: &str,
    history: &[WageRate],
    shifts: &[Shift],
    period: &PayrollPeriod,
) -> EngineResult<Vec<CalculatedShift>> {
    let mut in_period: Vec<&Shift> = shifts
        .iter()
        .filter(|shift| shift.employee_id == employee_id && period.contains_date(shift.date))
        .collect();
    in_period.sort_by_key(|shift| shift.date);

    in_period
        .into_iter()
        .map(|shift| {
            let rate = resolve_wage(history, shift.date)?;
            calculate_shift_pay(shift, rate)
        })
        .collect()
}

/// Builds a payroll statement for one employee over one period.
///
/// Each shift line is paid at the wage in force on the shift's own date, so
/// a rate change mid-period splits the statement across both rates. The
/// transportation allowance is added once per shift on top of salary.
///
/// A period with no shifts produces an empty statement with zero totals.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{build_statement, period_for};
/// use payroll_engine::models::ClosingDay;
/// use rust_decimal::Decimal;
///
/// let period = period_for(2024, 3, ClosingDay::END_OF_MONTH).unwrap();
/// let statement = build_statement("emp_001", &[], &[], &period).unwrap();
/// assert!(statement.shifts.is_empty());
/// assert_eq!(statement.totals.total_pay, Decimal::ZERO);
/// ```
pub fn build_statement(
    employee_id: &str,
    history: &[WageRate],
    shifts: &[Shift],
    period: &PayrollPeriod,
) -> EngineResult<PayrollStatement> {
    let calculated = calculate_period_shifts(employee_id, history, shifts, period)?;
    let totals: StatementTotals = calculated.iter().sum();

    Ok(PayrollStatement {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        employee_id: employee_id.to_string(),
        period: period.clone(),
        shifts: calculated,
        totals,
    })
}
