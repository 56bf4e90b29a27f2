//! Wage rate resolution.
//!
//! This module picks the [`WageRate`] in force on a given calendar day from
//! an employee's append-only wage history.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::WageRate;

/// Finds the rate that has started by `on`, without any fallback.
///
/// Among rates with `effective_from <= on`, the latest one wins. When several
/// rates share that `effective_from`, the one listed first in `history` wins.
/// Returns `None` when every rate starts after `on` or the history is empty.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::active_wage;
/// use payroll_engine::models::WageRate;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let history = vec![WageRate {
///     id: "wage_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     hourly_wage: Decimal::new(1100, 0),
///     transportation_fee_per_day: Decimal::ZERO,
///     effective_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
/// }];
///
/// assert!(active_wage(&history, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()).is_none());
/// assert!(active_wage(&history, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()).is_some());
/// ```
pub fn active_wage(history: &[WageRate], on: NaiveDate) -> Option<&WageRate> {
    history
        .iter()
        .filter(|rate| rate.is_effective_on(on))
        .fold(None, |best: Option<&WageRate>, rate| match best {
            Some(current) if current.effective_from >= rate.effective_from => Some(current),
            _ => Some(rate),
        })
}

/// Resolves the wage rate applicable on a calendar day.
///
/// Resolution order:
/// 1. The rate returned by [`active_wage`] (latest `effective_from <= on`).
/// 2. If every rate starts after `on`, the rate with the earliest
///    `effective_from` in the whole history. This covers shifts recorded
///    before the employee's first wage entry.
///
/// Ties on `effective_from` go to the rate listed first in `history`, for
/// both steps.
///
/// # Errors
///
/// Returns [`EngineError::NoApplicableRate`] when `history` is empty.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::resolve_wage;
/// use payroll_engine::models::WageRate;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// fn rate(id: &str, wage: i64, from: NaiveDate) -> WageRate {
///     WageRate {
///         id: id.to_string(),
///         employee_id: "emp_001".to_string(),
///         hourly_wage: Decimal::new(wage, 0),
///         transportation_fee_per_day: Decimal::ZERO,
///         effective_from: from,
///     }
/// }
///
/// let history = vec![
///     rate("june", 1100, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
///     rate("january", 1000, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
/// ];
///
/// let resolved = resolve_wage(&history, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()).unwrap();
/// assert_eq!(resolved.id, "january");
/// ```
pub fn resolve_wage(history: &[WageRate], on: NaiveDate) -> EngineResult<&WageRate> {
    if let Some(rate) = active_wage(history, on) {
        return Ok(rate);
    }

    let earliest = history
        .iter()
        .min_by_key(|rate| rate.effective_from)
        .ok_or(EngineError::NoApplicableRate { date: on })?;

    debug!(
        date = %on,
        rate_id = %earliest.id,
        effective_from = %earliest.effective_from,
        "No rate effective yet, falling back to earliest known rate"
    );
    Ok(earliest)
}
