//! Calculation result models for the payroll engine.
//!
//! This module contains the per-shift [`CalculatedShift`] breakdown and the
//! [`PayrollStatement`] that aggregates a period's shifts for one employee.
//! None of these are stored; they are recomputed from shifts and wage
//! history on demand.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PayrollPeriod, Shift};

/// The pay breakdown for a single shift.
///
/// Carries the original shift fields alongside the rate used and the
/// computed minutes and salary.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_shift_pay;
/// use payroll_engine::models::{Shift, WageRate};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let rate = WageRate {
///     id: "wage_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     hourly_wage: Decimal::new(1200, 0),
///     transportation_fee_per_day: Decimal::new(300, 0),
///     effective_from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
/// };
/// let shift = Shift {
///     id: None,
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
///     start_time: "09:00".parse().unwrap(),
///     end_time: "18:00".parse().unwrap(),
///     break_minutes: 60,
///     note: None,
/// };
///
/// let calculated = calculate_shift_pay(&shift, &rate).unwrap();
/// assert_eq!(calculated.salary, Decimal::new(9600, 0));
/// assert_eq!(calculated.line_total(), Decimal::new(9900, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatedShift {
    /// The shift this breakdown was computed for.
    #[serde(flatten)]
    pub shift: Shift,
    /// Hourly wage of the rate applied.
    pub hourly_wage: Decimal,
    /// Transportation allowance of the rate applied (not part of `salary`).
    pub transportation_fee_per_day: Decimal,
    /// Minutes from start to end before the break is deducted.
    pub gross_minutes: u32,
    /// Payable minutes after the break is deducted.
    pub total_minutes: u32,
    /// Payable minutes outside the night window.
    pub normal_minutes: Decimal,
    /// Payable minutes inside the night window.
    pub night_minutes: Decimal,
    /// Wage for the shift, floored to a whole currency unit.
    pub salary: Decimal,
}

impl CalculatedShift {
    /// Salary plus the per-shift transportation allowance.
    pub fn line_total(&self) -> Decimal {
        self.salary + self.transportation_fee_per_day
    }
}

/// Aggregated totals over a set of calculated shifts.
///
/// Starts at zero, so a period with no shifts yields an all-zero total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementTotals {
    /// Sum of shift salaries.
    pub salary: Decimal,
    /// Sum of transportation allowances.
    pub transportation: Decimal,
    /// `salary + transportation`.
    pub total_pay: Decimal,
    /// Sum of payable minutes.
    pub total_minutes: u64,
    /// Sum of normal-rate minutes.
    pub normal_minutes: Decimal,
    /// Sum of night-rate minutes.
    pub night_minutes: Decimal,
    /// Whole hours worked, `floor(total_minutes / 60)`.
    pub total_hours: u64,
    /// Number of shifts counted.
    pub days: u32,
}

impl StatementTotals {
    /// Adds one shift's breakdown to the totals.
    pub fn add_shift(&mut self, shift: &CalculatedShift) {
        self.salary += shift.salary;
        self.transportation += shift.transportation_fee_per_day;
        self.total_pay = self.salary + self.transportation;
        self.total_minutes += u64::from(shift.total_minutes);
        self.normal_minutes += shift.normal_minutes;
        self.night_minutes += shift.night_minutes;
        self.total_hours = self.total_minutes / 60;
        self.days += 1;
    }

    /// Folds another set of totals into this one.
    pub fn merge(&mut self, other: &StatementTotals) {
        self.salary += other.salary;
        self.transportation += other.transportation;
        self.total_pay = self.salary + self.transportation;
        self.total_minutes += other.total_minutes;
        self.normal_minutes += other.normal_minutes;
        self.night_minutes += other.night_minutes;
        self.total_hours = self.total_minutes / 60;
        self.days += other.days;
    }
}

impl<'a> std::iter::Sum<&'a CalculatedShift> for StatementTotals {
    fn sum<I: Iterator<Item = &'a CalculatedShift>>(iter: I) -> Self {
        iter.fold(StatementTotals::default(), |mut totals, shift| {
            totals.add_shift(shift);
            totals
        })
    }
}

impl<'a> std::iter::Sum<&'a StatementTotals> for StatementTotals {
    fn sum<I: Iterator<Item = &'a StatementTotals>>(iter: I) -> Self {
        iter.fold(StatementTotals::default(), |mut acc, totals| {
            acc.merge(totals);
            acc
        })
    }
}

/// A payroll statement for one employee over one payroll period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollStatement {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the statement was computed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced the statement.
    pub engine_version: String,
    /// The employee the statement is for.
    pub employee_id: String,
    /// The period covered.
    pub period: PayrollPeriod,
    /// Per-shift breakdowns, ordered by date.
    pub shifts: Vec<CalculatedShift>,
    /// Aggregated totals.
    pub totals: StatementTotals,
}
