//! Calculation logic for the payroll engine.
//!
//! This module contains the pure functions that make up the engine: wage
//! resolution from an employee's rate history, per-shift pay with the
//! night differential and proportional break apportionment, payroll period
//! resolution around a configurable closing day, and statement aggregation
//! that ties the three together.

mod payroll_period;
mod shift_pay;
mod statement;
mod wage_resolution;

pub use payroll_period::{current_period, last_day_of_month, period_for, period_label_for};
pub use shift_pay::{
    MINUTE_SCALE, NIGHT_DIFFERENTIAL, NIGHT_WINDOW_END, NIGHT_WINDOW_START, calculate_shift_pay,
    night_minutes, night_minutes_by_scan,
};
pub use statement::{build_statement, calculate_period_shifts};
pub use wage_resolution::{active_wage, resolve_wage};
