//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod clock_time;
mod payroll_period;
mod shift;
mod wage_rate;

pub use calculation_result::{CalculatedShift, PayrollStatement, StatementTotals};
pub use clock_time::{ClockTime, MINUTES_PER_DAY};
pub use payroll_period::{ClosingDay, PayrollPeriod, PeriodLabel};
pub use shift::Shift;
pub use wage_rate::{WageRate, parse_calendar_day};
