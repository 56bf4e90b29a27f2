//! Wage rate history records.
//!
//! A [`WageRate`] is appended whenever an employee's pay changes. Records are
//! never edited in place, so an employee's rates form an append-only history
//! that the wage resolver walks to find the rate in force on a given day.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{EngineError, EngineResult};

/// One entry in an employee's wage history.
///
/// # Example
///
/// ```
/// use payroll_engine::models::WageRate;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let rate = WageRate {
///     id: "wage_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     hourly_wage: Decimal::new(1200, 0),
///     transportation_fee_per_day: Decimal::new(500, 0),
///     effective_from: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
/// };
/// assert!(rate.is_effective_on(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageRate {
    /// Unique identifier for the record.
    pub id: String,
    /// The employee this rate belongs to.
    pub employee_id: String,
    /// Pay per hour in whole currency units (fractions allowed).
    pub hourly_wage: Decimal,
    /// Flat allowance added once per worked shift.
    #[serde(default)]
    pub transportation_fee_per_day: Decimal,
    /// First calendar day this rate applies to.
    #[serde(deserialize_with = "deserialize_calendar_day")]
    pub effective_from: NaiveDate,
}

impl WageRate {
    /// Returns true if this rate has started by `date`.
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        self.effective_from <= date
    }
}

/// Parses a calendar day from either a date or a timestamp string.
///
/// Record stores hand back `effective_from` in several shapes; any
/// time-of-day component is discarded. Accepted forms:
///
/// - `2024-01-01`
/// - `2024-01-01T09:30:00` / `2024-01-01 09:30:00` (fractional seconds allowed)
/// - RFC 3339 with offset, truncated to the day in that offset
///
/// # Example
///
/// ```
/// use payroll_engine::models::parse_calendar_day;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// assert_eq!(parse_calendar_day("2024-06-01").unwrap(), expected);
/// assert_eq!(parse_calendar_day("2024-06-01 18:45:00").unwrap(), expected);
/// ```
pub fn parse_calendar_day(value: &str) -> EngineResult<NaiveDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(datetime.date());
        }
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.date_naive());
    }

    Err(EngineError::invalid_input(
        "effective_from",
        format!("expected a date or timestamp, got '{}'", value),
    ))
}

fn deserialize_calendar_day<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_day(&raw).map_err(serde::de::Error::custom)
}
