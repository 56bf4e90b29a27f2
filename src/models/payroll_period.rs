//! Payroll period models.
//!
//! This module contains the [`ClosingDay`] setting, the [`PeriodLabel`] a
//! period is billed under, and the resolved [`PayrollPeriod`] boundaries.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The day of the month a payroll period closes on.
///
/// Values run from 1 to 31; 31 means "the last day of the month" whatever
/// that month's length is.
///
/// # Example
///
/// ```
/// use payroll_engine::models::ClosingDay;
///
/// let closing = ClosingDay::new(20).unwrap();
/// assert_eq!(closing.day(), 20);
/// assert!(!closing.is_end_of_month());
///
/// assert!(ClosingDay::default().is_end_of_month());
/// assert!(ClosingDay::new(0).is_err());
/// assert!(ClosingDay::new(32).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ClosingDay(u32);

impl ClosingDay {
    /// Close on the last day of each month.
    pub const END_OF_MONTH: ClosingDay = ClosingDay(31);

    /// Validates a closing day in `1..=31`.
    pub fn new(day: u32) -> EngineResult<Self> {
        if (1..=31).contains(&day) {
            Ok(Self(day))
        } else {
            Err(EngineError::invalid_input(
                "closing_date",
                format!("must be between 1 and 31, got {}", day),
            ))
        }
    }

    /// The configured day of the month.
    pub fn day(self) -> u32 {
        self.0
    }

    /// Returns true for the end-of-month setting (31).
    pub fn is_end_of_month(self) -> bool {
        self.0 >= 31
    }
}

impl Default for ClosingDay {
    fn default() -> Self {
        Self::END_OF_MONTH
    }
}

impl TryFrom<u32> for ClosingDay {
    type Error = EngineError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClosingDay> for u32 {
    fn from(day: ClosingDay) -> Self {
        day.0
    }
}

/// The billing year and month a payroll period is named after.
///
/// Used for display and document titles only. Filtering records into a
/// period must use [`PayrollPeriod::start`] and [`PayrollPeriod::end`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PeriodLabel {
    /// Billing year.
    pub year: i32,
    /// Billing month, 1-12.
    pub month: u32,
}

impl PeriodLabel {
    /// Builds a label, rejecting months outside 1-12 and years outside the
    /// supported calendar range.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::invalid_input(
                "month",
                format!("must be between 1 and 12, got {}", month),
            ));
        }
        let years = NaiveDate::MIN.year()..=NaiveDate::MAX.year();
        if !years.contains(&year) {
            return Err(EngineError::invalid_input(
                "year",
                format!(
                    "must be between {} and {}, got {}",
                    years.start(),
                    years.end(),
                    year
                ),
            ));
        }
        Ok(Self { year, month })
    }

    /// The label following this one, rolling December into January.
    ///
    /// `None` if the year would overflow.
    pub fn next(self) -> Option<Self> {
        if self.month == 12 {
            Some(Self {
                year: self.year.checked_add(1)?,
                month: 1,
            })
        } else {
            Some(Self {
                year: self.year,
                month: self.month + 1,
            })
        }
    }

    /// The label preceding this one, rolling January back into December.
    ///
    /// `None` if the year would overflow.
    pub fn previous(self) -> Option<Self> {
        if self.month == 1 {
            Some(Self {
                year: self.year.checked_sub(1)?,
                month: 12,
            })
        } else {
            Some(Self {
                year: self.year,
                month: self.month - 1,
            })
        }
    }
}

impl fmt::Display for PeriodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A resolved payroll period.
///
/// Both bounds are inclusive local wall-clock instants: the period starts at
/// 00:00:00.000 of its first day and ends at 23:59:59.999 of its closing day.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::period_for;
/// use payroll_engine::models::ClosingDay;
/// use chrono::NaiveDate;
///
/// let period = period_for(2025, 1, ClosingDay::new(20).unwrap()).unwrap();
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2024, 12, 21).unwrap()));
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()));
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2025, 1, 21).unwrap()));
/// assert_eq!(period.label().to_string(), "2025-01");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// First instant of the period (inclusive).
    pub start: NaiveDateTime,
    /// Last instant of the period (inclusive).
    pub end: NaiveDateTime,
    /// Billing year label.
    pub year: i32,
    /// Billing month label, 1-12.
    pub month: u32,
}

impl PayrollPeriod {
    /// The billing label of this period.
    pub fn label(&self) -> PeriodLabel {
        PeriodLabel {
            year: self.year,
            month: self.month,
        }
    }

    /// Checks whether an instant falls within the period (inclusive).
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Checks whether a calendar day, taken at 00:00, falls within the period.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.contains(date.and_time(NaiveTime::MIN))
    }

    /// First calendar day of the period.
    pub fn first_day(&self) -> NaiveDate {
        self.start.date()
    }

    /// Last calendar day of the period.
    pub fn last_day(&self) -> NaiveDate {
        self.end.date()
    }

    /// Number of calendar days covered.
    pub fn day_count(&self) -> i64 {
        (self.last_day() - self.first_day()).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_period() -> PayrollPeriod {
        PayrollPeriod {
            start: NaiveDate::from_ymd_opt(2024, 12, 21)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 1, 20)
                .unwrap()
                .and_hms_milli_opt(23, 59, 59, 999)
                .unwrap(),
            year: 2025,
            month: 1,
        }
    }

    #[test]
    fn test_closing_day_accepts_full_range() {
        for day in 1..=31 {
            assert_eq!(ClosingDay::new(day).unwrap().day(), day);
        }
        assert!(ClosingDay::new(31).unwrap().is_end_of_month());
        assert!(!ClosingDay::new(30).unwrap().is_end_of_month());
    }

    #[test]
    fn test_closing_day_serde() {
        let day: ClosingDay = serde_json::from_str("25").unwrap();
        assert_eq!(day.day(), 25);
        assert_eq!(serde_json::to_string(&day).unwrap(), "25");
        assert!(serde_json::from_str::<ClosingDay>("0").is_err());
        assert!(serde_json::from_str::<ClosingDay>("40").is_err());
    }

    #[test]
    fn test_label_rejects_bad_month() {
        assert!(PeriodLabel::new(2024, 0).is_err());
        assert!(PeriodLabel::new(2024, 13).is_err());
        assert!(PeriodLabel::new(2024, 12).is_ok());
    }

    #[test]
    fn test_label_rejects_years_outside_calendar() {
        assert!(PeriodLabel::new(i32::MIN, 1).is_err());
        assert!(PeriodLabel::new(i32::MAX, 12).is_err());
        assert!(PeriodLabel::new(NaiveDate::MAX.year(), 12).is_ok());
        assert!(PeriodLabel::new(NaiveDate::MIN.year(), 1).is_ok());
    }

    #[test]
    fn test_label_next_and_previous_roll_years() {
        let december = PeriodLabel::new(2024, 12).unwrap();
        assert_eq!(december.next(), Some(PeriodLabel::new(2025, 1).unwrap()));
        assert_eq!(december.next().and_then(PeriodLabel::previous), Some(december));

        let june = PeriodLabel::new(2024, 6).unwrap();
        assert_eq!(june.next(), Some(PeriodLabel::new(2024, 7).unwrap()));
        assert_eq!(june.previous(), Some(PeriodLabel::new(2024, 5).unwrap()));
    }

    #[test]
    fn test_label_next_and_previous_stop_at_year_limits() {
        let last = PeriodLabel { year: i32::MAX, month: 12 };
        assert_eq!(last.next(), None);

        let first = PeriodLabel { year: i32::MIN, month: 1 };
        assert_eq!(first.previous(), None);
    }

    #[test]
    fn test_label_display() {
        let label = PeriodLabel::new(2025, 3).unwrap();
        assert_eq!(label.to_string(), "2025-03");
    }

    #[test]
    fn test_contains_is_inclusive_on_both_ends() {
        let period = sample_period();
        assert!(period.contains(period.start));
        assert!(period.contains(period.end));
        assert!(!period.contains(period.start - chrono::Duration::milliseconds(1)));
        assert!(!period.contains(period.end + chrono::Duration::milliseconds(1)));
    }

    #[test]
    fn test_contains_date() {
        let period = sample_period();
        assert!(period.contains_date(NaiveDate::from_ymd_opt(2024, 12, 21).unwrap()));
        assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
        assert!(!period.contains_date(NaiveDate::from_ymd_opt(2024, 12, 20).unwrap()));
        assert!(!period.contains_date(NaiveDate::from_ymd_opt(2025, 1, 21).unwrap()));
    }

    #[test]
    fn test_day_count() {
        assert_eq!(sample_period().day_count(), 31);
    }

    #[test]
    fn test_serialize_payroll_period() {
        let json = serde_json::to_string(&sample_period()).unwrap();
        assert!(json.contains("\"start\":\"2024-12-21T00:00:00\""));
        assert!(json.contains("\"end\":\"2025-01-20T23:59:59.999\""));
        assert!(json.contains("\"year\":2025"));
        assert!(json.contains("\"month\":1"));
    }
}
