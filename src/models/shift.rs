//! Shift model.
//!
//! A shift is recorded against the calendar day it starts on, with local
//! wall-clock start and end times. An end time at or before the start time
//! means the shift ran past midnight into the next day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::clock_time::{ClockTime, MINUTES_PER_DAY};

/// Represents a single worked shift.
///
/// Record stores keep at most one shift per employee per calendar day;
/// the engine itself does not enforce that.
///
/// # Examples
///
/// ```
/// use payroll_engine::models::{ClockTime, Shift};
/// use chrono::NaiveDate;
///
/// let shift = Shift {
///     id: None,
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
///     start_time: "20:00".parse().unwrap(),
///     end_time: "06:00".parse().unwrap(),
///     break_minutes: 60,
///     note: None,
/// };
/// assert!(shift.crosses_midnight());
/// assert_eq!(shift.gross_minutes(), 600);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Identifier assigned by the record store, if persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The employee who worked the shift.
    pub employee_id: String,
    /// The calendar day the shift starts on.
    pub date: NaiveDate,
    /// Local start time.
    pub start_time: ClockTime,
    /// Local end time; at or before `start_time` means the next day.
    pub end_time: ClockTime,
    /// Unpaid break taken during the shift, in minutes.
    #[serde(default)]
    pub break_minutes: u32,
    /// Free-form note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Shift {
    /// Returns true if the shift ends on the following calendar day.
    ///
    /// Equal start and end times count as crossing: the shift is a full
    /// 24 hours, never zero-length.
    pub fn crosses_midnight(&self) -> bool {
        self.end_time <= self.start_time
    }

    /// Start and end as minutes on a two-day timeline starting at 00:00 of
    /// [`Shift::date`]. The end is in `(start, start + 1440]`.
    pub fn minute_span(&self) -> (u32, u32) {
        let start = self.start_time.minutes_since_midnight();
        let mut end = self.end_time.minutes_since_midnight();
        if end <= start {
            end += MINUTES_PER_DAY;
        }
        (start, end)
    }

    /// Minutes between start and end, before any break is deducted.
    pub fn gross_minutes(&self) -> u32 {
        let (start, end) = self.minute_span();
        end - start
    }
}
