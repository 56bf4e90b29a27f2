//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed settings structure that is
//! deserialized from the YAML settings file.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::calculation::NIGHT_WINDOW_START;
use crate::models::{ClockTime, ClosingDay};

/// Default UTC offset for wall-clock "now": UTC+09:00.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 9 * 60;

fn default_company_name() -> String {
    "My Company".to_string()
}

fn default_night_shift_start() -> ClockTime {
    ClockTime::from_hm(NIGHT_WINDOW_START / 60, NIGHT_WINDOW_START % 60).unwrap_or(ClockTime::MIDNIGHT)
}

fn default_utc_offset_minutes() -> i32 {
    DEFAULT_UTC_OFFSET_MINUTES
}

/// Company-wide payroll settings.
///
/// A single snapshot is read at startup and passed explicitly into every
/// engine call that needs it.
///
/// # Example
///
/// ```
/// use payroll_engine::config::PayrollSettings;
///
/// let settings: PayrollSettings = serde_yaml::from_str("closing_date: 20").unwrap();
/// assert_eq!(settings.closing_date.day(), 20);
/// assert_eq!(settings.company_name, "My Company");
/// assert_eq!(settings.night_shift_start.to_string(), "22:00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSettings {
    /// Company name shown on statements.
    #[serde(default = "default_company_name")]
    pub company_name: String,
    /// Day of the month payroll periods close on (31 = end of month).
    #[serde(default)]
    pub closing_date: ClosingDay,
    /// Displayed start of night work. Not used by the pay calculation,
    /// which always applies the fixed 22:00-05:00 window.
    #[serde(default = "default_night_shift_start")]
    pub night_shift_start: ClockTime,
    /// Fixed offset from UTC, in minutes, used to derive the local date.
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
}

impl Default for PayrollSettings {
    fn default() -> Self {
        Self {
            company_name: default_company_name(),
            closing_date: ClosingDay::default(),
            night_shift_start: default_night_shift_start(),
            utc_offset_minutes: default_utc_offset_minutes(),
        }
    }
}

impl PayrollSettings {
    /// The configured fixed offset, or UTC if the value is out of range.
    pub fn offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix())
    }

    /// Converts a UTC instant into local wall-clock time.
    pub fn to_local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.offset()).naive_local()
    }

    /// The current local wall-clock time.
    pub fn now_local(&self) -> NaiveDateTime {
        self.to_local(Utc::now())
    }

    /// Returns true if the displayed night start differs from the window
    /// the calculator actually applies.
    pub fn night_start_is_display_only(&self) -> bool {
        self.night_shift_start.minutes_since_midnight() != NIGHT_WINDOW_START
    }
}
