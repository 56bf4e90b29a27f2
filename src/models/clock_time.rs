//! Wall-clock time of day in `HH:mm` form.
//!
//! Shift start and end times are recorded as plain local wall-clock values
//! without a date. [`ClockTime`] validates them once, at the boundary, so
//! the calculators never see a malformed time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Number of minutes in a calendar day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A validated local time of day with minute precision.
///
/// Serializes as a zero-padded `"HH:mm"` string.
///
/// # Example
///
/// ```
/// use payroll_engine::models::ClockTime;
///
/// let start: ClockTime = "22:30".parse().unwrap();
/// assert_eq!(start.minutes_since_midnight(), 1350);
/// assert_eq!(start.to_string(), "22:30");
///
/// assert!("24:00".parse::<ClockTime>().is_err());
/// assert!("9am".parse::<ClockTime>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    minutes: u32,
}

impl ClockTime {
    /// 00:00.
    pub const MIDNIGHT: ClockTime = ClockTime { minutes: 0 };

    /// Builds a time from an hour (0-23) and a minute (0-59).
    pub fn from_hm(hour: u32, minute: u32) -> EngineResult<Self> {
        if hour > 23 {
            return Err(EngineError::invalid_input(
                "time",
                format!("hour must be between 0 and 23, got {}", hour),
            ));
        }
        if minute > 59 {
            return Err(EngineError::invalid_input(
                "time",
                format!("minute must be between 0 and 59, got {}", minute),
            ));
        }
        Ok(Self {
            minutes: hour * 60 + minute,
        })
    }

    /// Parses an `HH:mm` string, reporting failures against `field`.
    pub fn parse_field(value: &str, field: &str) -> EngineResult<Self> {
        value.parse::<ClockTime>().map_err(|err| match err {
            EngineError::InvalidInput { message, .. } => EngineError::invalid_input(field, message),
            other => other,
        })
    }

    /// The hour component.
    pub fn hour(&self) -> u32 {
        self.minutes / 60
    }

    /// The minute component.
    pub fn minute(&self) -> u32 {
        self.minutes % 60
    }

    /// Minutes elapsed since 00:00 (`H * 60 + M`).
    pub fn minutes_since_midnight(&self) -> u32 {
        self.minutes
    }
}

fn parse_component(part: &str, input: &str) -> EngineResult<u32> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EngineError::invalid_input(
            "time",
            format!("expected HH:mm, got '{}'", input),
        ));
    }
    part.parse::<u32>().map_err(|_| {
        EngineError::invalid_input("time", format!("expected HH:mm, got '{}'", input))
    })
}

impl FromStr for ClockTime {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (hour, minute) = trimmed.split_once(':').ok_or_else(|| {
            EngineError::invalid_input("time", format!("expected HH:mm, got '{}'", s))
        })?;
        let hour = parse_component(hour, s)?;
        let minute = parse_component(minute, s)?;
        Self::from_hm(hour, minute)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl TryFrom<String> for ClockTime {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}
