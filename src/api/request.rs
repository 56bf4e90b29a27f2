//! Request types for the payroll engine API.
//!
//! Times and dates arrive as strings and are validated when the request is
//! converted into domain types, so a bad value is reported against the
//! field it came from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{ClockTime, ClosingDay, Shift, WageRate};

/// Shift information in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftRequest {
    /// Identifier of the stored shift, if any.
    #[serde(default)]
    pub id: Option<String>,
    /// The employee who worked the shift.
    pub employee_id: String,
    /// Calendar day the shift starts on (`YYYY-MM-DD`).
    pub date: String,
    /// Start time (`HH:mm`).
    pub start_time: String,
    /// End time (`HH:mm`); at or before the start means the next day.
    pub end_time: String,
    /// Unpaid break in minutes.
    #[serde(default)]
    pub break_minutes: i64,
    /// Free-form note.
    #[serde(default)]
    pub note: Option<String>,
}

impl TryFrom<ShiftRequest> for Shift {
    type Error = EngineError;

    fn try_from(req: ShiftRequest) -> Result<Self, Self::Error> {
        let date = parse_date(&req.date, "date")?;
        let start_time = ClockTime::parse_field(&req.start_time, "start_time")?;
        let end_time = ClockTime::parse_field(&req.end_time, "end_time")?;

        let break_minutes = u32::try_from(req.break_minutes).map_err(|_| {
            EngineError::invalid_input(
                "break_minutes",
                format!("must be a non-negative number of minutes, got {}", req.break_minutes),
            )
        })?;

        Ok(Shift {
            id: req.id,
            employee_id: req.employee_id,
            date,
            start_time,
            end_time,
            break_minutes,
            note: req.note,
        })
    }
}

/// Request body for `POST /shifts/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateShiftRequest {
    /// The shift to price.
    pub shift: ShiftRequest,
    /// The wage rate to apply.
    pub rate: WageRate,
}

/// Request body for `POST /periods/resolve`.
///
/// Give either `date` or both `year` and `month`. With none of them the
/// period containing the current local time is returned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolvePeriodRequest {
    /// A calendar day whose period should be returned.
    #[serde(default)]
    pub date: Option<String>,
    /// Billing year of the period.
    #[serde(default)]
    pub year: Option<i32>,
    /// Billing month of the period.
    #[serde(default)]
    pub month: Option<u32>,
    /// Overrides the configured closing day.
    #[serde(default)]
    pub closing_date: Option<u32>,
}

/// Request body for `POST /statements`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementRequest {
    /// The employee to build the statement for.
    pub employee_id: String,
    /// The employee's wage history, in any order.
    #[serde(default)]
    pub wage_history: Vec<WageRate>,
    /// Candidate shifts; those outside the period are ignored.
    #[serde(default)]
    pub shifts: Vec<ShiftRequest>,
    /// Billing year of the period (current period when absent).
    #[serde(default)]
    pub year: Option<i32>,
    /// Billing month of the period (current period when absent).
    #[serde(default)]
    pub month: Option<u32>,
    /// Overrides the configured closing day.
    #[serde(default)]
    pub closing_date: Option<u32>,
}

/// How the caller identified a payroll period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodSelector {
    /// The period a calendar day falls in.
    Date(NaiveDate),
    /// The period with this billing year and month.
    Label {
        /// Billing year.
        year: i32,
        /// Billing month.
        month: u32,
    },
    /// The period containing the current local time.
    Current,
}

impl PeriodSelector {
    fn from_parts(date: Option<&str>, year: Option<i32>, month: Option<u32>) -> EngineResult<Self> {
        if let Some(raw) = date {
            return Ok(PeriodSelector::Date(parse_date(raw, "date")?));
        }
        match (year, month) {
            (Some(year), Some(month)) => Ok(PeriodSelector::Label { year, month }),
            (None, None) => Ok(PeriodSelector::Current),
            (Some(_), None) => Err(EngineError::invalid_input(
                "month",
                "month is required when year is given",
            )),
            (None, Some(_)) => Err(EngineError::invalid_input(
                "year",
                "year is required when month is given",
            )),
        }
    }
}

impl ResolvePeriodRequest {
    /// The requested period selector.
    pub fn selector(&self) -> EngineResult<PeriodSelector> {
        PeriodSelector::from_parts(self.date.as_deref(), self.year, self.month)
    }

    /// The closing day override, if one was given.
    pub fn closing_day(&self) -> EngineResult<Option<ClosingDay>> {
        self.closing_date.map(ClosingDay::new).transpose()
    }
}

impl StatementRequest {
    /// The requested period selector.
    pub fn selector(&self) -> EngineResult<PeriodSelector> {
        PeriodSelector::from_parts(None, self.year, self.month)
    }

    /// The closing day override, if one was given.
    pub fn closing_day(&self) -> EngineResult<Option<ClosingDay>> {
        self.closing_date.map(ClosingDay::new).transpose()
    }
}

fn parse_date(value: &str, field: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        EngineError::invalid_input(field, format!("expected YYYY-MM-DD, got '{}'", value))
    })
}
