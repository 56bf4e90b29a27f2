//! Payroll period resolution.
//!
//! A payroll period is a month-like billing cycle that ends on a configured
//! closing day. The period labelled "month M" ends on the closing day of M
//! and starts the day after the closing day of the month before. A closing
//! day of 31 means plain calendar months.
//!
//! All instants are naive local wall-clock values; see
//! [`crate::config::PayrollSettings::now_local`] for how "now" is produced.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{EngineError, EngineResult};
use crate::models::{ClosingDay, PayrollPeriod, PeriodLabel};

fn calendar_date(year: i32, month: u32, day: u32) -> EngineResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        EngineError::invalid_input(
            "date",
            format!("{:04}-{:02}-{:02} is not a representable date", year, month, day),
        )
    })
}

fn year_out_of_range(year: i32) -> EngineError {
    EngineError::invalid_input("year", format!("{} is out of range", year))
}

fn end_of_day(date: NaiveDate) -> EngineResult<NaiveDateTime> {
    date.and_hms_milli_opt(23, 59, 59, 999).ok_or_else(|| EngineError::CalculationError {
        message: format!("cannot build end of day for {}", date),
    })
}

/// Returns the last day of a month.
///
/// Computed as "day 0 of the following month": the first of the next month
/// minus one day, so December rolls into January of the next year and
/// February follows the leap-year rule.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::last_day_of_month;
///
/// assert_eq!(last_day_of_month(2024, 2).unwrap(), 29);
/// assert_eq!(last_day_of_month(2023, 2).unwrap(), 28);
/// assert_eq!(last_day_of_month(2024, 12).unwrap(), 31);
/// assert!(last_day_of_month(2024, 13).is_err());
/// ```
pub fn last_day_of_month(year: i32, month: u32) -> EngineResult<u32> {
    let next = PeriodLabel::new(year, month)?
        .next()
        .ok_or_else(|| year_out_of_range(year))?;
    let first_of_next = calendar_date(next.year, next.month, 1)?;
    first_of_next
        .pred_opt()
        .map(|date| date.day())
        .ok_or_else(|| year_out_of_range(year))
}

/// The calendar day a month actually closes on.
///
/// A closing day past the end of a short month closes on its last day.
fn effective_closing_date(label: PeriodLabel, closing: ClosingDay) -> EngineResult<NaiveDate> {
    let day = closing
        .day()
        .min(last_day_of_month(label.year, label.month)?);
    calendar_date(label.year, label.month, day)
}

/// Computes the boundaries of the period labelled `year`/`month`.
///
/// - Closing day 31: `[day 1 00:00:00.000, last day 23:59:59.999]` of the month.
/// - Otherwise: from 00:00:00.000 on the day after the previous month's
///   closing day through 23:59:59.999 on this month's closing day.
///
/// A closing day that does not exist in a month (30 in February, say) closes
/// on that month's last day, and the next period starts on the 1st.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] for a month outside 1-12 or a year
/// outside the supported calendar range.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::period_for;
/// use payroll_engine::models::ClosingDay;
/// use chrono::NaiveDate;
///
/// let period = period_for(2025, 1, ClosingDay::new(20).unwrap()).unwrap();
/// assert_eq!(period.first_day(), NaiveDate::from_ymd_opt(2024, 12, 21).unwrap());
/// assert_eq!(period.last_day(), NaiveDate::from_ymd_opt(2025, 1, 20).unwrap());
/// assert_eq!((period.year, period.month), (2025, 1));
/// ```
pub fn period_for(year: i32, month: u32, closing: ClosingDay) -> EngineResult<PayrollPeriod> {
    let label = PeriodLabel::new(year, month)?;

    let (first_day, last_day) = if closing.is_end_of_month() {
        (
            calendar_date(year, month, 1)?,
            calendar_date(year, month, last_day_of_month(year, month)?)?,
        )
    } else {
        let previous = label.previous().ok_or_else(|| year_out_of_range(year))?;
        let previous_close = effective_closing_date(previous, closing)?;
        let first_day = previous_close
            .succ_opt()
            .ok_or_else(|| year_out_of_range(year))?;
        (first_day, effective_closing_date(label, closing)?)
    };

    Ok(PayrollPeriod {
        start: first_day.and_time(NaiveTime::MIN),
        end: end_of_day(last_day)?,
        year,
        month,
    })
}

/// Determines which labelled period a calendar day belongs to.
///
/// With a closing day of 31 the label is the date's own month. Otherwise a
/// day after the closing day belongs to the next month's label (December
/// rolls into January of the next year), and any other day to its own
/// month's label.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::period_label_for;
/// use payroll_engine::models::{ClosingDay, PeriodLabel};
/// use chrono::NaiveDate;
///
/// let closing = ClosingDay::new(20).unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
/// assert_eq!(period_label_for(date, closing), PeriodLabel::new(2025, 1).unwrap());
/// ```
pub fn period_label_for(date: NaiveDate, closing: ClosingDay) -> PeriodLabel {
    let own = PeriodLabel {
        year: date.year(),
        month: date.month(),
    };
    // A clamped short-month close never changes this comparison: no day of
    // the month exceeds its own length.
    if closing.is_end_of_month() || date.day() <= closing.day() {
        own
    } else {
        // A calendar year is far below i32::MAX, so the next label exists.
        own.next().unwrap_or(own)
    }
}

/// Resolves the period containing `now`, with its label.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::current_period;
/// use payroll_engine::models::ClosingDay;
/// use chrono::NaiveDate;
///
/// let now = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap().and_hms_opt(14, 30, 0).unwrap();
/// let period = current_period(ClosingDay::new(20).unwrap(), now).unwrap();
/// assert_eq!((period.year, period.month), (2025, 1));
/// assert!(period.contains(now));
/// ```
pub fn current_period(closing: ClosingDay, now: NaiveDateTime) -> EngineResult<PayrollPeriod> {
    let label = period_label_for(now.date(), closing);
    period_for(label.year, label.month, closing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn closing(day: u32) -> ClosingDay {
        ClosingDay::new(day).unwrap()
    }

    /// PR-001: end-of-month closing gives calendar months
    #[test]
    fn test_end_of_month_period() {
        let period = period_for(2024, 3, ClosingDay::END_OF_MONTH).unwrap();
        assert_eq!(period.start, date(2024, 3, 1).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(
            period.end,
            date(2024, 3, 31).and_hms_milli_opt(23, 59, 59, 999).unwrap()
        );
        assert_eq!(period.day_count(), 31);
    }

    /// PR-002: closing day 20 spans the year boundary
    #[test]
    fn test_closing_20_january_period() {
        let period = period_for(2025, 1, closing(20)).unwrap();
        assert_eq!(period.start, date(2024, 12, 21).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(
            period.end,
            date(2025, 1, 20).and_hms_milli_opt(23, 59, 59, 999).unwrap()
        );
        assert_eq!((period.year, period.month), (2025, 1));
    }

    /// PR-003: date after the closing day rolls into next year's label
    #[test]
    fn test_label_rolls_december_into_january() {
        assert_eq!(
            period_label_for(date(2024, 12, 25), closing(20)),
            PeriodLabel::new(2025, 1).unwrap()
        );
        assert_eq!(
            period_label_for(date(2024, 12, 20), closing(20)),
            PeriodLabel::new(2024, 12).unwrap()
        );
    }

    /// PR-004: February lengths under end-of-month closing
    #[test]
    fn test_february_end_of_month() {
        assert_eq!(period_for(2024, 2, ClosingDay::END_OF_MONTH).unwrap().day_count(), 29);
        assert_eq!(period_for(2023, 2, ClosingDay::END_OF_MONTH).unwrap().day_count(), 28);
        assert_eq!(period_for(2100, 2, ClosingDay::END_OF_MONTH).unwrap().day_count(), 28);
        assert_eq!(period_for(2000, 2, ClosingDay::END_OF_MONTH).unwrap().day_count(), 29);
    }

    /// PR-005: closing day 30 in a 29-day February closes on the 29th
    #[test]
    fn test_closing_30_short_february() {
        let february = period_for(2024, 2, closing(30)).unwrap();
        assert_eq!(february.first_day(), date(2024, 1, 31));
        assert_eq!(february.last_day(), date(2024, 2, 29));

        let march = period_for(2024, 3, closing(30)).unwrap();
        assert_eq!(march.first_day(), date(2024, 3, 1));
        assert_eq!(march.last_day(), date(2024, 3, 30));

        assert_eq!(period_label_for(date(2024, 2, 29), closing(30)), february.label());
        assert_eq!(period_label_for(date(2024, 3, 1), closing(30)), march.label());
    }

    #[test]
    fn test_closing_29_non_leap_february() {
        let february = period_for(2023, 2, closing(29)).unwrap();
        assert_eq!(february.first_day(), date(2023, 1, 30));
        assert_eq!(february.last_day(), date(2023, 2, 28));

        let march = period_for(2023, 3, closing(29)).unwrap();
        assert_eq!(march.first_day(), date(2023, 3, 1));
    }

    #[test]
    fn test_closing_30_after_31_day_month() {
        // January has 31 days, so the 31st belongs to February's period.
        let february = period_for(2025, 2, closing(30)).unwrap();
        assert_eq!(february.first_day(), date(2025, 1, 31));
        assert_eq!(
            period_label_for(date(2025, 1, 31), closing(30)),
            PeriodLabel::new(2025, 2).unwrap()
        );
    }

    #[test]
    fn test_closing_1() {
        let period = period_for(2024, 3, closing(1)).unwrap();
        assert_eq!(period.first_day(), date(2024, 2, 2));
        assert_eq!(period.last_day(), date(2024, 3, 1));
        assert_eq!(
            period_label_for(date(2024, 3, 2), closing(1)),
            PeriodLabel::new(2024, 4).unwrap()
        );
    }

    #[test]
    fn test_end_of_month_label_is_own_month() {
        assert_eq!(
            period_label_for(date(2024, 12, 31), ClosingDay::END_OF_MONTH),
            PeriodLabel::new(2024, 12).unwrap()
        );
        assert_eq!(
            period_label_for(date(2024, 1, 1), ClosingDay::END_OF_MONTH),
            PeriodLabel::new(2024, 1).unwrap()
        );
    }

    #[test]
    fn test_consecutive_periods_are_contiguous() {
        for day in [1, 15, 20, 28, 29, 30, 31] {
            let closing = closing(day);
            let mut label = PeriodLabel::new(2023, 11).unwrap();
            for _ in 0..16 {
                let current = period_for(label.year, label.month, closing).unwrap();
                let next_label = label.next().unwrap();
                let next = period_for(next_label.year, next_label.month, closing).unwrap();
                assert_eq!(
                    current.last_day().succ_opt().unwrap(),
                    next.first_day(),
                    "gap after {} with closing {}",
                    label,
                    day
                );
                label = next_label;
            }
        }
    }

    #[test]
    fn test_invalid_month_is_error() {
        assert!(matches!(
            period_for(2024, 0, ClosingDay::END_OF_MONTH),
            Err(EngineError::InvalidInput { .. })
        ));
        assert!(matches!(
            period_for(2024, 13, closing(20)),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_years_outside_calendar_are_errors() {
        for (year, month) in [(i32::MIN, 1), (i32::MAX, 12), (NaiveDate::MAX.year() + 1, 6)] {
            assert!(
                matches!(period_for(year, month, closing(20)), Err(EngineError::InvalidInput { .. })),
                "{}-{}",
                year,
                month
            );
            assert!(matches!(
                period_for(year, month, ClosingDay::END_OF_MONTH),
                Err(EngineError::InvalidInput { .. })
            ));
            assert!(matches!(
                last_day_of_month(year, month),
                Err(EngineError::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn test_current_period_contains_now() {
        let now = date(2024, 2, 29).and_hms_opt(23, 0, 0).unwrap();
        let period = current_period(closing(25), now).unwrap();
        assert_eq!((period.year, period.month), (2024, 3));
        assert_eq!(period.first_day(), date(2024, 2, 26));
        assert!(period.contains(now));
    }

    #[test]
    fn test_last_day_of_month_table() {
        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (index, days) in expected.iter().enumerate() {
            assert_eq!(last_day_of_month(2023, index as u32 + 1).unwrap(), *days);
        }
    }
}
