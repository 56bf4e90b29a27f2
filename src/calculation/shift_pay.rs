//! Shift pay calculation.
//!
//! This module turns a [`Shift`] and the [`WageRate`] in force on its date
//! into a [`CalculatedShift`]: payable minutes split into normal and
//! night-differential time, and the resulting salary.
//!
//! The night window is fixed at 22:00-05:00 local time. It does not follow
//! the `night_shift_start` display setting.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::{CalculatedShift, MINUTES_PER_DAY, Shift, WageRate};

/// Start of the night window, in minutes since midnight (22:00).
pub const NIGHT_WINDOW_START: u32 = 22 * 60;

/// End of the night window, in minutes since midnight (05:00, exclusive).
pub const NIGHT_WINDOW_END: u32 = 5 * 60;

/// Pay multiplier for minutes inside the night window (125%).
pub const NIGHT_DIFFERENTIAL: Decimal = Decimal::from_parts(125, 0, 0, false, 2);

/// Decimal places kept when reporting apportioned minutes.
pub const MINUTE_SCALE: u32 = 4;

fn overlap(a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> i64 {
    (a_end.min(b_end) - a_start.max(b_start)).max(0)
}

/// Counts night-window minutes in `[start, end)`.
///
/// `start` and `end` are minutes on a timeline beginning at 00:00 of the
/// shift date, so `end` may exceed 1440 for shifts past midnight. Each
/// midnight on that timeline is surrounded by one night window,
/// `[midnight - 120, midnight + 300)`, and the result is the summed overlap.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::night_minutes;
///
/// // 20:00 to 06:00 the next day
/// assert_eq!(night_minutes(1200, 1800), 420);
/// // 09:00 to 18:00
/// assert_eq!(night_minutes(540, 1080), 0);
/// ```
pub fn night_minutes(start: u32, end: u32) -> u32 {
    if end <= start {
        return 0;
    }
    let (start, end) = (i64::from(start), i64::from(end));
    let day = i64::from(MINUTES_PER_DAY);
    let lead_in = day - i64::from(NIGHT_WINDOW_START);
    let tail = i64::from(NIGHT_WINDOW_END);

    let total: i64 = (start / day..=end / day + 1)
        .map(|k| {
            let midnight = k * day;
            overlap(start, end, midnight - lead_in, midnight + tail)
        })
        .sum();

    u32::try_from(total).unwrap_or(0)
}

/// Counts night-window minutes in `[start, end)` one minute at a time.
///
/// A minute `m` is a night minute when `m mod 1440` is at or after 22:00 or
/// before 05:00. Same result as [`night_minutes`]; kept as the reference
/// definition for tests and benchmarks.
pub fn night_minutes_by_scan(start: u32, end: u32) -> u32 {
    let count = (start..end)
        .filter(|m| {
            let minute_of_day = m % MINUTES_PER_DAY;
            minute_of_day >= NIGHT_WINDOW_START || minute_of_day < NIGHT_WINDOW_END
        })
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

fn overflow(what: &str) -> EngineError {
    EngineError::CalculationError {
        message: format!("numeric overflow computing {}", what),
    }
}

/// `floor(normal / 60 * wage + night / 60 * wage * 1.25)` in `f64`.
///
/// Net night and normal minutes are recomputed here unrounded, exactly as
/// the formula consumes them.
fn floored_salary(
    hourly_wage: Decimal,
    gross: u32,
    night_gross: u32,
    break_minutes: u32,
) -> EngineResult<Decimal> {
    let wage = hourly_wage
        .to_f64()
        .filter(|w| w.is_finite())
        .ok_or_else(|| overflow("salary"))?;
    let differential = NIGHT_DIFFERENTIAL.to_f64().ok_or_else(|| overflow("salary"))?;

    let night = f64::from(night_gross);
    let night_ratio = night / f64::from(gross);
    let net_night = (night - f64::from(break_minutes) * night_ratio).max(0.0);
    let net_total = f64::from(gross.saturating_sub(break_minutes));
    let net_normal = net_total - net_night;

    let pay = (net_normal / 60.0) * wage + (net_night / 60.0) * wage * differential;
    Decimal::from_f64(pay.floor().max(0.0)).ok_or_else(|| overflow("salary"))
}

/// Calculates the pay breakdown for one shift.
///
/// Steps:
/// 1. Start and end become minutes since midnight; an end at or before the
///    start moves to the next day, so equal times give a 24-hour shift.
/// 2. Night minutes are the gross minutes inside 22:00-05:00.
/// 3. The break is deducted from the gross total (floored at zero) and
///    apportioned between night and normal time in proportion to the night
///    share of the gross shift:
///    `net_night = max(0, night - break * night / gross)`.
/// 4. `salary = floor(normal / 60 * wage + net_night / 60 * wage * 1.25)`,
///    floored once on the sum.
///
/// Step 4 is evaluated in `f64`, one operation at a time in the order
/// written, and floored. Payroll figures issued so far were produced that
/// way, so a sum that lands a hair below a whole unit in binary floating
/// point floors down (00:00-07:30, 60-minute break, wage 900 pays 6824 where
/// exact arithmetic would give 6825). Reported `night_minutes` are rounded to
/// [`MINUTE_SCALE`] places and `normal_minutes` is the remainder, so the two
/// always sum to `total_minutes`.
///
/// The transportation fee is copied onto the result but is not part of
/// `salary`.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] if the wage cannot be
/// represented as a finite `f64` or the salary does not fit a [`Decimal`].
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
///     hourly_wage: Decimal::new(1000, 0),
///     transportation_fee_per_day: Decimal::ZERO,
///     effective_from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
/// };
/// let shift = Shift {
///     id: None,
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
///     start_time: "20:00".parse().unwrap(),
///     end_time: "06:00".parse().unwrap(),
///     break_minutes: 60,
///     note: None,
/// };
///
/// let result = calculate_shift_pay(&shift, &rate).unwrap();
/// assert_eq!(result.total_minutes, 540);
/// assert_eq!(result.night_minutes, Decimal::new(378, 0));
/// assert_eq!(result.normal_minutes, Decimal::new(162, 0));
/// assert_eq!(result.salary, Decimal::new(10575, 0));
/// ```
pub fn calculate_shift_pay(shift: &Shift, rate: &WageRate) -> EngineResult<CalculatedShift> {
    let (start, end) = shift.minute_span();
    let gross = end - start;
    let night_gross = night_minutes(start, end);
    let net_total = gross.saturating_sub(shift.break_minutes);

    // night_gross - break * night_gross / gross == night_gross * net_total / gross
    // whenever the break fits in the shift, and both are zero otherwise.
    let net_night_exact = if gross == 0 {
        Decimal::ZERO
    } else {
        Decimal::from(u64::from(night_gross) * u64::from(net_total)) / Decimal::from(gross)
    };
    let net_night = net_night_exact
        .round_dp_with_strategy(MINUTE_SCALE, RoundingStrategy::MidpointAwayFromZero)
        .max(Decimal::ZERO);
    let net_normal = Decimal::from(net_total) - net_night;

    let salary = if gross == 0 || net_total == 0 {
        Decimal::ZERO
    } else {
        floored_salary(rate.hourly_wage, gross, night_gross, shift.break_minutes)?
    };

    Ok(CalculatedShift {
        shift: shift.clone(),
        hourly_wage: rate.hourly_wage,
        transportation_fee_per_day: rate.transportation_fee_per_day,
        gross_minutes: gross,
        total_minutes: net_total,
        normal_minutes: net_normal,
        night_minutes: net_night,
        salary,
    })
}
