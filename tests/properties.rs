//! Property tests for the payroll engine's pure functions
//!
//! This file verifies:
//! - Wage resolution picks a rate in force whenever one exists
//! - Night overlap and break apportionment laws for shift pay
//! - Payroll periods tile the calendar and invert date-to-label mapping

use chrono::{Datelike, Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use payroll_engine::calculation::{
    calculate_shift_pay, night_minutes, night_minutes_by_scan, period_for, period_label_for,
    resolve_wage,
};
use payroll_engine::models::{ClockTime, ClosingDay, MINUTES_PER_DAY, Shift, WageRate};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

fn rate(id: usize, wage: u32, effective_from: NaiveDate) -> WageRate {
    WageRate {
        id: format!("wage_{:03}", id),
        employee_id: "emp_001".to_string(),
        hourly_wage: Decimal::from(wage),
        transportation_fee_per_day: Decimal::ZERO,
        effective_from,
    }
}

fn shift(start: u32, end: u32, break_minutes: u32) -> Shift {
    Shift {
        id: None,
        employee_id: "emp_001".to_string(),
        date: base_date(),
        start_time: ClockTime::from_hm(start / 60, start % 60).unwrap(),
        end_time: ClockTime::from_hm(end / 60, end % 60).unwrap(),
        break_minutes,
        note: None,
    }
}

fn clock_minute() -> impl Strategy<Value = u32> {
    0..MINUTES_PER_DAY
}

// ============================================================================
// Wage Resolution
// ============================================================================

mod wage_resolution {
    use super::*;

    proptest! {
        #[test]
        fn resolved_rate_is_in_force_when_one_qualifies(
            offsets in prop::collection::vec(0i64..3000, 1..8),
            query in 0i64..3000,
        ) {
            let history: Vec<WageRate> = offsets
                .iter()
                .enumerate()
                .map(|(i, days)| rate(i, 1000 + i as u32, base_date() + Duration::days(*days)))
                .collect();
            let on = base_date() + Duration::days(query);

            let resolved = resolve_wage(&history, on).unwrap();

            if history.iter().any(|r| r.effective_from <= on) {
                prop_assert!(resolved.effective_from <= on);
                let latest = history
                    .iter()
                    .filter(|r| r.effective_from <= on)
                    .map(|r| r.effective_from)
                    .max()
                    .unwrap();
                prop_assert_eq!(resolved.effective_from, latest);
            } else {
                let earliest = history.iter().map(|r| r.effective_from).min().unwrap();
                prop_assert_eq!(resolved.effective_from, earliest);
            }
        }

        #[test]
        fn resolution_ignores_history_order(
            offsets in prop::collection::hash_set(0i64..3000, 1..8),
            query in 0i64..3000,
        ) {
            let mut history: Vec<WageRate> = offsets
                .iter()
                .enumerate()
                .map(|(i, days)| rate(i, 1000 + i as u32, base_date() + Duration::days(*days)))
                .collect();
            let on = base_date() + Duration::days(query);

            let forward = resolve_wage(&history, on).unwrap().id.clone();
            history.reverse();
            let backward = resolve_wage(&history, on).unwrap().id.clone();

            prop_assert_eq!(forward, backward);
        }
    }
}

// ============================================================================
// Shift Pay
// ============================================================================

mod shift_pay {
    use super::*;

    proptest! {
        #[test]
        fn closed_form_night_overlap_matches_scan(
            start in clock_minute(),
            length in 1u32..=MINUTES_PER_DAY,
        ) {
            let end = start + length;
            prop_assert_eq!(night_minutes(start, end), night_minutes_by_scan(start, end));
        }

        #[test]
        fn equal_start_and_end_is_a_full_day(start in clock_minute()) {
            let result = calculate_shift_pay(&shift(start, start, 0), &rate(0, 1000, base_date())).unwrap();
            prop_assert_eq!(result.gross_minutes, MINUTES_PER_DAY);
            prop_assert_eq!(result.night_minutes, Decimal::from(420));
        }

        #[test]
        fn day_only_shifts_have_no_night_minutes(
            start in 300u32..1320,
            length in 1u32..1020,
            break_minutes in 0u32..120,
        ) {
            let end = (start + length).min(1320);
            prop_assume!(end > start);
            let result = calculate_shift_pay(
                &shift(start, end, break_minutes),
                &rate(0, 1000, base_date()),
            )
            .unwrap();

            prop_assert_eq!(result.night_minutes, Decimal::ZERO);
            prop_assert_eq!(result.normal_minutes, Decimal::from(result.total_minutes));
        }

        #[test]
        fn night_only_shifts_are_all_night(
            start_offset in 0u32..420,
            length in 1u32..420,
            break_minutes in 0u32..60,
        ) {
            prop_assume!(start_offset + length <= 420);
            let start = (1320 + start_offset) % MINUTES_PER_DAY;
            let end = (1320 + start_offset + length) % MINUTES_PER_DAY;
            let result = calculate_shift_pay(
                &shift(start, end, break_minutes),
                &rate(0, 1000, base_date()),
            )
            .unwrap();

            prop_assert_eq!(result.normal_minutes, Decimal::ZERO);
            prop_assert_eq!(result.night_minutes, Decimal::from(result.total_minutes));
        }

        #[test]
        fn normal_plus_night_equals_total(
            start in clock_minute(),
            end in clock_minute(),
            break_minutes in 0u32..600,
            wage in 1u32..5000,
        ) {
            let result = calculate_shift_pay(
                &shift(start, end, break_minutes),
                &rate(0, wage, base_date()),
            )
            .unwrap();

            prop_assert_eq!(
                result.normal_minutes + result.night_minutes,
                Decimal::from(result.total_minutes)
            );
            prop_assert!(result.night_minutes >= Decimal::ZERO);
            prop_assert!(result.normal_minutes >= Decimal::ZERO);
            prop_assert!(result.salary >= Decimal::ZERO);
            prop_assert_eq!(result.salary, result.salary.floor());
        }

        #[test]
        fn salary_never_decreases_with_wage(
            start in clock_minute(),
            end in clock_minute(),
            break_minutes in 0u32..120,
            wage in 1u32..5000,
        ) {
            let s = shift(start, end, break_minutes);
            let lower = calculate_shift_pay(&s, &rate(0, wage, base_date())).unwrap();
            let higher = calculate_shift_pay(&s, &rate(0, wage + 1, base_date())).unwrap();

            prop_assert!(higher.salary >= lower.salary);
        }
    }
}

// ============================================================================
// Payroll Periods
// ============================================================================

mod payroll_periods {
    use super::*;

    fn closing_day() -> impl Strategy<Value = ClosingDay> {
        (1u32..=31).prop_map(|day| ClosingDay::new(day).unwrap())
    }

    proptest! {
        #[test]
        fn end_of_month_periods_span_the_calendar_month(year in 1990i32..2100, month in 1u32..=12) {
            let period = period_for(year, month, ClosingDay::END_OF_MONTH).unwrap();

            prop_assert_eq!(period.first_day(), NaiveDate::from_ymd_opt(year, month, 1).unwrap());
            prop_assert_eq!(period.last_day().month(), month);
            prop_assert_eq!(period.last_day().succ_opt().unwrap().day(), 1);
        }

        #[test]
        fn label_is_left_inverse_of_period(
            year in 1990i32..2100,
            month in 1u32..=12,
            closing in closing_day(),
        ) {
            let period = period_for(year, month, closing).unwrap();

            for date in period.first_day().iter_days().take(period.day_count() as usize) {
                let label = period_label_for(date, closing);
                prop_assert_eq!((label.year, label.month), (year, month), "date {}", date);
            }
        }

        #[test]
        fn consecutive_periods_are_contiguous(
            year in 1990i32..2100,
            month in 1u32..=12,
            closing in closing_day(),
        ) {
            let period = period_for(year, month, closing).unwrap();
            let next_label = period.label().next().unwrap();
            let next = period_for(next_label.year, next_label.month, closing).unwrap();

            prop_assert_eq!(period.last_day().succ_opt().unwrap(), next.first_day());
            prop_assert!(period.end < next.start);
        }

        #[test]
        fn every_date_lies_in_its_labelled_period(
            days in 0i64..40_000,
            closing in closing_day(),
        ) {
            let date = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap() + Duration::days(days);
            let label = period_label_for(date, closing);
            let period = period_for(label.year, label.month, closing).unwrap();

            prop_assert!(period.contains_date(date));
        }
    }
}
