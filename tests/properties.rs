//! Property tests for the payroll calculators.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use proptest::test_runner::Config;
use rust_decimal::Decimal;

use payroll_engine::calculation::{
    amortize, apply_balance_updates, compute_summary, count_working_days,
};
use payroll_engine::config::Settings;
use payroll_engine::models::{
    AdvanceEntry, AttendanceCategory, AttendanceEntry, Employee, PayrollPeriod,
};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2018, 1, 1).unwrap()
}

fn category(index: usize) -> AttendanceCategory {
    AttendanceCategory::ALL[index % AttendanceCategory::ALL.len()]
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn working_days_monotonic_in_as_of(
        year in 2019_i32..2030,
        month in 1_u32..=12,
        start_offset in 0_i64..4_000,
        today_offset in 0_i64..4_000,
        step in 0_i64..40,
        include_weekends in any::<bool>()
    ) {
        let period = PayrollPeriod::new(year, month).unwrap();
        let start = base_date() + Duration::days(start_offset);
        let today = base_date() + Duration::days(today_offset);
        let later = today + Duration::days(step);

        let earlier_count = count_working_days(Some(start), &period, include_weekends, today);
        let later_count = count_working_days(Some(start), &period, include_weekends, later);
        prop_assert!(earlier_count <= later_count);
        prop_assert!(later_count <= 31);
    }

    #[test]
    fn summary_laws_hold(
        month in 1_u32..=12,
        daily_hours in 1_i64..16,
        rate in 0_i64..500,
        absences in proptest::collection::vec((0_usize..5, 1_u32..28, 0_i64..24), 0..40),
        include_weekends in any::<bool>()
    ) {
        let period = PayrollPeriod::new(2025, month).unwrap();
        let settings =
            Settings::new(Decimal::from(daily_hours), Decimal::new(15, 1), include_weekends).unwrap();
        let employee = Employee::new("emp", "Prop", Decimal::from(rate), Some(base_date()));
        let attendance: Vec<AttendanceEntry> = absences
            .iter()
            .enumerate()
            .map(|(i, (cat, day, hours))| {
                AttendanceEntry::new(
                    format!("a{}", i),
                    "emp",
                    NaiveDate::from_ymd_opt(2025, month, *day).unwrap(),
                    category(*cat),
                    Some(Decimal::from(*hours)),
                    "",
                )
            })
            .collect();
        let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();

        let first = compute_summary(&employee, &period, &settings, &attendance, &[], &[], today).unwrap();
        let second = compute_summary(&employee, &period, &settings, &attendance, &[], &[], today).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            first.theoretical_hours,
            Decimal::from(first.working_days) * settings.daily_standard_hours
        );
        prop_assert!(first.net_hours >= Decimal::ZERO);
        prop_assert!(first.net_hours <= first.theoretical_hours);
        prop_assert_eq!(first.base_pay, first.net_hours * employee.hourly_rate);
    }

    #[test]
    fn amortization_never_increases_or_goes_negative(
        amount in 1_i64..100_000,
        cents in 0_i64..100,
        installments in 1_i32..24,
        rounds in 1_usize..30
    ) {
        let principal = Decimal::from(amount) + Decimal::new(cents, 2);
        let mut advances = vec![
            AdvanceEntry::grant("adv", "emp", base_date(), principal, installments, "").unwrap(),
        ];
        let mut previous = principal;

        for round in 0..rounds {
            let result = amortize(&advances, 1);
            apply_balance_updates(&mut advances, &result.updates);
            let remaining = advances[0].remaining;

            prop_assert!(remaining >= Decimal::ZERO);
            prop_assert!(remaining <= previous);
            prop_assert_eq!(result.total_cut, previous - remaining);
            if round + 1 >= installments as usize {
                prop_assert_eq!(remaining, Decimal::ZERO);
            }
            previous = remaining;
        }
    }
}
