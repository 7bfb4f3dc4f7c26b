//! Property tests for the pure pay calculators and overlap rules.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use payslip_engine::calculation::{count_working_days, hourly_rate, prorate};
use payslip_engine::config::PayrollPolicy;
use payslip_engine::models::{AttendancePeriod, Overtime};

// ============================================================================
// Strategies
// ============================================================================

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    // 2020-01-01 plus up to ~10 years.
    (0i64..3650).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(offset)
    })
}

fn arb_range() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (arb_date(), 0i64..120).prop_map(|(start, len)| (start, start + Duration::days(len)))
}

fn arb_interval() -> impl Strategy<Value = (NaiveDateTime, NaiveDateTime)> {
    (0i64..2000, 1i64..300).prop_map(|(start_min, len_min)| {
        let base = NaiveDate::from_ymd_opt(2025, 1, 6)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let start = base + Duration::minutes(start_min);
        (start, start + Duration::minutes(len_min))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Prorated salary never exceeds the base and never goes negative when
    /// attendance stays within the working days.
    #[test]
    fn prop_proration_bounded_by_base(
        base in 0i64..1_000_000_000,
        total in 1u32..32,
        seed in 0u32..32,
    ) {
        let count = seed % (total + 1);
        let prorated = prorate(base, count, total);
        prop_assert!(prorated >= 0);
        prop_assert!(prorated <= base);
        if count == total {
            prop_assert_eq!(prorated, base);
        }
    }

    /// Proration is monotonic in attendance.
    #[test]
    fn prop_proration_monotonic(base in 0i64..1_000_000_000, total in 1u32..32, count in 0u32..31) {
        prop_assert!(prorate(base, count, total) <= prorate(base, count + 1, total));
    }

    /// A period with no working days prorates to zero.
    #[test]
    fn prop_zero_working_days_prorates_to_zero(base in 0i64..1_000_000_000, count in 0u32..32) {
        prop_assert_eq!(prorate(base, count, 0), 0);
    }

    /// Working days lie between 5/7 of the span (rounded down, minus a
    /// partial week) and the span itself.
    #[test]
    fn prop_working_days_bounded((start, end) in arb_range()) {
        let span = u32::try_from((end - start).num_days() + 1).unwrap();
        let working = count_working_days(start, end);
        prop_assert!(working <= span);
        prop_assert!(working >= (span / 7) * 5);
    }

    /// Splitting a range in two never changes the total working-day count.
    #[test]
    fn prop_working_days_additive((start, end) in arb_range(), cut in 0i64..120) {
        let mid = start + Duration::days(cut.min((end - start).num_days()));
        let whole = count_working_days(start, end);
        let left = count_working_days(start, mid);
        let right = if mid < end { count_working_days(mid + Duration::days(1), end) } else { 0 };
        prop_assert_eq!(whole, left + right);
    }

    /// Overtime overlap is symmetric.
    #[test]
    fn prop_overtime_overlap_symmetric(a in arb_interval(), b in arb_interval()) {
        let first = Overtime::new(1, a.0, a.1, "");
        let second = Overtime::new(1, b.0, b.1, "");
        prop_assert_eq!(first.overlaps(b.0, b.1), second.overlaps(a.0, a.1));
    }

    /// Back-to-back overtime never overlaps.
    #[test]
    fn prop_touching_overtime_does_not_overlap(a in arb_interval(), len in 1i64..180) {
        let existing = Overtime::new(1, a.0, a.1, "");
        prop_assert!(!existing.overlaps(a.1, a.1 + Duration::minutes(len)));
        prop_assert!(!existing.overlaps(a.0 - Duration::minutes(len), a.0));
    }

    /// Period overlap is symmetric and inclusive of shared endpoints.
    #[test]
    fn prop_period_overlap_symmetric(a in arb_range(), b in arb_range()) {
        let first = AttendancePeriod::new(a.0, a.1);
        let second = AttendancePeriod::new(b.0, b.1);
        prop_assert_eq!(first.overlaps(b.0, b.1), second.overlaps(a.0, a.1));
        prop_assert!(first.overlaps(a.1, a.1 + Duration::days(3)));
    }

    /// The hourly rate times the nominal month never exceeds the salary.
    #[test]
    fn prop_hourly_rate_floors(base in 0i64..1_000_000_000) {
        let policy = PayrollPolicy::default();
        let rate = hourly_rate(base, &policy);
        prop_assert!(rate * policy.hourly_rate_divisor() <= base);
        prop_assert!(base - rate * policy.hourly_rate_divisor() < policy.hourly_rate_divisor());
    }
}
