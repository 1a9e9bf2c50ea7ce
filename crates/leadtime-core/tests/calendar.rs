use chrono::{Days, NaiveDate, NaiveDateTime};
use leadtime_core::{business_days_between, business_days_in_range, is_business_day};
use leadtime_model::HolidayCalendar;
use proptest::prelude::*;

const HOLIDAYS_2025: [(u32, u32); 12] = [
    (1, 1),
    (3, 3),
    (3, 24),
    (4, 2),
    (4, 17),
    (4, 18),
    (5, 1),
    (5, 25),
    (6, 20),
    (7, 9),
    (12, 8),
    (12, 25),
];

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn midnight(y: i32, m: u32, d: u32) -> Option<NaiveDateTime> {
    date(y, m, d).and_hms_opt(0, 0, 0)
}

fn calendar_2025() -> HolidayCalendar {
    HolidayCalendar::from_dates(HOLIDAYS_2025.iter().map(|(m, d)| date(2025, *m, *d)))
}

#[test]
fn new_year_is_not_a_business_day() {
    let calendar = calendar_2025();
    assert!(!is_business_day(date(2025, 1, 1), &calendar));
    assert!(is_business_day(date(2025, 1, 2), &calendar));
}

#[test]
fn holidays_only_apply_to_their_year() {
    let calendar = calendar_2025();
    // 2026-12-08 is a Tuesday with no 2026 calendar loaded.
    assert!(is_business_day(date(2026, 12, 8), &calendar));
}

#[test]
fn counts_around_known_holidays() {
    let calendar = calendar_2025();
    let cases = [
        ((2025, 6, 2), (2025, 6, 19), 14),
        ((2025, 6, 2), (2025, 6, 23), 15),
        ((2025, 1, 1), (2025, 1, 1), 0),
        ((2025, 1, 2), (2025, 1, 2), 1),
        ((2025, 6, 2), (2025, 6, 3), 2),
        ((2025, 3, 3), (2025, 3, 7), 4),
        ((2025, 4, 14), (2025, 4, 22), 5),
    ];
    for ((sy, sm, sd), (ey, em, ed), expected) in cases {
        assert_eq!(
            business_days_between(midnight(sy, sm, sd), midnight(ey, em, ed), &calendar),
            Some(expected),
            "{sy}-{sm}-{sd} .. {ey}-{em}-{ed}"
        );
    }
}

#[test]
fn missing_endpoint_is_none() {
    let calendar = calendar_2025();
    assert_eq!(business_days_between(None, midnight(2025, 1, 2), &calendar), None);
    assert_eq!(business_days_between(midnight(2025, 1, 2), None, &calendar), None);
    assert_eq!(business_days_between(None, None, &calendar), None);
}

#[test]
fn reversed_range_is_zero() {
    let calendar = calendar_2025();
    assert_eq!(
        business_days_between(midnight(2025, 6, 10), midnight(2025, 6, 2), &calendar),
        Some(0)
    );
}

fn any_2025_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..365).prop_map(|offset| date(2025, 1, 1) + Days::new(offset))
}

proptest! {
    #[test]
    fn single_day_count_matches_business_day(day in any_2025_date()) {
        let calendar = calendar_2025();
        let expected = u32::from(is_business_day(day, &calendar));
        prop_assert_eq!(business_days_in_range(day, day, &calendar), expected);
    }

    #[test]
    fn range_count_is_additive(start in any_2025_date(), len_a in 0u64..40, len_b in 1u64..40) {
        let calendar = calendar_2025();
        let mid = start + Days::new(len_a);
        let end = mid + Days::new(len_b);
        let whole = business_days_in_range(start, end, &calendar);
        let left = business_days_in_range(start, mid, &calendar);
        let right = business_days_in_range(mid + Days::new(1), end, &calendar);
        prop_assert_eq!(whole, left + right);
    }

    #[test]
    fn count_never_exceeds_span(start in any_2025_date(), len in 0u64..120) {
        let calendar = calendar_2025();
        let end = start + Days::new(len);
        let count = business_days_in_range(start, end, &calendar);
        prop_assert!(u64::from(count) <= len + 1);
        // Every full week has five weekdays; the year has twelve holidays.
        prop_assert!(u64::from(count) >= ((len + 1) / 7 * 5).saturating_sub(12));
    }
}
