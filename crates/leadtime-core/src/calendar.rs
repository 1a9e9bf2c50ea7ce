//! Business-day arithmetic.
//!
//! A business day is Monday through Friday and not a registered holiday.
//! Counting is inclusive of both endpoints and looks only at calendar dates;
//! the time of day matters only when deciding whether start is after end.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

use leadtime_model::HolidayCalendar;

pub fn is_business_day(date: NaiveDate, calendar: &HolidayCalendar) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !calendar.is_holiday(date)
}

/// Business days in the inclusive date range `[start, end]`; 0 when reversed.
pub fn business_days_in_range(start: NaiveDate, end: NaiveDate, calendar: &HolidayCalendar) -> u32 {
    let mut count = 0u32;
    for date in start.iter_days().take_while(|date| *date <= end) {
        if is_business_day(date, calendar) {
            count += 1;
        }
    }
    count
}

/// Business days elapsed between two timestamps, endpoints included.
///
/// `None` when either side is missing; `Some(0)` when `start` is strictly
/// after `end`.
pub fn business_days_between(
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    calendar: &HolidayCalendar,
) -> Option<u32> {
    let (start, end) = (start?, end?);
    if start > end {
        return Some(0);
    }
    Some(business_days_in_range(start.date(), end.date(), calendar))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> Option<NaiveDateTime> {
        date(y, m, d).and_hms_opt(h, 0, 0)
    }

    #[test]
    fn weekends_are_not_business_days() {
        let calendar = HolidayCalendar::new();
        assert!(is_business_day(date(2025, 6, 6), &calendar));
        assert!(!is_business_day(date(2025, 6, 7), &calendar));
        assert!(!is_business_day(date(2025, 6, 8), &calendar));
    }

    #[test]
    fn same_day_reversed_by_time_is_zero() {
        let calendar = HolidayCalendar::new();
        assert_eq!(
            business_days_between(at(2025, 6, 2, 18), at(2025, 6, 2, 9), &calendar),
            Some(0)
        );
        assert_eq!(
            business_days_between(at(2025, 6, 2, 9), at(2025, 6, 2, 18), &calendar),
            Some(1)
        );
    }

    #[test]
    fn counts_across_a_weekend() {
        let calendar = HolidayCalendar::new();
        // Fri 6th .. Mon 9th
        assert_eq!(business_days_in_range(date(2025, 6, 6), date(2025, 6, 9), &calendar), 2);
        assert_eq!(business_days_in_range(date(2025, 6, 9), date(2025, 6, 6), &calendar), 0);
    }
}
