//! Lenient timestamp parsing for report cells.
//!
//! Carriers export dates in whatever shape their spreadsheet produced: ISO,
//! day-first with slashes or dashes, or a bare Excel serial number. Anything
//! that does not match is treated as missing.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Day zero of the Excel 1900 date system (accounts for the 1900 leap bug).
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);
/// Serials below this (before 1927) are more likely plain numbers than dates.
const EXCEL_MIN_SERIAL: f64 = 10_000.0;
/// 9999-12-31.
const EXCEL_MAX_SERIAL: f64 = 2_958_465.0;

const DATETIME_FORMATS: [&str; 12] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Outcome of parsing one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampCell {
    Blank,
    Parsed(NaiveDateTime),
    Malformed,
}

impl TimestampCell {
    pub fn value(self) -> Option<NaiveDateTime> {
        match self {
            TimestampCell::Parsed(dt) => Some(dt),
            TimestampCell::Blank | TimestampCell::Malformed => None,
        }
    }
}

/// Parse a timestamp cell, keeping track of why it failed.
pub fn classify_timestamp(value: &str) -> TimestampCell {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return TimestampCell::Blank;
    }
    parse_timestamp(trimmed).map_or(TimestampCell::Malformed, TimestampCell::Parsed)
}

/// Parse a timestamp in any accepted shape. Date-only values land at midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    try_parse_datetime(trimmed)
        .or_else(|| try_parse_date(trimmed).map(|d| d.and_time(NaiveTime::MIN)))
        .or_else(|| try_parse_excel_serial(trimmed))
}

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    for fmt in &DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.naive_local())
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

fn try_parse_excel_serial(value: &str) -> Option<NaiveDateTime> {
    if !value.chars().all(|ch| ch.is_ascii_digit() || ch == '.') {
        return None;
    }
    from_excel_serial(value.parse().ok()?)
}

/// Convert an Excel 1900-system serial (days, fraction = time of day).
pub fn from_excel_serial(serial: f64) -> Option<NaiveDateTime> {
    if !(EXCEL_MIN_SERIAL..=EXCEL_MAX_SERIAL).contains(&serial) {
        return None;
    }
    let (y, m, d) = EXCEL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d)?.and_time(NaiveTime::MIN);
    let days = serial.trunc() as i64;
    let seconds = (serial.fract() * 86_400.0).round() as i64;
    epoch.checked_add_signed(Duration::days(days) + Duration::seconds(seconds))
}
