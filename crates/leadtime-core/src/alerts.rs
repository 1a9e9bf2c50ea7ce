//! Operational alerts.
//!
//! The three rules are independent: a record may raise none, some or all of
//! them. Time-based rules measure business days from the last status change
//! to the evaluation instant.

use chrono::NaiveDateTime;

use leadtime_model::{
    AlertKind, AlertThresholds, Alerts, ComplianceCategory, HolidayCalendar, ShipmentRecord,
    StatusMarkers,
};

use crate::calendar::business_days_between;

fn days_since_last_status(
    record: &ShipmentRecord,
    now: NaiveDateTime,
    calendar: &HolidayCalendar,
) -> Option<u32> {
    business_days_between(record.last_status_at, Some(now), calendar)
}

/// Branch pickup that has been waiting too long.
pub fn suggests_return(
    record: &ShipmentRecord,
    status: StatusMarkers,
    now: NaiveDateTime,
    calendar: &HolidayCalendar,
    thresholds: &AlertThresholds,
) -> bool {
    record.home_delivery.is_explicit_no()
        && status.awaiting_pickup
        && days_since_last_status(record, now, calendar)
            .is_some_and(|days| days >= thresholds.pickup_stuck_business_days)
}

pub fn redispatch_delayed(
    record: &ShipmentRecord,
    status: StatusMarkers,
    now: NaiveDateTime,
    calendar: &HolidayCalendar,
    thresholds: &AlertThresholds,
) -> bool {
    status.redispatched
        && days_since_last_status(record, now, calendar)
            .is_some_and(|days| days >= thresholds.redispatch_business_days)
}

pub fn critical_overdue(category: ComplianceCategory) -> bool {
    category == ComplianceCategory::PendingLate
}

pub fn evaluate_alerts(
    record: &ShipmentRecord,
    status: StatusMarkers,
    category: ComplianceCategory,
    now: NaiveDateTime,
    calendar: &HolidayCalendar,
    thresholds: &AlertThresholds,
) -> Alerts {
    let mut alerts = Alerts::default();
    alerts.set(
        AlertKind::SuggestReturn,
        suggests_return(record, status, now, calendar, thresholds),
    );
    alerts.set(
        AlertKind::RedispatchDelayed,
        redispatch_delayed(record, status, now, calendar, thresholds),
    );
    alerts.set(AlertKind::CriticalOverdue, critical_overdue(category));
    alerts
}
