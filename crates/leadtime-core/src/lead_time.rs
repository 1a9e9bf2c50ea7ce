use leadtime_model::{HolidayCalendar, PromisePolicy, ShipmentRecord, Zone};

use crate::calendar::business_days_between;

/// Business days promised for `zone`.
pub fn promised_days(zone: Zone, promise: &PromisePolicy) -> u32 {
    promise.days_for(zone)
}

/// Business days from creation to the last status change.
pub fn lead_time(record: &ShipmentRecord, calendar: &HolidayCalendar) -> Option<u32> {
    business_days_between(record.created_at, record.last_status_at, calendar)
}
