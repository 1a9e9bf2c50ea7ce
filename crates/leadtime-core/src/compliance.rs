//! Compliance classification against the zone promise.

use std::cmp::Ordering;

use leadtime_model::{ComplianceCategory, HomeDelivery, RemainingDays, StatusMarkers};

/// Whether the shipment counts as delivered.
///
/// A package waiting at the branch counts as delivered when the customer chose
/// branch pickup (home delivery explicitly "no"): arriving at the branch is
/// the service promised.
pub fn is_delivered(home_delivery: HomeDelivery, status: StatusMarkers) -> bool {
    status.delivered || (home_delivery.is_explicit_no() && status.awaiting_pickup)
}

/// One of the six categories, from delivery state, lead time and promise.
///
/// A delivered shipment with no lead time is reported as pending without data.
pub fn classify_compliance(
    delivered: bool,
    lead_time: Option<u32>,
    promised_days: u32,
) -> ComplianceCategory {
    match (delivered, lead_time) {
        (true, Some(lead)) if lead <= promised_days => ComplianceCategory::DeliveredOnTime,
        (true, Some(_)) => ComplianceCategory::DeliveredLate,
        (false, Some(lead)) => match lead.cmp(&promised_days) {
            Ordering::Less => ComplianceCategory::PendingOnTime,
            Ordering::Equal => ComplianceCategory::PendingLastDay,
            Ordering::Greater => ComplianceCategory::PendingLate,
        },
        (_, None) => ComplianceCategory::PendingNoData,
    }
}

/// Countdown shown next to pending shipments that are still within promise.
pub fn remaining_days(
    category: ComplianceCategory,
    lead_time: Option<u32>,
    promised_days: u32,
) -> RemainingDays {
    if !category.shows_remaining_days() {
        return RemainingDays::NotApplicable;
    }
    let Some(lead) = lead_time else {
        return RemainingDays::NotApplicable;
    };
    match promised_days.saturating_sub(lead) {
        0 => RemainingDays::DueToday,
        left => RemainingDays::Remaining(left),
    }
}
