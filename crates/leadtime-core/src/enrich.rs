use chrono::{Local, NaiveDateTime};
use tracing::trace;

use leadtime_model::{Enrichment, LeadTimePolicy, ShipmentRecord};

use crate::alerts::evaluate_alerts;
use crate::compliance::{classify_compliance, is_delivered, remaining_days};
use crate::lead_time::{lead_time, promised_days};
use crate::status::classify_status;
use crate::zone::classify_zone;

/// Placeholder logged in place of shipment values unless `log_data` is set.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Per-run inputs that are not part of the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationContext {
    /// Instant the time-based alerts are measured against.
    pub now: NaiveDateTime,
    /// Include locality values in row-level trace events.
    pub log_data: bool,
}

impl EvaluationContext {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now,
            log_data: false,
        }
    }

    /// Evaluate against the local wall clock.
    pub fn wall_clock() -> Self {
        Self::new(Local::now().naive_local())
    }

    #[must_use]
    pub fn with_log_data(mut self, log_data: bool) -> Self {
        self.log_data = log_data;
        self
    }

    /// The value itself when `log_data` is set, otherwise [`REDACTED_VALUE`].
    pub fn redact<'a>(&self, value: &'a str) -> &'a str {
        if self.log_data { value } else { REDACTED_VALUE }
    }
}

/// Derive every attribute for one record.
pub fn enrich_record(
    record: &ShipmentRecord,
    policy: &LeadTimePolicy,
    ctx: &EvaluationContext,
) -> Enrichment {
    let zone = classify_zone(record.locality.as_deref(), &policy.zones);
    let promised = promised_days(zone, &policy.promise);
    let lead = lead_time(record, &policy.calendar);
    let status = classify_status(&record.status, &policy.statuses);
    let delivered = is_delivered(record.home_delivery, status);
    let category = classify_compliance(delivered, lead, promised);
    let remaining = remaining_days(category, lead, promised);
    let alerts = evaluate_alerts(
        record,
        status,
        category,
        ctx.now,
        &policy.calendar,
        &policy.alerts,
    );
    let locality = ctx.redact(record.locality.as_deref().unwrap_or_default());
    trace!(
        row = record.row + 1,
        guide = %record.display_id(),
        locality,
        zone = %zone,
        lead_time = ?lead,
        category = %category,
        alerts = alerts.count(),
        "record enriched"
    );
    Enrichment {
        zone,
        promised_days: promised,
        lead_time: lead,
        status,
        category,
        remaining,
        alerts,
    }
}

pub fn enrich_records(
    records: &[ShipmentRecord],
    policy: &LeadTimePolicy,
    ctx: &EvaluationContext,
) -> Vec<Enrichment> {
    records
        .iter()
        .map(|record| enrich_record(record, policy, ctx))
        .collect()
}
