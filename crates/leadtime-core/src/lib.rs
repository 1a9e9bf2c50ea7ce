//! Lead-time compliance engine.
//!
//! Pure functions over shipment records: business-day counting, zone
//! classification, compliance categories and alerts, plus the table-level
//! pipeline that attaches the derived columns.

pub mod alerts;
pub mod calendar;
pub mod compliance;
pub mod enrich;
pub mod filter;
pub mod frame;
pub mod lead_time;
pub mod pipeline;
pub mod status;
pub mod summary;
pub mod zone;

pub use alerts::{critical_overdue, evaluate_alerts, redispatch_delayed, suggests_return};
pub use calendar::{business_days_between, business_days_in_range, is_business_day};
pub use compliance::{classify_compliance, is_delivered, remaining_days};
pub use enrich::{EvaluationContext, REDACTED_VALUE, enrich_record, enrich_records};
pub use filter::{ShipmentFilter, parse_home_delivery_filter};
pub use frame::{
    COMPLIANCE_COLUMN, DERIVED_COLUMNS, LEAD_TIME_COLUMN, PROMISED_DAYS_COLUMN,
    REMAINING_DAYS_COLUMN, ShipmentFrame, ShipmentFrameMeta, ZONE_COLUMN, attach_derived_columns,
};
pub use lead_time::{lead_time, promised_days};
pub use pipeline::{EnrichedBatch, enrich_table, uncovered_years};
pub use status::classify_status;
pub use summary::{
    AlertCount, CategoryCount, ComplianceSummary, LocalityCount, ProductBreakdown,
    TOP_LATE_LOCALITIES,
};
pub use zone::{classify_zone, matching_amba_entry};
