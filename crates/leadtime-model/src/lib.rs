//! Data model for lead-time compliance reporting.

pub mod alert;
pub mod compliance;
pub mod enrichment;
pub mod lookup;
pub mod policy;
pub mod shipment;
pub mod status;
pub mod zone;

pub use alert::{AlertKind, Alerts};
pub use compliance::{ComplianceCategory, RemainingDays};
pub use enrichment::Enrichment;
pub use lookup::{HeaderLookup, fold_key};
pub use policy::{
    AlertThresholds, HolidayCalendar, LeadTimePolicy, PromisePolicy, StatusVocabulary, ZoneTable,
};
pub use shipment::{HomeDelivery, ShipmentRecord};
pub use status::StatusMarkers;
pub use zone::Zone;
