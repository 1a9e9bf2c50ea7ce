use serde::{Deserialize, Serialize};

use crate::alert::Alerts;
use crate::compliance::{ComplianceCategory, RemainingDays};
use crate::status::StatusMarkers;
use crate::zone::Zone;

/// Attributes derived for one shipment, in dependency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrichment {
    pub zone: Zone,
    pub promised_days: u32,
    /// Business days from creation to last status change.
    pub lead_time: Option<u32>,
    pub status: StatusMarkers,
    pub category: ComplianceCategory,
    pub remaining: RemainingDays,
    pub alerts: Alerts,
}
