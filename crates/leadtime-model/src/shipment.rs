//! Shipment rows as received from the operator's daily report.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Home-delivery ("ED") flag of a shipment.
///
/// The column is optional in the source report. An absent column or an empty
/// cell is [`HomeDelivery::Unspecified`], which behaves as "yes": the package
/// is expected to reach the recipient's door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HomeDelivery {
    Yes,
    No,
    #[default]
    Unspecified,
}

impl HomeDelivery {
    /// Parse a raw ED cell. Only an explicit "NO" turns home delivery off.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return HomeDelivery::Unspecified;
        }
        if trimmed.eq_ignore_ascii_case("NO") {
            HomeDelivery::No
        } else {
            HomeDelivery::Yes
        }
    }

    /// True only when the source explicitly said "no".
    pub fn is_explicit_no(self) -> bool {
        self == HomeDelivery::No
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HomeDelivery::Yes => "SI",
            HomeDelivery::No => "NO",
            HomeDelivery::Unspecified => "",
        }
    }
}

impl fmt::Display for HomeDelivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the shipment report.
///
/// Records are never mutated after ingestion; every derived attribute lives in
/// a separate [`crate::Enrichment`] keyed by the same row position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShipmentRecord {
    /// Zero-based position in the source table.
    pub row: usize,
    /// Tracking number ("Guia").
    pub guide: Option<String>,
    pub client: String,
    pub sub_account: String,
    pub destination_agency: String,
    /// Free-text destination locality; `None` when the cell is blank.
    pub locality: Option<String>,
    pub product: String,
    /// Free-text status as written by the carrier.
    pub status: String,
    pub recipient: Option<String>,
    pub home_delivery: HomeDelivery,
    /// Creation timestamp ("Fecha"); `None` when missing or unparseable.
    pub created_at: Option<NaiveDateTime>,
    /// Timestamp of the last status change ("Fecha último estado").
    pub last_status_at: Option<NaiveDateTime>,
}

impl ShipmentRecord {
    pub fn new(row: usize) -> Self {
        Self {
            row,
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_locality(mut self, locality: impl Into<String>) -> Self {
        self.locality = Some(locality.into());
        self
    }

    pub fn with_home_delivery(mut self, home_delivery: HomeDelivery) -> Self {
        self.home_delivery = home_delivery;
        self
    }

    pub fn with_created_at(mut self, created_at: Option<NaiveDateTime>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_last_status_at(mut self, last_status_at: Option<NaiveDateTime>) -> Self {
        self.last_status_at = last_status_at;
        self
    }

    /// Label used in logs and alert listings.
    pub fn display_id(&self) -> String {
        match self.guide.as_deref() {
            Some(guide) if !guide.trim().is_empty() => guide.trim().to_string(),
            _ => format!("row {}", self.row + 1),
        }
    }
}
