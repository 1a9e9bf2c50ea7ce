use serde::{Deserialize, Serialize};

use leadtime_model::{HomeDelivery, ShipmentRecord};

/// Exact-match row selection on the operator's dimensions.
///
/// Every criterion left as `None` matches all rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentFilter {
    pub client: Option<String>,
    pub sub_account: Option<String>,
    pub agency: Option<String>,
    pub home_delivery: Option<HomeDelivery>,
}

impl ShipmentFilter {
    pub fn is_empty(&self) -> bool {
        self.client.is_none()
            && self.sub_account.is_none()
            && self.agency.is_none()
            && self.home_delivery.is_none()
    }

    pub fn matches(&self, record: &ShipmentRecord) -> bool {
        fn same(expected: Option<&String>, actual: &str) -> bool {
            expected.is_none_or(|value| value.trim() == actual.trim())
        }
        same(self.client.as_ref(), &record.client)
            && same(self.sub_account.as_ref(), &record.sub_account)
            && same(self.agency.as_ref(), &record.destination_agency)
            && self
                .home_delivery
                .is_none_or(|flag| flag == record.home_delivery)
    }

    /// One boolean per record, in order.
    pub fn mask(&self, records: &[ShipmentRecord]) -> Vec<bool> {
        records.iter().map(|record| self.matches(record)).collect()
    }
}

/// Parse the home-delivery filter value: `si`, `no` or `sin dato`.
pub fn parse_home_delivery_filter(value: &str) -> Result<HomeDelivery, String> {
    match value.trim().to_lowercase().as_str() {
        "si" | "sí" | "yes" => Ok(HomeDelivery::Yes),
        "no" => Ok(HomeDelivery::No),
        "sin dato" | "sin-dato" | "unspecified" => Ok(HomeDelivery::Unspecified),
        other => Err(format!(
            "invalid home-delivery filter {other:?} (expected si, no or sin dato)"
        )),
    }
}
