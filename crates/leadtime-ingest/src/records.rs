use std::path::Path;

use leadtime_model::{HomeDelivery, ShipmentRecord};
use tracing::debug;

use crate::columns::ShipmentColumns;
use crate::csv_table::CsvTable;
use crate::datetime::{TimestampCell, classify_timestamp};

/// Row-level anomalies seen while extracting records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub rows: usize,
    pub missing_timestamps: usize,
    pub malformed_timestamps: usize,
    pub missing_localities: usize,
}

fn column_index(table: &CsvTable, name: &str) -> Option<usize> {
    table.headers.iter().position(|header| header == name)
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Turn every data row into a [`ShipmentRecord`], preserving order.
pub fn extract_records(
    table: &CsvTable,
    columns: &ShipmentColumns,
    path: &Path,
) -> (Vec<ShipmentRecord>, IngestStats) {
    let idx = |name: &str| column_index(table, name);
    let guide = columns.guide.as_deref().and_then(idx);
    let client = idx(&columns.client);
    let sub_account = idx(&columns.sub_account);
    let agency = idx(&columns.agency);
    let locality = idx(&columns.locality);
    let product = idx(&columns.product);
    let status = idx(&columns.status);
    let home_delivery = columns.home_delivery.as_deref().and_then(idx);
    let created = idx(&columns.created);
    let last_status = idx(&columns.last_status);
    let recipient = columns.recipient.as_deref().and_then(idx);

    let mut stats = IngestStats {
        rows: table.rows.len(),
        ..IngestStats::default()
    };
    let mut records = Vec::with_capacity(table.rows.len());
    for (row_idx, row) in table.rows.iter().enumerate() {
        let cell = |col: Option<usize>| col.and_then(|i| row.get(i)).map_or("", String::as_str);
        let mut timestamp = |col: Option<usize>, field: &str| match classify_timestamp(cell(col)) {
            TimestampCell::Parsed(value) => Some(value),
            TimestampCell::Blank => {
                stats.missing_timestamps += 1;
                None
            }
            TimestampCell::Malformed => {
                stats.malformed_timestamps += 1;
                debug!(
                    path = %path.display(),
                    row = row_idx + 1,
                    field,
                    "unparseable timestamp treated as missing"
                );
                None
            }
        };
        let created_at = timestamp(created, "created");
        let last_status_at = timestamp(last_status, "last_status");
        let locality_value = non_empty(cell(locality));
        if locality_value.is_none() {
            stats.missing_localities += 1;
        }
        records.push(ShipmentRecord {
            row: row_idx,
            guide: non_empty(cell(guide)),
            client: cell(client).to_string(),
            sub_account: cell(sub_account).to_string(),
            destination_agency: cell(agency).to_string(),
            locality: locality_value,
            product: cell(product).to_string(),
            status: cell(status).to_string(),
            recipient: non_empty(cell(recipient)),
            home_delivery: HomeDelivery::parse(cell(home_delivery)),
            created_at,
            last_status_at,
        });
    }
    (records, stats)
}
