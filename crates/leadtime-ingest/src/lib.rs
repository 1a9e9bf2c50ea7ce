//! Shipment report ingestion.
//!
//! Reads the operator's export (CSV, or an Excel workbook by extension),
//! resolves its columns, and yields both the
//! raw table (as a polars [`DataFrame`] of string columns, so every original
//! field survives untouched into the outputs) and one typed
//! [`ShipmentRecord`] per row.

pub mod columns;
pub mod csv_table;
pub mod datetime;
pub mod error;
pub mod excel_table;
pub mod polars_utils;
pub mod records;

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use tracing::{debug, info};

use leadtime_model::ShipmentRecord;

pub use columns::ShipmentColumns;
pub use csv_table::{CsvTable, parse_csv_bytes, read_csv_table, sniff_delimiter};
pub use datetime::{TimestampCell, classify_timestamp, from_excel_serial, parse_timestamp};
pub use error::{IngestError, Result};
pub use excel_table::{PREFERRED_SHEET, is_excel_path, read_excel_table};
pub use polars_utils::{any_to_f64, any_to_string, column_strings, format_numeric};
pub use records::{IngestStats, extract_records};

/// A loaded shipment report.
#[derive(Debug, Clone)]
pub struct ShipmentTable {
    pub path: PathBuf,
    pub frame: DataFrame,
    pub columns: ShipmentColumns,
    pub records: Vec<ShipmentRecord>,
    pub stats: IngestStats,
}

impl ShipmentTable {
    /// Build from an already parsed CSV table.
    pub fn from_csv_table(table: &CsvTable, path: &Path) -> Result<Self> {
        let columns = ShipmentColumns::resolve(&table.headers, path)?;
        debug!(?columns, "resolved shipment columns");
        let frame = table.to_frame()?;
        let (records, stats) = extract_records(table, &columns, path);
        Ok(Self {
            path: path.to_path_buf(),
            frame,
            columns,
            records,
            stats,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read and resolve a shipment report from disk.
///
/// `.xlsx`/`.xls` (and the other workbook extensions) go through the Excel
/// reader; anything else is parsed as CSV.
pub fn read_shipment_table(path: &Path) -> Result<ShipmentTable> {
    let excel = is_excel_path(path);
    let table = if excel {
        read_excel_table(path)?
    } else {
        read_csv_table(path)?
    };
    let shipments = ShipmentTable::from_csv_table(&table, path)?;
    info!(
        path = %path.display(),
        rows = shipments.stats.rows,
        source = if excel { "workbook" } else { "csv" },
        missing_timestamps = shipments.stats.missing_timestamps,
        malformed_timestamps = shipments.stats.malformed_timestamps,
        "shipment report loaded"
    );
    Ok(shipments)
}
