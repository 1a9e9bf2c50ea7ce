//! Enriched shipment table.
//!
//! The source columns are kept as read; derived columns are appended after
//! them. Re-attaching replaces existing derived columns in place, so enriching
//! an already enriched export produces the same layout.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use polars::prelude::{DataFrame, NamedFrom, PolarsResult, Series};

use leadtime_model::{AlertKind, Enrichment};

pub const ZONE_COLUMN: &str = "ZONA";
pub const LEAD_TIME_COLUMN: &str = "Lead Time";
pub const PROMISED_DAYS_COLUMN: &str = "Días Prometidos";
pub const COMPLIANCE_COLUMN: &str = "Cumplimiento";
pub const REMAINING_DAYS_COLUMN: &str = "Días Restantes";

/// Derived columns in output order.
pub const DERIVED_COLUMNS: [&str; 8] = [
    ZONE_COLUMN,
    LEAD_TIME_COLUMN,
    PROMISED_DAYS_COLUMN,
    COMPLIANCE_COLUMN,
    REMAINING_DAYS_COLUMN,
    "Alerta Devolución",
    "Alerta Redespacho",
    "Alerta Pendiente Fuera Tiempo",
];

/// Where the table came from and when it was evaluated.
#[derive(Debug, Clone, Default)]
pub struct ShipmentFrameMeta {
    pub source_file: Option<PathBuf>,
    pub evaluated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct ShipmentFrame {
    pub data: DataFrame,
    pub meta: Option<ShipmentFrameMeta>,
}

impl ShipmentFrame {
    pub fn new(data: DataFrame) -> Self {
        Self { data, meta: None }
    }

    #[must_use]
    pub fn with_meta(mut self, meta: ShipmentFrameMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Columns that were present in the source file.
    pub fn source_columns(&self) -> Vec<String> {
        self.data
            .get_column_names_owned()
            .into_iter()
            .map(|name| name.to_string())
            .filter(|name| !DERIVED_COLUMNS.contains(&name.as_str()))
            .collect()
    }
}

/// Write the derived columns for `enrichments` (one per row, same order).
pub fn attach_derived_columns(df: &mut DataFrame, enrichments: &[Enrichment]) -> PolarsResult<()> {
    let zone: Vec<&str> = enrichments.iter().map(|e| e.zone.as_str()).collect();
    let lead: Vec<Option<u32>> = enrichments.iter().map(|e| e.lead_time).collect();
    let promised: Vec<u32> = enrichments.iter().map(|e| e.promised_days).collect();
    let category: Vec<&str> = enrichments.iter().map(|e| e.category.as_str()).collect();
    let remaining: Vec<String> = enrichments.iter().map(|e| e.remaining.to_string()).collect();

    df.with_column(Series::new(ZONE_COLUMN.into(), zone))?;
    df.with_column(Series::new(LEAD_TIME_COLUMN.into(), lead))?;
    df.with_column(Series::new(PROMISED_DAYS_COLUMN.into(), promised))?;
    df.with_column(Series::new(COMPLIANCE_COLUMN.into(), category))?;
    df.with_column(Series::new(REMAINING_DAYS_COLUMN.into(), remaining))?;
    for kind in AlertKind::ALL {
        let tags: Vec<&str> = enrichments.iter().map(|e| e.alerts.tag(kind)).collect();
        df.with_column(Series::new(kind.column().into(), tags))?;
    }
    Ok(())
}
