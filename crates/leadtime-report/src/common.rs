//! Shared names and helpers for report generation.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use sha2::Digest;

use leadtime_core::{EnrichedBatch, LEAD_TIME_COLUMN, PROMISED_DAYS_COLUMN};
use leadtime_ingest::any_to_string;
use leadtime_model::AlertKind;

pub const ENRICHED_CSV_FILE: &str = "Reporte_LeadTime_Actualizado.csv";
pub const WORKBOOK_FILE: &str = "Reporte_LeadTime_Actualizado.xlsx";
pub const RUN_REPORT_FILE: &str = "leadtime_report.json";
pub const BRIEFING_FILE: &str = "Reporte_LeadTime.md";

/// Output artifacts a run can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReportFormat {
    Csv,
    Xlsx,
    Json,
    Markdown,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 4] = [
        ReportFormat::Csv,
        ReportFormat::Xlsx,
        ReportFormat::Json,
        ReportFormat::Markdown,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ReportFormat::Csv => ENRICHED_CSV_FILE,
            ReportFormat::Xlsx => WORKBOOK_FILE,
            ReportFormat::Json => RUN_REPORT_FILE,
            ReportFormat::Markdown => BRIEFING_FILE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Xlsx => "xlsx",
            ReportFormat::Json => "json",
            ReportFormat::Markdown => "markdown",
        }
    }

    pub fn output_path(self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.file_name())
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "xlsx" | "excel" => Ok(ReportFormat::Xlsx),
            "json" => Ok(ReportFormat::Json),
            "md" | "markdown" => Ok(ReportFormat::Markdown),
            other => Err(format!("unknown report format: {other}")),
        }
    }
}

/// Columns listed for one alert kind: identification, the alert tag, and for
/// overdue shipments the promise and the elapsed lead time.
pub fn alert_export_columns(batch: &EnrichedBatch, kind: AlertKind) -> Vec<String> {
    let mut columns = identification_columns(batch, false);
    columns.push(kind.column().to_string());
    if kind == AlertKind::CriticalOverdue {
        columns.push(PROMISED_DAYS_COLUMN.to_string());
        columns.push(LEAD_TIME_COLUMN.to_string());
    }
    columns
}

/// Columns of the combined alert listing.
pub fn all_alerts_export_columns(batch: &EnrichedBatch) -> Vec<String> {
    let mut columns = identification_columns(batch, true);
    columns.extend(AlertKind::ALL.iter().map(|kind| kind.column().to_string()));
    columns
}

fn identification_columns(batch: &EnrichedBatch, with_status: bool) -> Vec<String> {
    let source = &batch.columns;
    let mut columns = Vec::new();
    columns.extend(source.guide.clone());
    columns.push(source.client.clone());
    columns.extend(source.recipient.clone());
    columns.push(source.locality.clone());
    if with_status {
        columns.push(source.status.clone());
    }
    columns.push(source.last_status.clone());
    columns
}

/// Cell text at (`row`, `column`); empty when the column is absent.
pub fn cell_text(df: &DataFrame, column: &str, row: usize) -> String {
    df.column(column)
        .ok()
        .and_then(|col| col.get(row).ok())
        .map(any_to_string)
        .unwrap_or_default()
}

pub fn percent(value: f64) -> String {
    format!("{value:.2}%")
}

pub fn sha256_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    Ok(hex::encode(sha2::Sha256::digest(&bytes)))
}

pub fn ensure_output_dir(output_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_format_names() {
        assert_eq!("XLSX".parse::<ReportFormat>(), Ok(ReportFormat::Xlsx));
        assert_eq!("md".parse::<ReportFormat>(), Ok(ReportFormat::Markdown));
        assert!("pptx".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn formats_percentages_with_two_decimals() {
        assert_eq!(percent(50.0), "50.00%");
        assert_eq!(percent(66.666), "66.67%");
    }
}
