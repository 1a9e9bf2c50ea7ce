//! Machine-readable record of one evaluation run.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use leadtime_core::{ComplianceSummary, ShipmentFilter};
use leadtime_ingest::IngestStats;
use leadtime_model::{AlertThresholds, PromisePolicy};

/// Input file identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub path: PathBuf,
    pub sha256: String,
    pub rows: usize,
    pub missing_timestamps: usize,
    pub malformed_timestamps: usize,
    pub missing_localities: usize,
}

impl SourceInfo {
    pub fn new(path: &Path, sha256: String, stats: &IngestStats) -> Self {
        Self {
            path: path.to_path_buf(),
            sha256,
            rows: stats.rows,
            missing_timestamps: stats.missing_timestamps,
            malformed_timestamps: stats.malformed_timestamps,
            missing_localities: stats.missing_localities,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub source: SourceInfo,
    /// Instant alerts were evaluated at, `YYYY-MM-DD HH:MM:SS`.
    pub evaluated_at: String,
    pub filter: ShipmentFilter,
    pub promise: PromisePolicy,
    pub alerts: AlertThresholds,
    /// Rows after filtering.
    pub evaluated_rows: usize,
    /// Years without configured holidays.
    pub uncovered_years: Vec<i32>,
    pub summary: ComplianceSummary,
    /// Artifacts written alongside this report.
    pub outputs: Vec<PathBuf>,
}

impl RunReport {
    pub fn evaluated_at_text(instant: NaiveDateTime) -> String {
        instant.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

pub fn write_run_report(path: &Path, report: &RunReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize run report")?;
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
