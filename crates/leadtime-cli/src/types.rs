use std::path::PathBuf;

use chrono::NaiveDateTime;

use leadtime_core::{ComplianceSummary, ShipmentFilter};
use leadtime_ingest::IngestStats;
use leadtime_report::ReportFormat;

/// Everything one `report` run needs.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub standards_dir: Option<PathBuf>,
    pub formats: Vec<ReportFormat>,
    pub filter: ShipmentFilter,
    /// Evaluation instant; `None` uses the wall clock.
    pub as_of: Option<NaiveDateTime>,
    pub dry_run: bool,
    pub log_data: bool,
}

impl ReportRequest {
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            standards_dir: None,
            formats: ReportFormat::ALL.to_vec(),
            filter: ShipmentFilter::default(),
            as_of: None,
            dry_run: false,
            log_data: false,
        }
    }
}

#[derive(Debug)]
pub struct ReportOutcome {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub evaluated_at: NaiveDateTime,
    pub stats: IngestStats,
    /// Rows left after filtering.
    pub evaluated_rows: usize,
    pub summary: ComplianceSummary,
    pub uncovered_years: Vec<i32>,
    pub outputs: Vec<PathBuf>,
    pub dry_run: bool,
}

impl ReportOutcome {
    pub fn has_alerts(&self) -> bool {
        self.summary.rows_with_alerts > 0
    }
}
