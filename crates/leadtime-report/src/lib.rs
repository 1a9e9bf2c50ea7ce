//! Report generation for enriched shipment batches.
//!
//! Output artifacts, one per [`ReportFormat`]:
//!
//! - **CSV**: the source table with the derived columns appended
//! - **XLSX**: base sheet, statistics with a compliance pie chart, alert listings
//! - **JSON**: run report with input checksum, policy and aggregate counts
//! - **Markdown**: executive briefing with recommendations

mod briefing;
mod common;
mod csv_export;
mod run_report;
mod workbook;

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use leadtime_core::{ComplianceSummary, EnrichedBatch};

pub use briefing::{render_briefing, write_briefing};
pub use common::{
    BRIEFING_FILE, ENRICHED_CSV_FILE, RUN_REPORT_FILE, ReportFormat, WORKBOOK_FILE,
    alert_export_columns, all_alerts_export_columns, cell_text, ensure_output_dir, percent,
    sha256_file,
};
pub use csv_export::write_frame_csv;
pub use run_report::{RunReport, SourceInfo, write_run_report};
pub use workbook::{
    ALL_ALERTS_SHEET, BASE_SHEET, ON_TIME_RATE_LABEL, STATISTICS_SHEET, alert_sheet_name,
    write_workbook,
};

/// Where and what to write.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub output_dir: PathBuf,
    pub formats: Vec<ReportFormat>,
}

impl ReportOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            formats: ReportFormat::ALL.to_vec(),
        }
    }

    pub fn with_formats(mut self, formats: impl IntoIterator<Item = ReportFormat>) -> Self {
        let mut formats: Vec<ReportFormat> = formats.into_iter().collect();
        formats.sort();
        formats.dedup();
        self.formats = formats;
        self
    }

    fn wants(&self, format: ReportFormat) -> bool {
        self.formats.contains(&format)
    }
}

/// Write every requested artifact and return their paths.
///
/// The run report is written last so it can list the other outputs; its
/// `outputs` field is overwritten.
pub fn write_reports(
    options: &ReportOptions,
    batch: &EnrichedBatch,
    summary: &ComplianceSummary,
    mut run: RunReport,
) -> Result<Vec<PathBuf>> {
    ensure_output_dir(&options.output_dir)?;
    let mut written = Vec::new();

    if options.wants(ReportFormat::Csv) {
        let path = ReportFormat::Csv.output_path(&options.output_dir);
        write_frame_csv(&path, &batch.frame.data)?;
        written.push(path);
    }
    if options.wants(ReportFormat::Xlsx) {
        let path = ReportFormat::Xlsx.output_path(&options.output_dir);
        write_workbook(&path, batch, summary)?;
        written.push(path);
    }
    if options.wants(ReportFormat::Markdown) {
        let path = ReportFormat::Markdown.output_path(&options.output_dir);
        let source_name = run
            .source
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let evaluated_at = batch
            .frame
            .meta
            .as_ref()
            .and_then(|meta| meta.evaluated_at)
            .unwrap_or_default();
        write_briefing(&path, summary, &source_name, evaluated_at)?;
        written.push(path);
    }
    if options.wants(ReportFormat::Json) {
        let path = ReportFormat::Json.output_path(&options.output_dir);
        run.outputs = written.clone();
        write_run_report(&path, &run)?;
        written.push(path);
    }

    info!(
        output_dir = %options.output_dir.display(),
        files = written.len(),
        "reports written"
    );
    Ok(written)
}
