//! Stage functions for the `report` command.
//!
//! 1. **Policy**: load holidays, zones and thresholds from the standards root
//! 2. **Ingest**: read and resolve the shipment export
//! 3. **Enrich**: derive the compliance columns on the full table
//! 4. **Filter**: select rows for reporting
//! 5. **Output**: write the requested reports (skipped on dry runs)

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDateTime;
use tracing::{info, info_span};

use leadtime_core::{
    ComplianceSummary, EnrichedBatch, EvaluationContext, ShipmentFilter, enrich_table,
    uncovered_years,
};
use leadtime_ingest::{IngestStats, ShipmentTable, parse_timestamp, read_shipment_table};
use leadtime_model::LeadTimePolicy;
use leadtime_report::{ReportOptions, RunReport, SourceInfo, sha256_file, write_reports};
use leadtime_standards::{load_policy, resolve_standards_root};

use crate::types::{ReportOutcome, ReportRequest};

/// Parse an `--as-of` value with the same formats accepted in exports.
pub fn parse_instant(value: &str) -> Result<NaiveDateTime> {
    parse_timestamp(value).ok_or_else(|| anyhow!("unrecognized date/time: {value:?}"))
}

/// Default output directory: `output/` next to the input file.
pub fn default_output_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .map_or_else(|| PathBuf::from("output"), |dir| dir.join("output"))
}

pub fn load_policy_stage(standards_dir: Option<&Path>) -> Result<LeadTimePolicy> {
    let root = resolve_standards_root(standards_dir);
    let span = info_span!("policy", root = %root.display());
    let _guard = span.enter();
    let policy =
        load_policy(&root).with_context(|| format!("load standards from {}", root.display()))?;
    info!(
        holidays = policy.calendar.len(),
        amba_localities = policy.zones.len(),
        promise_amba = policy.promise.amba,
        promise_interior = policy.promise.interior,
        "policy loaded"
    );
    Ok(policy)
}

pub fn ingest_stage(input: &Path) -> Result<ShipmentTable> {
    let span = info_span!("ingest", input = %input.display());
    let _guard = span.enter();
    let start = Instant::now();
    let table =
        read_shipment_table(input).with_context(|| format!("read {}", input.display()))?;
    info!(
        rows = table.len(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(table)
}

pub fn filter_stage(batch: EnrichedBatch, filter: &ShipmentFilter) -> Result<EnrichedBatch> {
    let span = info_span!("filter");
    let _guard = span.enter();
    let before = batch.len();
    let batch = batch.retain(filter)?;
    if !filter.is_empty() {
        info!(before, after = batch.len(), "filter applied");
    }
    Ok(batch)
}

/// Inputs for the output stage.
pub struct OutputConfig<'a> {
    pub request: &'a ReportRequest,
    pub batch: &'a EnrichedBatch,
    pub summary: &'a ComplianceSummary,
    pub policy: &'a LeadTimePolicy,
    pub stats: &'a IngestStats,
    pub evaluated_at: NaiveDateTime,
    pub uncovered_years: &'a [i32],
}

pub fn output_stage(config: &OutputConfig<'_>) -> Result<Vec<PathBuf>> {
    let request = config.request;
    let span = info_span!("output", output_dir = %request.output_dir.display());
    let _guard = span.enter();
    let start = Instant::now();
    let run = RunReport {
        source: SourceInfo::new(&request.input, sha256_file(&request.input)?, config.stats),
        evaluated_at: RunReport::evaluated_at_text(config.evaluated_at),
        filter: request.filter.clone(),
        promise: config.policy.promise,
        alerts: config.policy.alerts,
        evaluated_rows: config.batch.len(),
        uncovered_years: config.uncovered_years.to_vec(),
        summary: config.summary.clone(),
        outputs: Vec::new(),
    };
    let options =
        ReportOptions::new(&request.output_dir).with_formats(request.formats.iter().copied());
    let written = write_reports(&options, config.batch, config.summary, run)?;
    info!(
        files = written.len(),
        duration_ms = start.elapsed().as_millis(),
        "output complete"
    );
    Ok(written)
}

/// Run every stage for one export.
pub fn run_report_pipeline(request: &ReportRequest) -> Result<ReportOutcome> {
    let span = info_span!("report", input = %request.input.display());
    let _guard = span.enter();

    let policy = load_policy_stage(request.standards_dir.as_deref())?;
    let table = ingest_stage(&request.input)?;
    let stats = table.stats;

    let ctx = request
        .as_of
        .map_or_else(EvaluationContext::wall_clock, EvaluationContext::new)
        .with_log_data(request.log_data);
    let uncovered: Vec<i32> = uncovered_years(&table.records, &policy.calendar, &ctx)
        .into_iter()
        .collect();
    let batch = enrich_table(table, &policy, &ctx)?;
    let batch = filter_stage(batch, &request.filter)?;
    let summary = batch.summary();

    let outputs = if request.dry_run {
        info!("dry run; no files written");
        Vec::new()
    } else {
        output_stage(&OutputConfig {
            request,
            batch: &batch,
            summary: &summary,
            policy: &policy,
            stats: &stats,
            evaluated_at: ctx.now,
            uncovered_years: &uncovered,
        })?
    };

    Ok(ReportOutcome {
        input: request.input.clone(),
        output_dir: request.output_dir.clone(),
        evaluated_at: ctx.now,
        stats,
        evaluated_rows: batch.len(),
        summary,
        uncovered_years: uncovered,
        outputs,
        dry_run: request.dry_run,
    })
}
