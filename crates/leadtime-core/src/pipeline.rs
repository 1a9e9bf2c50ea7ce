//! Enrichment of a whole shipment table.
//!
//! Stages, in order:
//! 1. **Calendar check**: warn about years the batch touches without holidays
//! 2. **Enrich**: derive zone, lead time, compliance and alerts per record
//! 3. **Attach**: append the derived columns to the source frame
//!
//! Filtering happens afterwards on the enriched batch, so alerts and
//! categories never depend on which rows were selected.

use std::collections::BTreeSet;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Datelike;
use polars::prelude::{BooleanChunked, NewChunkedArray};
use tracing::{info, info_span, warn};

use leadtime_ingest::{ShipmentColumns, ShipmentTable};
use leadtime_model::{AlertKind, Enrichment, HolidayCalendar, LeadTimePolicy, ShipmentRecord};

use crate::enrich::{EvaluationContext, enrich_records};
use crate::filter::ShipmentFilter;
use crate::frame::{ShipmentFrame, ShipmentFrameMeta, attach_derived_columns};
use crate::summary::ComplianceSummary;

/// Source rows with their derived attributes, kept in lockstep.
#[derive(Debug, Clone)]
pub struct EnrichedBatch {
    pub frame: ShipmentFrame,
    /// Source header names of the shipment fields.
    pub columns: ShipmentColumns,
    pub records: Vec<ShipmentRecord>,
    pub enrichments: Vec<Enrichment>,
}

impl EnrichedBatch {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ShipmentRecord, &Enrichment)> {
        self.records.iter().zip(&self.enrichments)
    }

    /// Rows raising `kind`, in table order.
    pub fn rows_with_alert(&self, kind: AlertKind) -> Vec<usize> {
        self.enrichments
            .iter()
            .enumerate()
            .filter(|(_, e)| e.alerts.contains(kind))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn has_alerts(&self) -> bool {
        self.enrichments.iter().any(|e| e.alerts.any())
    }

    pub fn summary(&self) -> ComplianceSummary {
        ComplianceSummary::from_batch(&self.records, &self.enrichments)
    }

    /// Keep the rows selected by `filter`, preserving order.
    pub fn retain(self, filter: &ShipmentFilter) -> Result<Self> {
        if filter.is_empty() {
            return Ok(self);
        }
        let keep = filter.mask(&self.records);
        let mask = BooleanChunked::from_slice("filter".into(), &keep);
        let data = self
            .frame
            .data
            .filter(&mask)
            .context("filter enriched frame")?;
        let (records, enrichments): (Vec<_>, Vec<_>) = self
            .records
            .into_iter()
            .zip(self.enrichments)
            .zip(keep)
            .filter_map(|(pair, kept)| kept.then_some(pair))
            .unzip();
        Ok(Self {
            frame: ShipmentFrame {
                data,
                meta: self.frame.meta,
            },
            columns: self.columns,
            records,
            enrichments,
        })
    }
}

/// Years referenced by the batch (timestamps and evaluation instant) that
/// have no holidays configured.
pub fn uncovered_years(
    records: &[ShipmentRecord],
    calendar: &HolidayCalendar,
    ctx: &EvaluationContext,
) -> BTreeSet<i32> {
    let mut years: BTreeSet<i32> = records
        .iter()
        .flat_map(|record| [record.created_at, record.last_status_at])
        .flatten()
        .map(|dt| dt.year())
        .collect();
    years.insert(ctx.now.year());
    years.retain(|year| !calendar.covers(*year));
    years
}

/// Enrich every row of `table` and attach the derived columns.
pub fn enrich_table(
    table: ShipmentTable,
    policy: &LeadTimePolicy,
    ctx: &EvaluationContext,
) -> Result<EnrichedBatch> {
    let span = info_span!("enrich", source = %table.path.display(), rows = table.len());
    let _guard = span.enter();
    let start = Instant::now();

    for year in uncovered_years(&table.records, &policy.calendar, ctx) {
        warn!(
            year,
            "no holidays configured for year; only weekends are excluded"
        );
    }

    let enrichments = enrich_records(&table.records, policy, ctx);
    let mut data = table.frame;
    attach_derived_columns(&mut data, &enrichments).context("attach derived columns")?;

    let batch = EnrichedBatch {
        frame: ShipmentFrame::new(data).with_meta(ShipmentFrameMeta {
            source_file: Some(table.path),
            evaluated_at: Some(ctx.now),
        }),
        columns: table.columns,
        records: table.records,
        enrichments,
    };
    info!(
        record_count = batch.len(),
        alert_rows = batch.enrichments.iter().filter(|e| e.alerts.any()).count(),
        duration_ms = start.elapsed().as_millis(),
        "enrichment complete"
    );
    Ok(batch)
}
