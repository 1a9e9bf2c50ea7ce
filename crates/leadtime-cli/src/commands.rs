use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info_span, trace};

use leadtime_cli::pipeline::{load_policy_stage, parse_instant};
use leadtime_cli::{ReportOutcome, ReportRequest, default_output_dir, run_report_pipeline};
use leadtime_core::{EvaluationContext, ShipmentFilter, enrich_record, matching_amba_entry};
use leadtime_model::{ShipmentRecord, Zone};
use leadtime_report::ReportFormat;

use crate::cli::{ClassifyArgs, FilterArgs, HolidaysArgs, ReportArgs};
use crate::summary::{apply_table_style, classification_rows};

fn shipment_filter(args: &FilterArgs) -> ShipmentFilter {
    ShipmentFilter {
        client: args.client.clone(),
        sub_account: args.sub_account.clone(),
        agency: args.agency.clone(),
        home_delivery: args.home_delivery,
    }
}

fn evaluation_context(as_of: Option<&str>, log_data: bool) -> Result<EvaluationContext> {
    let ctx = match as_of {
        Some(value) => EvaluationContext::new(parse_instant(value).context("--as-of")?),
        None => EvaluationContext::wall_clock(),
    };
    Ok(ctx.with_log_data(log_data))
}

pub fn run_report(
    args: &ReportArgs,
    standards_dir: Option<&Path>,
    log_data: bool,
) -> Result<ReportOutcome> {
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&args.input));
    let mut request = ReportRequest::new(&args.input, output_dir);
    request.standards_dir = standards_dir.map(Path::to_path_buf);
    if !args.formats.is_empty() {
        request.formats = args.formats.iter().copied().map(ReportFormat::from).collect();
    }
    request.filter = shipment_filter(&args.filter);
    request.as_of = args
        .as_of
        .as_deref()
        .map(parse_instant)
        .transpose()
        .context("--as-of")?;
    request.dry_run = args.dry_run;
    request.log_data = log_data;
    run_report_pipeline(&request)
}

pub fn run_holidays(args: &HolidaysArgs, standards_dir: Option<&Path>) -> Result<()> {
    let policy = load_policy_stage(standards_dir)?;
    let calendar = &policy.calendar;
    let years: Vec<i32> = match args.year {
        Some(year) => vec![year],
        None => calendar.years().collect(),
    };
    let mut table = Table::new();
    table.set_header(vec!["Fecha", "Día", "Nombre"]);
    apply_table_style(&mut table);
    for year in years {
        if !calendar.covers(year) {
            eprintln!("warning: no holidays configured for {year}");
            continue;
        }
        for (date, name) in calendar.holidays_in(year) {
            table.add_row(vec![
                date.format("%Y-%m-%d").to_string(),
                date.format("%a").to_string(),
                name.to_string(),
            ]);
        }
    }
    println!("{table}");
    Ok(())
}

pub fn run_zones(standards_dir: Option<&Path>) -> Result<()> {
    let policy = load_policy_stage(standards_dir)?;
    let mut promise = Table::new();
    promise.set_header(vec!["Zona", "Días Prometidos"]);
    apply_table_style(&mut promise);
    for zone in Zone::ALL {
        promise.add_row(vec![zone.to_string(), policy.promise.days_for(zone).to_string()]);
    }
    println!("{promise}");

    let mut localities = Table::new();
    localities.set_header(vec!["#", "Localidad AMBA"]);
    apply_table_style(&mut localities);
    for (idx, locality) in policy.zones.amba_localities().iter().enumerate() {
        localities.add_row(vec![(idx + 1).to_string(), locality.clone()]);
    }
    println!("{localities}");
    Ok(())
}

pub fn run_classify(
    args: &ClassifyArgs,
    standards_dir: Option<&Path>,
    log_data: bool,
) -> Result<()> {
    let policy = load_policy_stage(standards_dir)?;
    let ctx = evaluation_context(args.as_of.as_deref(), log_data)?;
    let created_at = args
        .created
        .as_deref()
        .map(parse_instant)
        .transpose()
        .context("--created")?;
    let last_status_at = args
        .last_status
        .as_deref()
        .map(parse_instant)
        .transpose()
        .context("--last-status")?;
    let mut record = ShipmentRecord::new(0)
        .with_status(args.status.clone())
        .with_home_delivery(args.home_delivery)
        .with_created_at(created_at)
        .with_last_status_at(last_status_at);
    if let Some(locality) = &args.locality {
        record = record.with_locality(locality.clone());
    }

    let span = info_span!("classify");
    let _guard = span.enter();
    let matched = matching_amba_entry(record.locality.as_deref(), &policy.zones);
    trace!(
        locality = ctx.redact(record.locality.as_deref().unwrap_or_default()),
        amba_entry = matched.unwrap_or("-"),
        "zone lookup"
    );
    let enrichment = enrich_record(&record, &policy, &ctx);

    let mut table = Table::new();
    table.set_header(vec!["Atributo", "Valor"]);
    apply_table_style(&mut table);
    for (label, value) in classification_rows(&enrichment, ctx.now) {
        table.add_row(vec![label.to_string(), value]);
    }
    println!("{table}");
    Ok(())
}
