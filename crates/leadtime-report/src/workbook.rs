//! XLSX export: enriched base table, statistics with a pie chart, and one
//! sheet per alert kind.

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use rust_xlsxwriter::{
    Chart, ChartDataLabel, ChartPoint, ChartSolidFill, ChartType, Format, FormatBorder, Workbook,
    Worksheet,
};
use tracing::debug;

use leadtime_core::{ComplianceSummary, EnrichedBatch};
use leadtime_ingest::{any_to_f64, any_to_string};
use leadtime_model::{AlertKind, ComplianceCategory};

use crate::common::{alert_export_columns, all_alerts_export_columns, percent};

pub const BASE_SHEET: &str = "Base";
pub const STATISTICS_SHEET: &str = "Estadísticas";
pub const ALL_ALERTS_SHEET: &str = "Todas las Alertas";
pub const ON_TIME_RATE_LABEL: &str = "% Cumplimiento (solo entregados)";

/// Sheet holding the listing for one alert kind.
pub fn alert_sheet_name(kind: AlertKind) -> &'static str {
    match kind {
        AlertKind::SuggestReturn => "Alertas Devolución",
        AlertKind::RedispatchDelayed => "Alertas Redespacho",
        AlertKind::CriticalOverdue => "Alertas Pendiente Fuera Tiempo",
    }
}

struct Formats {
    header: Format,
    text: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            header: Format::new()
                .set_bold()
                .set_background_color(0x4472C4)
                .set_font_color(0xFFFFFF)
                .set_border(FormatBorder::Thin),
            text: Format::new().set_border(FormatBorder::Thin),
        }
    }
}

/// Build the workbook and save it to `path`.
pub fn write_workbook(path: &Path, batch: &EnrichedBatch, summary: &ComplianceSummary) -> Result<()> {
    let mut workbook = Workbook::new();
    let formats = Formats::new();
    let df = &batch.frame.data;

    let names: Vec<String> = df
        .get_column_names_owned()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    let all_rows: Vec<usize> = (0..df.height()).collect();
    let sheet = workbook.add_worksheet();
    sheet.set_name(BASE_SHEET)?;
    write_table(sheet, df, &names, &all_rows, &formats)?;

    let sheet = workbook.add_worksheet();
    sheet.set_name(STATISTICS_SHEET)?;
    write_statistics(sheet, summary, &formats)?;

    for kind in AlertKind::ALL {
        let rows = batch.rows_with_alert(kind);
        if rows.is_empty() {
            continue;
        }
        let sheet = workbook.add_worksheet();
        sheet.set_name(alert_sheet_name(kind))?;
        write_table(sheet, df, &alert_export_columns(batch, kind), &rows, &formats)?;
        debug!(sheet = alert_sheet_name(kind), rows = rows.len(), "alert sheet written");
    }

    let any_rows: Vec<usize> = batch
        .enrichments
        .iter()
        .enumerate()
        .filter(|(_, e)| e.alerts.any())
        .map(|(idx, _)| idx)
        .collect();
    if !any_rows.is_empty() {
        let sheet = workbook.add_worksheet();
        sheet.set_name(ALL_ALERTS_SHEET)?;
        write_table(sheet, df, &all_alerts_export_columns(batch), &any_rows, &formats)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("save workbook {}", path.display()))?;
    Ok(())
}

/// Write `columns` of the selected `rows`, numbers as numbers.
fn write_table(
    sheet: &mut Worksheet,
    df: &DataFrame,
    columns: &[String],
    rows: &[usize],
    formats: &Formats,
) -> Result<()> {
    for (col_idx, name) in columns.iter().enumerate() {
        let col = col_idx as u16;
        sheet.write_string_with_format(0, col, name, &formats.header)?;
        sheet.set_column_width(col, (name.chars().count() + 4).clamp(10, 40) as f64)?;
        let Ok(column) = df.column(name) else {
            continue;
        };
        for (out_idx, row) in rows.iter().enumerate() {
            let out_row = out_idx as u32 + 1;
            let value = column.get(*row)?;
            if let Some(number) = any_to_f64(value.clone()) {
                sheet.write_number_with_format(out_row, col, number, &formats.text)?;
            } else {
                let text = any_to_string(value);
                sheet.write_string_with_format(out_row, col, &text, &formats.text)?;
            }
        }
    }
    Ok(())
}

fn write_statistics(
    sheet: &mut Worksheet,
    summary: &ComplianceSummary,
    formats: &Formats,
) -> Result<()> {
    sheet.write_string_with_format(0, 0, "Métrica", &formats.header)?;
    sheet.write_string_with_format(0, 1, "Valor", &formats.header)?;
    sheet.set_column_width(0, 34)?;
    sheet.set_column_width(1, 12)?;

    let mut metrics: Vec<(&str, usize)> = vec![
        ("Total Pedidos", summary.total),
        ("Entregados", summary.delivered),
        ("Pendientes", summary.pending),
    ];
    metrics.extend(
        summary
            .categories
            .iter()
            .map(|entry| (entry.category.as_str(), entry.count)),
    );
    let mut row = 1u32;
    for (label, value) in &metrics {
        sheet.write_string_with_format(row, 0, *label, &formats.text)?;
        sheet.write_number_with_format(row, 1, *value as f64, &formats.text)?;
        row += 1;
    }
    let rate = summary
        .on_time_rate
        .map_or_else(|| "0%".to_string(), |rate| percent(rate * 100.0));
    sheet.write_string_with_format(row, 0, ON_TIME_RATE_LABEL, &formats.text)?;
    sheet.write_string_with_format(row, 1, &rate, &formats.text)?;

    // Chart source table next to the metrics.
    let (first_row, label_col, value_col) = (0u32, 3u16, 4u16);
    sheet.write_string_with_format(first_row, label_col, "Categoría", &formats.header)?;
    sheet.write_string_with_format(first_row, value_col, "Cantidad", &formats.header)?;
    sheet.set_column_width(label_col, 30)?;
    let mut points = Vec::with_capacity(ComplianceCategory::ALL.len());
    for (idx, entry) in summary.categories.iter().enumerate() {
        let r = first_row + 1 + idx as u32;
        sheet.write_string_with_format(r, label_col, entry.category.as_str(), &formats.text)?;
        sheet.write_number_with_format(r, value_col, entry.count as f64, &formats.text)?;
        points.push(
            ChartPoint::new().set_format(ChartSolidFill::new().set_color(entry.category.color())),
        );
    }
    let last_row = first_row + summary.categories.len() as u32;

    let mut chart = Chart::new(ChartType::Pie);
    chart.title().set_name("Distribución de Cumplimiento");
    chart
        .add_series()
        .set_categories((STATISTICS_SHEET, first_row + 1, label_col, last_row, label_col))
        .set_values((STATISTICS_SHEET, first_row + 1, value_col, last_row, value_col))
        .set_points(&points)
        .set_data_label(
            ChartDataLabel::new()
                .show_percentage()
                .show_value()
                .show_category_name(),
        );
    sheet.insert_chart(row + 3, label_col, &chart)?;
    Ok(())
}
