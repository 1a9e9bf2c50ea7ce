use chrono::NaiveDateTime;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use leadtime_cli::ReportOutcome;
use leadtime_model::{AlertKind, ComplianceCategory, Enrichment};
use leadtime_report::percent;

pub fn print_summary(outcome: &ReportOutcome) {
    let summary = &outcome.summary;
    println!("Input: {}", outcome.input.display());
    println!("Evaluated at: {}", outcome.evaluated_at.format("%Y-%m-%d %H:%M"));
    if outcome.evaluated_rows != outcome.stats.rows {
        println!(
            "Rows: {} of {} after filters",
            outcome.evaluated_rows, outcome.stats.rows
        );
    } else {
        println!("Rows: {}", outcome.stats.rows);
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Cumplimiento"),
        header_cell("Envíos"),
        header_cell("%"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for entry in &summary.categories {
        table.add_row(vec![
            category_cell(entry.category),
            count_cell(entry.count, category_color(entry.category)),
            dim_cell(percent(summary.percent_of_total(entry.count))),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.total).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
    match summary.on_time_rate {
        Some(rate) => println!(
            "On-time rate (delivered only): {}",
            percent(rate * 100.0)
        ),
        None => println!("On-time rate (delivered only): -"),
    }

    let mut alerts = Table::new();
    alerts.set_header(vec![header_cell("Alerta"), header_cell("Envíos")]);
    apply_summary_table_style(&mut alerts);
    align_column(&mut alerts, 1, CellAlignment::Right);
    for kind in AlertKind::ALL {
        alerts.add_row(vec![
            Cell::new(kind.tag()),
            count_cell(summary.alert_count(kind), Color::Red),
        ]);
    }
    println!("{alerts}");

    for year in &outcome.uncovered_years {
        eprintln!("warning: no holidays configured for {year}; only weekends were excluded");
    }
    if outcome.dry_run {
        println!("Dry run: no files written");
    } else {
        println!("Output: {}", outcome.output_dir.display());
        for path in &outcome.outputs {
            println!("  {}", path.display());
        }
    }
}

/// Attribute/value rows describing one evaluated shipment.
pub fn classification_rows(
    enrichment: &Enrichment,
    now: NaiveDateTime,
) -> Vec<(&'static str, String)> {
    let alerts: Vec<&str> = enrichment.alerts.iter().map(AlertKind::tag).collect();
    let remaining = enrichment.remaining.to_string();
    let markers = enrichment.status.labels();
    vec![
        ("Zona", enrichment.zone.to_string()),
        (
            "Estado",
            if markers.is_empty() { "-".to_string() } else { markers.join(", ") },
        ),
        ("Días Prometidos", enrichment.promised_days.to_string()),
        (
            "Lead Time",
            enrichment
                .lead_time
                .map_or_else(|| "-".to_string(), |days| days.to_string()),
        ),
        ("Cumplimiento", enrichment.category.to_string()),
        (
            "Días Restantes",
            if remaining.is_empty() { "-".to_string() } else { remaining },
        ),
        (
            "Alertas",
            if alerts.is_empty() { "-".to_string() } else { alerts.join(", ") },
        ),
        ("Evaluado", now.format("%Y-%m-%d %H:%M").to_string()),
    ]
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn category_color(category: ComplianceCategory) -> Color {
    match category {
        ComplianceCategory::DeliveredOnTime => Color::Green,
        ComplianceCategory::DeliveredLate | ComplianceCategory::PendingLate => Color::Red,
        ComplianceCategory::PendingOnTime => Color::Yellow,
        ComplianceCategory::PendingLastDay => Color::DarkYellow,
        ComplianceCategory::PendingNoData => Color::Cyan,
    }
}

fn category_cell(category: ComplianceCategory) -> Cell {
    Cell::new(category.as_str()).fg(category_color(category))
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use leadtime_model::{Alerts, RemainingDays, StatusMarkers, Zone};

    use super::*;

    #[test]
    fn describes_an_overdue_shipment() {
        let mut alerts = Alerts::default();
        alerts.set(AlertKind::CriticalOverdue, true);
        let enrichment = Enrichment {
            zone: Zone::Interior,
            promised_days: 5,
            lead_time: Some(6),
            status: StatusMarkers::default(),
            category: ComplianceCategory::PendingLate,
            remaining: RemainingDays::NotApplicable,
            alerts,
        };
        let now = NaiveDate::from_ymd_opt(2025, 1, 20)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .expect("instant");
        let text: Vec<String> = classification_rows(&enrichment, now)
            .into_iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect();
        insta::assert_snapshot!(text.join("\n"), @r"
        Zona: INTERIOR
        Estado: -
        Días Prometidos: 5
        Lead Time: 6
        Cumplimiento: Pendiente - Fuera de Tiempo
        Días Restantes: -
        Alertas: Fuera de tiempo crítico
        Evaluado: 2025-01-20 12:00
        ");
    }
}
