//! Table-level enrichment, filtering and aggregation.

use std::path::Path;

use chrono::NaiveDate;
use leadtime_core::{
    COMPLIANCE_COLUMN, DERIVED_COLUMNS, EvaluationContext, LEAD_TIME_COLUMN, ShipmentFilter,
    enrich_table, uncovered_years,
};
use leadtime_ingest::{CsvTable, ShipmentTable, column_strings, parse_csv_bytes};
use leadtime_model::{
    AlertKind, ComplianceCategory, HolidayCalendar, HomeDelivery, LeadTimePolicy, ZoneTable,
};
use polars::prelude::DataFrame;

const REPORT: &str = "\
Guia,Cliente,Subcuenta,Agencia destino,Localidad destino,Producto,Estado,ED,Fecha,Fecha último estado,Destinatario
A1,ACME,Central,La Plata,LA PLATA,Paquete,Entregada,SI,2025-01-06,2025-01-07,Ana
A2,ACME,Central,La Plata,LA PLATA,Paquete,Esperando retiro en sucursal,NO,2025-01-06,2025-01-09,Beto
A3,ACME,Norte,Cordoba,CORDOBA CAPITAL,Sobre,En camino,SI,2025-01-06,2025-01-13,Carla
A4,Otro SA,Norte,Cordoba,CORDOBA CAPITAL,Sobre,En camino,,2025-01-06,,Dario
A5,Otro SA,Central,Rosario,ROSARIO,Paquete,Redespachada,SI,2025-01-06,2025-01-08,Eva
A6,ACME,Central,Palermo,PALERMO,Paquete,En camino,NO,2025-01-06,2025-01-07,Fede
";

fn policy() -> LeadTimePolicy {
    let holidays = [(1, 1), (3, 3), (3, 24)]
        .into_iter()
        .filter_map(|(m, d)| NaiveDate::from_ymd_opt(2025, m, d));
    LeadTimePolicy::new(
        HolidayCalendar::from_dates(holidays),
        ZoneTable::new(["LA PLATA", "PALERMO"]),
    )
}

fn ctx() -> EvaluationContext {
    let now = NaiveDate::from_ymd_opt(2025, 1, 20)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid instant");
    EvaluationContext::new(now)
}

fn load(csv: &[u8]) -> ShipmentTable {
    let path = Path::new("reporte.csv");
    let table = parse_csv_bytes(csv, path).expect("parse report");
    ShipmentTable::from_csv_table(&table, path).expect("resolve report")
}

fn frame_to_csv_table(df: &DataFrame) -> CsvTable {
    let headers: Vec<String> = df
        .get_column_names_owned()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    let columns: Vec<Vec<String>> = headers
        .iter()
        .map(|name| column_strings(df, name).expect("column"))
        .collect();
    let rows = (0..df.height())
        .map(|idx| columns.iter().map(|col| col[idx].clone()).collect())
        .collect();
    CsvTable {
        headers,
        rows,
        delimiter: b',',
    }
}

#[test]
fn appends_derived_columns_after_source_columns() {
    let batch = enrich_table(load(REPORT.as_bytes()), &policy(), &ctx()).expect("enrich");
    let names: Vec<String> = batch
        .frame
        .data
        .get_column_names_owned()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(names.len(), 11 + DERIVED_COLUMNS.len());
    assert_eq!(names[0], "Guia");
    assert_eq!(&names[11..], DERIVED_COLUMNS.map(String::from).as_slice());
    assert_eq!(batch.frame.source_columns().len(), 11);
}

#[test]
fn categories_follow_rows_in_order() {
    let batch = enrich_table(load(REPORT.as_bytes()), &policy(), &ctx()).expect("enrich");
    let categories = column_strings(&batch.frame.data, COMPLIANCE_COLUMN).expect("column");
    assert_eq!(
        categories,
        vec![
            "Entregada - En Tiempo",
            "Entregada - Fuera de Tiempo",
            "Pendiente - Fuera de Tiempo",
            "Pendiente - Sin datos",
            "Pendiente - En Tiempo",
            "Pendiente - En Tiempo",
        ]
    );
    let lead = column_strings(&batch.frame.data, LEAD_TIME_COLUMN).expect("column");
    assert_eq!(lead, vec!["2", "4", "6", "", "3", "2"]);
    assert_eq!(batch.rows_with_alert(AlertKind::CriticalOverdue), vec![2]);
    assert_eq!(batch.rows_with_alert(AlertKind::RedispatchDelayed), vec![4]);
    assert!(batch.rows_with_alert(AlertKind::SuggestReturn).is_empty());
    assert!(batch.has_alerts());
}

#[test]
fn re_enriching_an_enriched_table_is_stable() {
    let policy = policy();
    let first = enrich_table(load(REPORT.as_bytes()), &policy, &ctx()).expect("enrich");
    let round_trip = frame_to_csv_table(&first.frame.data);
    let table = ShipmentTable::from_csv_table(&round_trip, Path::new("reporte.csv"))
        .expect("resolve enriched table");
    let second = enrich_table(table, &policy, &ctx()).expect("re-enrich");

    assert_eq!(first.frame.data.width(), second.frame.data.width());
    for name in DERIVED_COLUMNS {
        assert_eq!(
            column_strings(&first.frame.data, name).expect("first"),
            column_strings(&second.frame.data, name).expect("second"),
            "{name}"
        );
    }
    assert_eq!(first.enrichments, second.enrichments);
}

#[test]
fn filter_selects_rows_after_enrichment() {
    let batch = enrich_table(load(REPORT.as_bytes()), &policy(), &ctx()).expect("enrich");
    let filter = ShipmentFilter {
        client: Some("ACME".to_string()),
        home_delivery: Some(HomeDelivery::Yes),
        ..ShipmentFilter::default()
    };
    let filtered = batch.retain(&filter).expect("filter");
    assert_eq!(filtered.len(), 2);
    assert_eq!(filtered.frame.data.height(), 2);
    let guides = column_strings(&filtered.frame.data, "Guia").expect("guides");
    assert_eq!(guides, vec!["A1", "A3"]);
    assert!(filtered.enrichments[1].alerts.critical_overdue);
}

#[test]
fn summary_counts_add_up() {
    let batch = enrich_table(load(REPORT.as_bytes()), &policy(), &ctx()).expect("enrich");
    let summary = batch.summary();
    assert_eq!(summary.total, 6);
    assert_eq!(summary.delivered, 2);
    assert_eq!(summary.pending, 4);
    assert_eq!(
        summary.categories.iter().map(|c| c.count).sum::<usize>(),
        summary.total
    );
    assert_eq!(summary.count(ComplianceCategory::PendingOnTime), 2);
    assert_eq!(summary.on_time_rate, Some(0.5));
    assert_eq!(summary.alert_count(AlertKind::RedispatchDelayed), 1);
    assert_eq!(summary.rows_with_alerts, 2);
    assert_eq!(summary.late_localities[0].locality, "CORDOBA CAPITAL");
    assert_eq!(summary.late_localities.len(), 2);
    let sobre = summary
        .products
        .iter()
        .find(|p| p.product == "Sobre")
        .expect("product");
    assert_eq!(sobre.total, 2);
}

#[test]
fn nothing_delivered_has_no_rate() {
    let report = "\
Cliente,Subcuenta,Agencia destino,Loc,Producto,Estado,Fecha,Fecha ultimo estado
ACME,A,B,TIGRE,P,En camino,2025-01-06,
";
    let batch = enrich_table(load(report.as_bytes()), &policy(), &ctx()).expect("enrich");
    let summary = batch.summary();
    assert_eq!(summary.delivered, 0);
    assert_eq!(summary.on_time_rate, None);
}

#[test]
fn reports_years_without_holidays() {
    let report = "\
Cliente,Subcuenta,Agencia destino,Loc,Producto,Estado,Fecha,Fecha ultimo estado
ACME,A,B,TIGRE,P,En camino,2024-12-30,2025-01-02
";
    let table = load(report.as_bytes());
    let years = uncovered_years(&table.records, &policy().calendar, &ctx());
    assert_eq!(years.into_iter().collect::<Vec<_>>(), vec![2024]);
}
