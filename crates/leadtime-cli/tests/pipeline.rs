//! End-to-end runs of the report pipeline against the bundled standards.

use std::path::{Path, PathBuf};

use leadtime_cli::{ReportRequest, parse_instant, run_report_pipeline};
use leadtime_core::ShipmentFilter;
use leadtime_model::ComplianceCategory;
use leadtime_report::{ENRICHED_CSV_FILE, ReportFormat, RUN_REPORT_FILE};

const REPORT: &str = "\
Guia;Cliente;Subcuenta;Agencia destino;Localidad destino;Producto;Estado;ED;Fecha;Fecha último estado;Destinatario
A1;ACME;Central;Palermo;PALERMO;Paquete;Entregada;SI;06/01/2025 09:00;07/01/2025 15:30;Ana
A2;ACME;Norte;Cordoba;CORDOBA CAPITAL;Sobre;En camino;SI;06/01/2025;13/01/2025;Carla
A3;Otro SA;Central;Rosario;ROSARIO;Paquete;Redespachada;SI;06/01/2025;08/01/2025;Eva
A4;Otro SA;Central;Quilmes;QUILMES;Paquete;En camino;;06/01/2025;;Dario
";

fn standards_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../standards")
}

fn request(dir: &Path) -> ReportRequest {
    let input = dir.join("envios.csv");
    std::fs::write(&input, REPORT).expect("write input");
    let mut request = ReportRequest::new(input, dir.join("output"));
    request.standards_dir = Some(standards_dir());
    request.as_of = Some(parse_instant("2025-01-20 12:00").expect("instant"));
    request
}

#[test]
fn writes_every_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let request = request(dir.path());
    let outcome = run_report_pipeline(&request).expect("run");

    assert_eq!(outcome.stats.rows, 4);
    assert_eq!(outcome.evaluated_rows, 4);
    assert_eq!(outcome.outputs.len(), ReportFormat::ALL.len());
    assert!(outcome.uncovered_years.is_empty());
    assert!(outcome.has_alerts());

    let summary = &outcome.summary;
    assert_eq!(summary.count(ComplianceCategory::DeliveredOnTime), 1);
    assert_eq!(summary.count(ComplianceCategory::PendingLate), 1);
    assert_eq!(summary.count(ComplianceCategory::PendingNoData), 1);
    assert_eq!(summary.rows_with_alerts, 2);

    let csv = std::fs::read_to_string(dir.path().join("output").join(ENRICHED_CSV_FILE))
        .expect("read csv");
    assert_eq!(csv.lines().count(), 5);
    assert!(csv.lines().next().is_some_and(|header| header.contains(",ZONA,Lead Time,")));

    let json = std::fs::read_to_string(dir.path().join("output").join(RUN_REPORT_FILE))
        .expect("read run report");
    let value: serde_json::Value = serde_json::from_str(&json).expect("json");
    assert_eq!(value["evaluated_at"], "2025-01-20 12:00:00");
    assert_eq!(value["source"]["rows"], 4);
    assert_eq!(value["source"]["sha256"].as_str().map(str::len), Some(64));
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut request = request(dir.path());
    request.dry_run = true;
    let outcome = run_report_pipeline(&request).expect("run");
    assert!(outcome.outputs.is_empty());
    assert!(!dir.path().join("output").exists());
    assert_eq!(outcome.summary.total, 4);
}

#[test]
fn filters_after_enrichment() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut request = request(dir.path());
    request.filter = ShipmentFilter {
        client: Some("Otro SA".to_string()),
        ..ShipmentFilter::default()
    };
    request.formats = vec![ReportFormat::Csv];
    let outcome = run_report_pipeline(&request).expect("run");
    assert_eq!(outcome.stats.rows, 4);
    assert_eq!(outcome.evaluated_rows, 2);
    assert_eq!(outcome.outputs.len(), 1);
    assert_eq!(outcome.summary.rows_with_alerts, 1);
}

#[test]
fn reports_uncovered_years() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut request = request(dir.path());
    request.as_of = Some(parse_instant("2026-02-02").expect("instant"));
    request.dry_run = true;
    let outcome = run_report_pipeline(&request).expect("run");
    assert_eq!(outcome.uncovered_years, vec![2026]);
}

#[test]
fn missing_required_column_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("roto.csv");
    std::fs::write(&input, "Guia,Cliente\nA1,ACME\n").expect("write input");
    let mut request = ReportRequest::new(input, dir.path().join("output"));
    request.standards_dir = Some(standards_dir());
    let error = run_report_pipeline(&request).expect_err("missing columns");
    assert!(format!("{error:#}").contains("Subcuenta"), "{error:#}");
}
