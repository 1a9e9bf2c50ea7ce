//! Markdown executive briefing.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;

use leadtime_core::ComplianceSummary;
use leadtime_model::{AlertKind, ComplianceCategory};

use crate::common::percent;
use crate::workbook::ON_TIME_RATE_LABEL;

const RECOMMENDATIONS: [&str; 4] = [
    "Monitorear localidades con alto índice de fuera de tiempo",
    "Optimizar rutas en zonas con mayor volumen de pendientes",
    "Coordinar con transportistas en áreas con bajo cumplimiento",
    "Implementar alertas proactivas para pedidos próximos a vencer",
];

fn share(summary: &ComplianceSummary, count: usize) -> String {
    format!("{count} ({:.1}%)", summary.percent_of_total(count))
}

/// Render the briefing for `summary`.
pub fn render_briefing(
    summary: &ComplianceSummary,
    source_name: &str,
    evaluated_at: NaiveDateTime,
) -> String {
    let mut lines = vec![
        "# Reporte de Lead Time".to_string(),
        String::new(),
        format!("Fuente: `{source_name}`"),
        format!("Evaluado: {}", evaluated_at.format("%Y-%m-%d %H:%M")),
        String::new(),
        "## Resumen Ejecutivo".to_string(),
        String::new(),
        "| Métrica | Valor |".to_string(),
        "|---|---|".to_string(),
        format!("| Total Pedidos | {} |", summary.total),
        format!("| Entregados | {} |", share(summary, summary.delivered)),
        format!("| Pendientes | {} |", share(summary, summary.pending)),
    ];
    for entry in &summary.categories {
        lines.push(format!("| {} | {} |", entry.category, entry.count));
    }
    if let Some(rate) = summary.on_time_rate {
        lines.push(format!("| {ON_TIME_RATE_LABEL} | {} |", percent(rate * 100.0)));
    }

    lines.extend([
        String::new(),
        "## Alertas".to_string(),
        String::new(),
        "| Alerta | Envíos |".to_string(),
        "|---|---|".to_string(),
    ]);
    for kind in AlertKind::ALL {
        lines.push(format!("| {kind} | {} |", summary.alert_count(kind)));
    }

    lines.extend([
        String::new(),
        "## Top 10 Localidades con Más Fuera de Tiempo".to_string(),
        String::new(),
    ]);
    if summary.late_localities.is_empty() {
        lines.push("Sin envíos fuera de tiempo.".to_string());
    }
    for (idx, entry) in summary.late_localities.iter().enumerate() {
        lines.push(format!("{}. {}: {}", idx + 1, entry.locality, entry.count));
    }

    lines.extend([
        String::new(),
        "## Cumplimiento por Producto".to_string(),
        String::new(),
        "| Producto | Total | En Tiempo | Fuera de Tiempo | Pendientes |".to_string(),
        "|---|---|---|---|---|".to_string(),
    ]);
    for product in &summary.products {
        let count = |category: ComplianceCategory| {
            product
                .categories
                .iter()
                .find(|entry| entry.category == category)
                .map_or(0, |entry| entry.count)
        };
        let pending: usize = product
            .categories
            .iter()
            .filter(|entry| entry.category.is_pending())
            .map(|entry| entry.count)
            .sum();
        let name = if product.product.is_empty() {
            "(sin producto)"
        } else {
            product.product.as_str()
        };
        lines.push(format!(
            "| {name} | {} | {} | {} | {pending} |",
            product.total,
            count(ComplianceCategory::DeliveredOnTime),
            count(ComplianceCategory::DeliveredLate),
        ));
    }

    lines.extend([
        String::new(),
        "## Recomendaciones Estratégicas".to_string(),
        String::new(),
    ]);
    lines.extend(RECOMMENDATIONS.iter().map(|item| format!("- {item}")));
    lines.push(String::new());
    lines.join("\n")
}

pub fn write_briefing(
    path: &Path,
    summary: &ComplianceSummary,
    source_name: &str,
    evaluated_at: NaiveDateTime,
) -> Result<()> {
    let text = render_briefing(summary, source_name, evaluated_at);
    std::fs::write(path, text).with_context(|| format!("write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use leadtime_model::{
        AlertKind, Alerts, ComplianceCategory, Enrichment, RemainingDays, ShipmentRecord,
        StatusMarkers, Zone,
    };

    use super::*;

    fn enrichment(category: ComplianceCategory, alerts: Alerts) -> Enrichment {
        Enrichment {
            zone: Zone::Interior,
            promised_days: 5,
            lead_time: Some(1),
            status: StatusMarkers::default(),
            category,
            remaining: RemainingDays::NotApplicable,
            alerts,
        }
    }

    fn record(row: usize, locality: &str, product: &str) -> ShipmentRecord {
        let mut record = ShipmentRecord::new(row).with_locality(locality);
        record.product = product.to_string();
        record
    }

    #[test]
    fn renders_briefing() {
        let mut overdue = Alerts::default();
        overdue.set(AlertKind::CriticalOverdue, true);
        let records = vec![
            record(0, "ROSARIO", "Paquete"),
            record(1, "ROSARIO", "Paquete"),
            record(2, "CORDOBA", "Sobre"),
            record(3, "TIGRE", "Sobre"),
        ];
        let enrichments = vec![
            enrichment(ComplianceCategory::DeliveredOnTime, Alerts::default()),
            enrichment(ComplianceCategory::DeliveredLate, Alerts::default()),
            enrichment(ComplianceCategory::PendingLate, overdue),
            enrichment(ComplianceCategory::PendingOnTime, Alerts::default()),
        ];
        let summary = ComplianceSummary::from_batch(&records, &enrichments);
        let evaluated_at = NaiveDate::from_ymd_opt(2025, 1, 20)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .expect("instant");

        insta::assert_snapshot!(render_briefing(&summary, "reporte.csv", evaluated_at), @r"
        # Reporte de Lead Time

        Fuente: `reporte.csv`
        Evaluado: 2025-01-20 09:30

        ## Resumen Ejecutivo

        | Métrica | Valor |
        |---|---|
        | Total Pedidos | 4 |
        | Entregados | 2 (50.0%) |
        | Pendientes | 2 (50.0%) |
        | Entregada - En Tiempo | 1 |
        | Entregada - Fuera de Tiempo | 1 |
        | Pendiente - En Tiempo | 1 |
        | Pendiente - Último Día | 0 |
        | Pendiente - Fuera de Tiempo | 1 |
        | Pendiente - Sin datos | 0 |
        | % Cumplimiento (solo entregados) | 50.00% |

        ## Alertas

        | Alerta | Envíos |
        |---|---|
        | Sugerir devolución | 0 |
        | Redespacho demorado | 0 |
        | Fuera de tiempo crítico | 1 |

        ## Top 10 Localidades con Más Fuera de Tiempo

        1. CORDOBA: 1
        2. ROSARIO: 1

        ## Cumplimiento por Producto

        | Producto | Total | En Tiempo | Fuera de Tiempo | Pendientes |
        |---|---|---|---|---|
        | Paquete | 2 | 1 | 1 | 0 |
        | Sobre | 2 | 0 | 0 | 2 |

        ## Recomendaciones Estratégicas

        - Monitorear localidades con alto índice de fuera de tiempo
        - Optimizar rutas en zonas con mayor volumen de pendientes
        - Coordinar con transportistas en áreas con bajo cumplimiento
        - Implementar alertas proactivas para pedidos próximos a vencer
        ");
    }

    #[test]
    fn omits_rate_when_nothing_delivered() {
        let records = vec![record(0, "TIGRE", "Sobre")];
        let enrichments = vec![enrichment(ComplianceCategory::PendingNoData, Alerts::default())];
        let summary = ComplianceSummary::from_batch(&records, &enrichments);
        let text = render_briefing(&summary, "r.csv", NaiveDateTime::default());
        assert!(!text.contains(ON_TIME_RATE_LABEL));
        assert!(text.contains("Sin envíos fuera de tiempo."));
    }
}
