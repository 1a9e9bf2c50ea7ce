//! Aggregate counts over an enriched batch.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use leadtime_model::{AlertKind, ComplianceCategory, Enrichment, ShipmentRecord};

/// Number of localities listed in [`ComplianceSummary::late_localities`].
pub const TOP_LATE_LOCALITIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: ComplianceCategory,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertCount {
    pub kind: AlertKind,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalityCount {
    pub locality: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductBreakdown {
    pub product: String,
    pub total: usize,
    pub categories: Vec<CategoryCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub total: usize,
    pub delivered: usize,
    pub pending: usize,
    /// All six categories in canonical order, zeros included.
    pub categories: Vec<CategoryCount>,
    /// Delivered on time over delivered; `None` when nothing was delivered.
    pub on_time_rate: Option<f64>,
    pub alerts: Vec<AlertCount>,
    /// Rows raising at least one alert.
    pub rows_with_alerts: usize,
    /// Localities with the most late shipments, descending.
    pub late_localities: Vec<LocalityCount>,
    pub products: Vec<ProductBreakdown>,
}

fn category_counts(counts: &BTreeMap<ComplianceCategory, usize>) -> Vec<CategoryCount> {
    ComplianceCategory::ALL
        .into_iter()
        .map(|category| CategoryCount {
            category,
            count: counts.get(&category).copied().unwrap_or(0),
        })
        .collect()
}

impl ComplianceSummary {
    /// Summarize records and their enrichments (paired by position).
    pub fn from_batch(records: &[ShipmentRecord], enrichments: &[Enrichment]) -> Self {
        let mut by_category: BTreeMap<ComplianceCategory, usize> = BTreeMap::new();
        let mut by_alert: BTreeMap<AlertKind, usize> = BTreeMap::new();
        let mut late: BTreeMap<String, usize> = BTreeMap::new();
        let mut products: BTreeMap<String, BTreeMap<ComplianceCategory, usize>> = BTreeMap::new();
        let mut rows_with_alerts = 0usize;

        for (record, enrichment) in records.iter().zip(enrichments) {
            *by_category.entry(enrichment.category).or_default() += 1;
            for kind in enrichment.alerts.iter() {
                *by_alert.entry(kind).or_default() += 1;
            }
            if enrichment.alerts.any() {
                rows_with_alerts += 1;
            }
            if enrichment.category.is_late()
                && let Some(locality) = record.locality.as_deref()
            {
                *late.entry(locality.trim().to_string()).or_default() += 1;
            }
            *products
                .entry(record.product.trim().to_string())
                .or_default()
                .entry(enrichment.category)
                .or_default() += 1;
        }

        let total = records.len().min(enrichments.len());
        let delivered: usize = by_category
            .iter()
            .filter(|(category, _)| category.is_delivered())
            .map(|(_, count)| count)
            .sum();
        let on_time = by_category
            .get(&ComplianceCategory::DeliveredOnTime)
            .copied()
            .unwrap_or(0);
        let on_time_rate = if delivered == 0 {
            None
        } else {
            Some(on_time as f64 / delivered as f64)
        };

        let mut late_localities: Vec<LocalityCount> = late
            .into_iter()
            .map(|(locality, count)| LocalityCount { locality, count })
            .collect();
        // BTreeMap order breaks ties alphabetically; the sort is stable.
        late_localities.sort_by(|a, b| b.count.cmp(&a.count));
        late_localities.truncate(TOP_LATE_LOCALITIES);

        Self {
            total,
            delivered,
            pending: total - delivered,
            categories: category_counts(&by_category),
            on_time_rate,
            alerts: AlertKind::ALL
                .into_iter()
                .map(|kind| AlertCount {
                    kind,
                    count: by_alert.get(&kind).copied().unwrap_or(0),
                })
                .collect(),
            rows_with_alerts,
            late_localities,
            products: products
                .into_iter()
                .map(|(product, counts)| ProductBreakdown {
                    total: counts.values().sum(),
                    categories: category_counts(&counts),
                    product,
                })
                .collect(),
        }
    }

    pub fn count(&self, category: ComplianceCategory) -> usize {
        self.categories
            .iter()
            .find(|entry| entry.category == category)
            .map_or(0, |entry| entry.count)
    }

    pub fn alert_count(&self, kind: AlertKind) -> usize {
        self.alerts
            .iter()
            .find(|entry| entry.kind == kind)
            .map_or(0, |entry| entry.count)
    }

    /// Share of `count` in the total, as a percentage.
    pub fn percent_of_total(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.total as f64
        }
    }
}
