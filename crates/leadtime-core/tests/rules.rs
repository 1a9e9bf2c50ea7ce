//! Classification and alert rules on single records.

use chrono::{NaiveDate, NaiveDateTime};
use leadtime_core::{
    EvaluationContext, classify_compliance, classify_zone, critical_overdue, enrich_record,
    remaining_days,
};
use leadtime_model::{
    ComplianceCategory, HolidayCalendar, HomeDelivery, LeadTimePolicy, RemainingDays,
    ShipmentRecord, StatusMarkers, Zone, ZoneTable,
};

fn at(y: i32, m: u32, d: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(y, m, d).and_then(|date| date.and_hms_opt(10, 0, 0))
}

fn policy() -> LeadTimePolicy {
    let holidays = [(1, 1), (3, 3), (3, 24), (4, 2), (4, 17), (4, 18), (5, 1), (6, 20)]
        .into_iter()
        .filter_map(|(m, d)| NaiveDate::from_ymd_opt(2025, m, d));
    LeadTimePolicy::new(
        HolidayCalendar::from_dates(holidays),
        ZoneTable::new(["CIUDAD AUTONOMA BUENOS AIRES", "PALERMO", "LA PLATA"]),
    )
}

fn ctx(now: Option<NaiveDateTime>) -> EvaluationContext {
    EvaluationContext::new(now.expect("valid instant"))
}

fn shipment(
    locality: &str,
    status: &str,
    home_delivery: HomeDelivery,
    created: Option<NaiveDateTime>,
    last: Option<NaiveDateTime>,
) -> ShipmentRecord {
    ShipmentRecord::new(0)
        .with_locality(locality)
        .with_status(status)
        .with_home_delivery(home_delivery)
        .with_created_at(created)
        .with_last_status_at(last)
}

#[test]
fn zone_examples() {
    let zones = policy().zones;
    assert_eq!(
        classify_zone(Some("CIUDAD AUTONOMA BUENOS AIRES - PALERMO"), &zones),
        Zone::Amba
    );
    assert_eq!(classify_zone(Some("CORDOBA CAPITAL"), &zones), Zone::Interior);
    assert_eq!(classify_zone(None, &zones), Zone::Interior);
}

#[test]
fn branch_pickup_counts_as_delivered() {
    let policy = policy();
    let now = ctx(at(2025, 1, 10));
    let on_time = shipment(
        "La Plata",
        "Esperando retiro en sucursal",
        HomeDelivery::No,
        at(2025, 1, 6),
        at(2025, 1, 7),
    );
    let enrichment = enrich_record(&on_time, &policy, &now);
    assert_eq!(enrichment.zone, Zone::Amba);
    assert_eq!(enrichment.promised_days, 3);
    assert_eq!(enrichment.lead_time, Some(2));
    assert_eq!(
        enrichment.status,
        StatusMarkers {
            awaiting_pickup: true,
            ..StatusMarkers::default()
        }
    );
    assert_eq!(enrichment.category, ComplianceCategory::DeliveredOnTime);
    assert_eq!(enrichment.remaining, RemainingDays::NotApplicable);

    let late = on_time.with_last_status_at(at(2025, 1, 9));
    let enrichment = enrich_record(&late, &policy, &now);
    assert_eq!(enrichment.lead_time, Some(4));
    assert_eq!(enrichment.category, ComplianceCategory::DeliveredLate);
}

#[test]
fn awaiting_pickup_with_home_delivery_is_pending() {
    let policy = policy();
    let record = shipment(
        "La Plata",
        "Esperando retiro en sucursal",
        HomeDelivery::Unspecified,
        at(2025, 1, 6),
        at(2025, 1, 7),
    );
    let enrichment = enrich_record(&record, &policy, &ctx(at(2025, 1, 7)));
    assert_eq!(enrichment.category, ComplianceCategory::PendingOnTime);
    assert_eq!(enrichment.remaining, RemainingDays::Remaining(1));
}

#[test]
fn interior_in_transit_categories() {
    let policy = policy();
    let now = ctx(at(2025, 1, 20));
    let base = |last| shipment("CORDOBA CAPITAL", "En camino", HomeDelivery::Yes, at(2025, 1, 6), last);

    let last_day = enrich_record(&base(at(2025, 1, 10)), &policy, &now);
    assert_eq!(last_day.lead_time, Some(5));
    assert_eq!(last_day.category, ComplianceCategory::PendingLastDay);
    assert_eq!(last_day.remaining, RemainingDays::DueToday);
    assert_eq!(last_day.remaining.to_string(), "Vence hoy");
    assert!(!last_day.alerts.critical_overdue);

    let late = enrich_record(&base(at(2025, 1, 13)), &policy, &now);
    assert_eq!(late.lead_time, Some(6));
    assert_eq!(late.category, ComplianceCategory::PendingLate);
    assert!(late.alerts.critical_overdue);

    let no_data = enrich_record(&base(None), &policy, &now);
    assert_eq!(no_data.lead_time, None);
    assert_eq!(no_data.category, ComplianceCategory::PendingNoData);
    assert!(!no_data.alerts.any());
}

#[test]
fn delivered_without_lead_time_has_no_data() {
    assert_eq!(
        classify_compliance(true, None, 3),
        ComplianceCategory::PendingNoData
    );
    assert_eq!(
        remaining_days(ComplianceCategory::PendingNoData, None, 3),
        RemainingDays::NotApplicable
    );
}

#[test]
fn out_of_order_timestamps_give_zero_lead_time() {
    let policy = policy();
    let record = shipment(
        "CORDOBA",
        "En camino",
        HomeDelivery::Yes,
        at(2025, 1, 9),
        at(2025, 1, 6),
    );
    let enrichment = enrich_record(&record, &policy, &ctx(at(2025, 1, 9)));
    assert_eq!(enrichment.lead_time, Some(0));
    assert_eq!(enrichment.category, ComplianceCategory::PendingOnTime);
    assert_eq!(enrichment.remaining, RemainingDays::Remaining(5));
}

#[test]
fn stuck_pickup_fires_at_fifteen_business_days() {
    let policy = policy();
    let record = shipment(
        "La Plata",
        "Esperando retiro",
        HomeDelivery::No,
        at(2025, 6, 2),
        at(2025, 6, 2),
    );
    let fourteen = enrich_record(&record, &policy, &ctx(at(2025, 6, 19)));
    assert!(!fourteen.alerts.suggest_return);
    let fifteen = enrich_record(&record, &policy, &ctx(at(2025, 6, 23)));
    assert!(fifteen.alerts.suggest_return);
    assert!(!fifteen.alerts.critical_overdue);
}

#[test]
fn stuck_pickup_requires_explicit_branch_pickup() {
    let policy = policy();
    let record = shipment(
        "La Plata",
        "Esperando retiro",
        HomeDelivery::Unspecified,
        at(2025, 6, 2),
        at(2025, 6, 2),
    );
    let enrichment = enrich_record(&record, &policy, &ctx(at(2025, 6, 30)));
    assert!(!enrichment.alerts.suggest_return);
}

#[test]
fn redispatch_fires_after_two_business_days() {
    let policy = policy();
    let record = shipment(
        "ROSARIO",
        "Redespachada",
        HomeDelivery::Yes,
        at(2025, 6, 2),
        at(2025, 6, 2),
    );
    let same_day = enrich_record(&record, &policy, &ctx(at(2025, 6, 2)));
    assert!(!same_day.alerts.redispatch_delayed);
    let next_day = enrich_record(&record, &policy, &ctx(at(2025, 6, 3)));
    assert!(next_day.alerts.redispatch_delayed);
    assert_eq!(next_day.alerts.tag(leadtime_model::AlertKind::RedispatchDelayed), "Redespacho demorado");
}

#[test]
fn overdue_alert_only_for_pending_late() {
    let policy = policy();
    let delivered_late = shipment(
        "ROSARIO",
        "Entregada",
        HomeDelivery::Yes,
        at(2025, 1, 6),
        at(2025, 1, 14),
    );
    let enrichment = enrich_record(&delivered_late, &policy, &ctx(at(2025, 1, 20)));
    assert_eq!(enrichment.lead_time, Some(7));
    assert_eq!(enrichment.category, ComplianceCategory::DeliveredLate);
    assert!(!enrichment.alerts.critical_overdue);
}

#[test]
fn overdue_alert_fires_for_pending_late_only() {
    for category in ComplianceCategory::ALL {
        assert_eq!(
            critical_overdue(category),
            category == ComplianceCategory::PendingLate,
            "{category}"
        );
    }
}

#[test]
fn redispatched_pickup_raises_both_alerts() {
    let policy = policy();
    let record = shipment(
        "La Plata",
        "Redespachada - Esperando retiro en sucursal",
        HomeDelivery::No,
        at(2025, 6, 3),
        at(2025, 6, 3),
    );
    let enrichment = enrich_record(&record, &policy, &ctx(at(2025, 7, 31)));
    assert!(enrichment.status.awaiting_pickup);
    assert!(enrichment.status.redispatched);
    assert!(enrichment.alerts.suggest_return);
    assert!(enrichment.alerts.redispatch_delayed);
    assert_eq!(enrichment.alerts.count(), 2);
}

#[test]
fn delivered_status_still_checks_redispatch() {
    let policy = policy();
    let record = shipment(
        "ROSARIO",
        "Entregada en agencia redespachada",
        HomeDelivery::Yes,
        at(2025, 6, 2),
        at(2025, 6, 3),
    );
    let enrichment = enrich_record(&record, &policy, &ctx(at(2025, 7, 31)));
    assert!(enrichment.status.delivered);
    assert_eq!(enrichment.category, ComplianceCategory::DeliveredOnTime);
    assert!(enrichment.alerts.redispatch_delayed);
}
