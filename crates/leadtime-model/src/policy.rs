//! Configuration data consumed by the lead-time engine.
//!
//! Everything the classification rules depend on besides the record itself
//! lives here: the holiday calendar, the AMBA locality list, the promise per
//! zone, alert thresholds and the status vocabulary. Values are loaded from the
//! `standards/` directory by `leadtime-standards`; the defaults below mirror
//! the shipped configuration for the parts that are not lists.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::zone::Zone;

/// Holidays per calendar year.
///
/// Years without an entry have no holidays: only weekends are excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    years: BTreeMap<i32, BTreeMap<NaiveDate, String>>,
}

impl HolidayCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a calendar from bare dates (names left empty).
    pub fn from_dates<I>(dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut calendar = Self::new();
        for date in dates {
            calendar.insert(date, "");
        }
        calendar
    }

    /// Register a holiday. Re-inserting a date keeps the first name.
    pub fn insert(&mut self, date: NaiveDate, name: impl Into<String>) {
        self.years
            .entry(date.year())
            .or_default()
            .entry(date)
            .or_insert_with(|| name.into());
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.years
            .get(&date.year())
            .is_some_and(|days| days.contains_key(&date))
    }

    pub fn holiday_name(&self, date: NaiveDate) -> Option<&str> {
        self.years
            .get(&date.year())
            .and_then(|days| days.get(&date))
            .map(String::as_str)
    }

    /// Whether any holiday is registered for `year`.
    pub fn covers(&self, year: i32) -> bool {
        self.years.get(&year).is_some_and(|days| !days.is_empty())
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }

    pub fn holidays_in(&self, year: i32) -> impl Iterator<Item = (NaiveDate, &str)> + '_ {
        self.years
            .get(&year)
            .into_iter()
            .flat_map(|days| days.iter().map(|(date, name)| (*date, name.as_str())))
    }

    pub fn len(&self) -> usize {
        self.years.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Upper-cased metropolitan locality names, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneTable {
    amba: Vec<String>,
}

impl ZoneTable {
    /// Blank entries are dropped and duplicates keep their first position.
    pub fn new<I, S>(localities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut amba: Vec<String> = Vec::new();
        for name in localities {
            let upper = name.as_ref().trim().to_uppercase();
            if upper.is_empty() || amba.contains(&upper) {
                continue;
            }
            amba.push(upper);
        }
        Self { amba }
    }

    pub fn amba_localities(&self) -> &[String] {
        &self.amba
    }

    pub fn len(&self) -> usize {
        self.amba.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amba.is_empty()
    }
}

/// Promised business days per zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromisePolicy {
    pub amba: u32,
    pub interior: u32,
}

impl Default for PromisePolicy {
    fn default() -> Self {
        Self {
            amba: 3,
            interior: 5,
        }
    }
}

impl PromisePolicy {
    pub fn days_for(&self, zone: Zone) -> u32 {
        match zone {
            Zone::Amba => self.amba,
            Zone::Interior => self.interior,
        }
    }
}

/// Business-day thresholds for the time-based alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertThresholds {
    /// Days waiting for pickup before suggesting a return to sender.
    pub pickup_stuck_business_days: u32,
    /// Days in redispatch before flagging it (2 business days ~ 48 business hours).
    pub redispatch_business_days: u32,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            pickup_stuck_business_days: 15,
            redispatch_business_days: 2,
        }
    }
}

/// Lower-case substrings that identify each recognized status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusVocabulary {
    pub delivered: Vec<String>,
    pub awaiting_pickup: Vec<String>,
    pub redispatched: Vec<String>,
}

impl Default for StatusVocabulary {
    fn default() -> Self {
        Self {
            delivered: vec!["entregada".to_string()],
            awaiting_pickup: vec!["esperando retiro".to_string()],
            redispatched: vec!["redespachada".to_string()],
        }
    }
}

impl StatusVocabulary {
    /// Lower-case and trim every marker, dropping blanks.
    pub fn normalized(self) -> Self {
        fn clean(markers: Vec<String>) -> Vec<String> {
            markers
                .into_iter()
                .map(|marker| marker.trim().to_lowercase())
                .filter(|marker| !marker.is_empty())
                .collect()
        }
        Self {
            delivered: clean(self.delivered),
            awaiting_pickup: clean(self.awaiting_pickup),
            redispatched: clean(self.redispatched),
        }
    }
}

/// Complete configuration for one enrichment run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadTimePolicy {
    pub calendar: HolidayCalendar,
    pub zones: ZoneTable,
    pub promise: PromisePolicy,
    pub alerts: AlertThresholds,
    pub statuses: StatusVocabulary,
}

impl LeadTimePolicy {
    pub fn new(calendar: HolidayCalendar, zones: ZoneTable) -> Self {
        Self {
            calendar,
            zones,
            promise: PromisePolicy::default(),
            alerts: AlertThresholds::default(),
            statuses: StatusVocabulary::default(),
        }
    }

    #[must_use]
    pub fn with_promise(mut self, promise: PromisePolicy) -> Self {
        self.promise = promise;
        self
    }

    #[must_use]
    pub fn with_alerts(mut self, alerts: AlertThresholds) -> Self {
        self.alerts = alerts;
        self
    }

    #[must_use]
    pub fn with_statuses(mut self, statuses: StatusVocabulary) -> Self {
        self.statuses = statuses.normalized();
        self
    }
}
