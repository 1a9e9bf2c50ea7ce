use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use csv::ReaderBuilder;

use leadtime_model::{HolidayCalendar, LeadTimePolicy, ZoneTable};

use crate::error::StandardsError;
use crate::manifest::Manifest;
use crate::paths::{default_standards_root, manifest_path};

const ZONE_COLUMN: &str = "Localidad";
const HOLIDAY_DATE_COLUMN: &str = "Fecha";
const HOLIDAY_NAME_COLUMN: &str = "Nombre";

/// Load the policy shipped under the default standards root.
pub fn load_default_policy() -> Result<LeadTimePolicy, StandardsError> {
    load_policy(&default_standards_root())
}

/// Load `leadtime.toml` and the files it references from `root`.
pub fn load_policy(root: &Path) -> Result<LeadTimePolicy, StandardsError> {
    let manifest = load_manifest(&manifest_path(root))?;
    let zones = load_zone_table(&root.join(&manifest.files.zones))?;
    let mut calendar = HolidayCalendar::new();
    for relative in &manifest.files.holidays {
        load_holidays_into(&root.join(relative), &mut calendar)?;
    }
    let policy = LeadTimePolicy::new(calendar, zones)
        .with_promise(manifest.promise)
        .with_alerts(manifest.alerts)
        .with_statuses(manifest.status);
    validate_policy(&policy)?;
    Ok(policy)
}

pub fn load_manifest(path: &Path) -> Result<Manifest, StandardsError> {
    let text = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    toml::from_str(&text).map_err(|source| StandardsError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

/// Read the AMBA locality list, preserving file order.
pub fn load_zone_table(path: &Path) -> Result<ZoneTable, StandardsError> {
    let rows = read_csv_rows(path)?;
    let mut names = Vec::with_capacity(rows.len());
    for row in &rows {
        let name = row.get(ZONE_COLUMN).ok_or_else(|| StandardsError::Csv {
            path: path.to_path_buf(),
            message: format!("missing column {ZONE_COLUMN}"),
        })?;
        names.push(name.as_str());
    }
    Ok(ZoneTable::new(names))
}

/// Add every holiday listed in `path` to `calendar`.
pub fn load_holidays_into(path: &Path, calendar: &mut HolidayCalendar) -> Result<(), StandardsError> {
    let rows = read_csv_rows(path)?;
    for (idx, row) in rows.iter().enumerate() {
        let raw = row
            .get(HOLIDAY_DATE_COLUMN)
            .ok_or_else(|| StandardsError::Csv {
                path: path.to_path_buf(),
                message: format!("missing column {HOLIDAY_DATE_COLUMN}"),
            })?;
        if raw.is_empty() {
            continue;
        }
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            StandardsError::InvalidDate {
                path: path.to_path_buf(),
                row: idx + 2,
                value: raw.clone(),
            }
        })?;
        let name = row.get(HOLIDAY_NAME_COLUMN).map_or("", String::as_str);
        calendar.insert(date, name);
    }
    Ok(())
}

fn validate_policy(policy: &LeadTimePolicy) -> Result<(), StandardsError> {
    if policy.promise.amba == 0 || policy.promise.interior == 0 {
        return Err(StandardsError::policy(
            "promised days must be at least 1 for every zone",
        ));
    }
    if policy.zones.is_empty() {
        return Err(StandardsError::policy("AMBA locality list is empty"));
    }
    let markers = [
        ("delivered", &policy.statuses.delivered),
        ("awaiting_pickup", &policy.statuses.awaiting_pickup),
        ("redispatched", &policy.statuses.redispatched),
    ];
    for (name, list) in markers {
        if list.is_empty() {
            return Err(StandardsError::policy(format!(
                "status marker list `{name}` is empty"
            )));
        }
    }
    Ok(())
}

fn read_csv_rows(path: &Path) -> Result<Vec<BTreeMap<String, String>>, StandardsError> {
    let file = std::fs::File::open(path).map_err(|e| StandardsError::io(path, e))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);
    let headers = reader
        .headers()
        .map_err(|e| StandardsError::csv(path, &e))?
        .clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| StandardsError::csv(path, &e))?;
        let mut row = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            let key = headers
                .get(idx)
                .unwrap_or("")
                .trim()
                .trim_matches('\u{feff}')
                .to_string();
            row.insert(key, value.trim().to_string());
        }
        rows.push(row);
    }
    Ok(rows)
}
