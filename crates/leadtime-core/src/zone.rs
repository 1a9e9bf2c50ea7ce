use leadtime_model::{Zone, ZoneTable};

/// First AMBA entry contained in the upper-cased locality text.
pub fn matching_amba_entry<'a>(locality: Option<&str>, zones: &'a ZoneTable) -> Option<&'a str> {
    let text = locality?.trim();
    if text.is_empty() {
        return None;
    }
    let upper = text.to_uppercase();
    zones
        .amba_localities()
        .iter()
        .find(|entry| upper.contains(entry.as_str()))
        .map(String::as_str)
}

/// AMBA when any configured locality is a substring of the text, else INTERIOR.
///
/// Missing or blank text is INTERIOR.
pub fn classify_zone(locality: Option<&str>, zones: &ZoneTable) -> Zone {
    if matching_amba_entry(locality, zones).is_some() {
        Zone::Amba
    } else {
        Zone::Interior
    }
}
