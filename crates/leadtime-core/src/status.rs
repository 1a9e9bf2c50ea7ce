use leadtime_model::{StatusMarkers, StatusVocabulary};

/// Recognize every marker in the carrier's free-text status.
///
/// Each marker is a case-insensitive substring test of its own; a text may
/// carry any combination of them.
pub fn classify_status(status: &str, vocabulary: &StatusVocabulary) -> StatusMarkers {
    let lower = status.to_lowercase();
    let hit = |markers: &[String]| markers.iter().any(|marker| lower.contains(marker.as_str()));
    StatusMarkers {
        delivered: hit(&vocabulary.delivered),
        awaiting_pickup: hit(&vocabulary.awaiting_pickup),
        redispatched: hit(&vocabulary.redispatched),
    }
}
