use serde::{Deserialize, Serialize};

/// Markers recognized in a free-text carrier status.
///
/// Status text is scanned once per record. Each marker is an independent flag,
/// so "Redespachada - Esperando retiro" carries both `redispatched` and
/// `awaiting_pickup`, and every rule downstream reads only its own flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusMarkers {
    /// The carrier reports the package as delivered ("entregada").
    pub delivered: bool,
    /// Waiting at a branch for the recipient to pick it up ("esperando retiro").
    pub awaiting_pickup: bool,
    /// Forwarded to another agency ("redespachada").
    pub redispatched: bool,
}

impl StatusMarkers {
    pub const DELIVERED: &'static str = "delivered";
    pub const AWAITING_PICKUP: &'static str = "awaiting_pickup";
    pub const REDISPATCHED: &'static str = "redispatched";

    pub fn is_empty(self) -> bool {
        !(self.delivered || self.awaiting_pickup || self.redispatched)
    }

    /// Names of the markers present, in a fixed order.
    pub fn labels(self) -> Vec<&'static str> {
        [
            (self.delivered, Self::DELIVERED),
            (self.awaiting_pickup, Self::AWAITING_PICKUP),
            (self.redispatched, Self::REDISPATCHED),
        ]
        .into_iter()
        .filter_map(|(present, label)| present.then_some(label))
        .collect()
    }
}
