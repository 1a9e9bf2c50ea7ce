use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Coarse delivery zone of a destination.
///
/// AMBA is the Buenos Aires metropolitan area; everything else is INTERIOR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Zone {
    Amba,
    Interior,
}

impl Zone {
    pub const ALL: [Zone; 2] = [Zone::Amba, Zone::Interior];

    pub fn as_str(self) -> &'static str {
        match self {
            Zone::Amba => "AMBA",
            Zone::Interior => "INTERIOR",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Zone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AMBA" => Ok(Zone::Amba),
            "INTERIOR" => Ok(Zone::Interior),
            other => Err(format!("unknown zone: {other}")),
        }
    }
}
