#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

use leadtime_model::{AlertThresholds, PromisePolicy, StatusVocabulary};

/// Contents of `leadtime.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub manifest: Option<ManifestHeader>,
    pub files: ManifestFiles,
    #[serde(default)]
    pub promise: PromisePolicy,
    #[serde(default)]
    pub alerts: AlertThresholds,
    #[serde(default)]
    pub status: StatusVocabulary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestHeader {
    pub schema: String,
    pub schema_version: u32,
}

/// Data files, relative to the standards root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestFiles {
    pub zones: String,
    #[serde(default)]
    pub holidays: Vec<String>,
}
