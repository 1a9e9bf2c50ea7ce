#![deny(unsafe_code)]

pub mod error;
pub mod loaders;
pub mod manifest;
pub mod paths;

pub use crate::error::StandardsError;
pub use crate::loaders::{
    load_default_policy, load_holidays_into, load_manifest, load_policy, load_zone_table,
};
pub use crate::manifest::Manifest;
pub use crate::paths::{
    MANIFEST_FILE, STANDARDS_ENV_VAR, default_standards_root, resolve_standards_root,
};
