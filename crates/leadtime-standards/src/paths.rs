//! Standards directory path resolution.

use std::path::{Path, PathBuf};

/// Environment variable for overriding the standards directory.
pub const STANDARDS_ENV_VAR: &str = "LEADTIME_STANDARDS_DIR";

/// Policy manifest file name inside the standards root.
pub const MANIFEST_FILE: &str = "leadtime.toml";

/// Get the standards root directory.
///
/// Resolution order:
/// 1. `LEADTIME_STANDARDS_DIR` environment variable
/// 2. `standards/` directory relative to workspace root
pub fn default_standards_root() -> PathBuf {
    if let Ok(root) = std::env::var(STANDARDS_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards")
}

/// An explicit directory wins over the default resolution.
pub fn resolve_standards_root(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(default_standards_root, Path::to_path_buf)
}

pub fn manifest_path(root: &Path) -> PathBuf {
    root.join(MANIFEST_FILE)
}
