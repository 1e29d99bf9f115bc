//! Rate catalog source.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RatesConfig {
    /// TOML file with price overrides applied on top of the built-in
    /// catalog. Empty means built-in prices only.
    #[serde(default)]
    pub catalog_path: String,
}

impl RatesConfig {
    pub fn has_overrides(&self) -> bool {
        !self.catalog_path.trim().is_empty()
    }

    /// Override file path, relative paths resolved against `project_dir`.
    pub fn resolve(&self, project_dir: &Path) -> Option<PathBuf> {
        if !self.has_overrides() {
            return None;
        }
        let path = Path::new(self.catalog_path.trim());
        Some(if path.is_absolute() {
            path.to_path_buf()
        } else {
            project_dir.join(path)
        })
    }
}
