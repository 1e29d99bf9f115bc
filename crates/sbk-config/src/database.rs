//! Local libSQL database location.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "sitebook.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database file. Relative paths resolve against the project directory;
    /// `:memory:` opens a throwaway database.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }

    /// The database file path for a project rooted at `project_dir`.
    pub fn resolve(&self, project_dir: &Path) -> PathBuf {
        let path = Path::new(&self.path);
        if self.is_in_memory() || path.is_absolute() {
            path.to_path_buf()
        } else {
            project_dir.join(path)
        }
    }
}
