//! # sbk-config
//!
//! Layered configuration loading for Sitebook using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SITEBOOK_*` prefix, `__` as separator)
//! 2. Project-level `.sitebook/config.toml`
//! 3. User-level `~/.config/sitebook/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SITEBOOK_ENGINE__PARALLEL` -> `engine.parallel`,
//! `SITEBOOK_RATES__CATALOG_PATH` -> `rates.catalog_path`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use sbk_config::SiteConfig;
//!
//! let config = SiteConfig::load_with_dotenv().expect("config");
//! if config.rates.has_overrides() {
//!     println!("rate overrides: {}", config.rates.catalog_path);
//! }
//! ```

mod database;
mod engine;
mod error;
mod general;
mod rates;

pub use database::DatabaseConfig;
pub use engine::EngineConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use rates::RatesConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project directory name, relative to the working directory.
pub const PROJECT_DIR: &str = ".sitebook";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub rates: RatesConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl SiteConfig {
    /// Load configuration from all sources with `.sitebook/` in the current
    /// directory as the project directory.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env`
    /// file loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(PROJECT_DIR))
    }

    /// Load configuration with `project_dir/config.toml` as the project layer.
    pub fn load_from(project_dir: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_for(project_dir).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain for the default project directory.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        Self::figment_for(Path::new(PROJECT_DIR))
    }

    /// Build the figment provider chain for `project_dir`.
    pub fn figment_for(project_dir: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = project_dir.join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("SITEBOOK_").split("__"))
    }

    /// Reject values no calculation could run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.max_timeline_entries == 0 {
            return Err(ConfigError::InvalidValue {
                field: "engine.max_timeline_entries".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.engine.max_wall_clock_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "engine.max_wall_clock_ms".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// A commented starter `config.toml` for `sbk init`.
    pub fn starter_toml() -> String {
        let defaults = Self::default();
        format!(
            "# Sitebook project configuration\n\
             \n\
             [database]\n\
             path = \"{}\"\n\
             \n\
             [engine]\n\
             parallel = {}\n\
             max_timeline_entries = {}\n\
             max_wall_clock_ms = {}\n\
             \n\
             [rates]\n\
             # TOML file with price overrides, relative to this directory\n\
             catalog_path = \"\"\n\
             \n\
             [general]\n\
             default_limit = {}\n",
            defaults.database.path,
            defaults.engine.parallel,
            defaults.engine.max_timeline_entries,
            defaults.engine.max_wall_clock_ms,
            defaults.general.default_limit,
        )
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sitebook").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir looking
    /// for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_is_valid() {
        let config = SiteConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.rates.has_overrides());
        assert_eq!(config.database.path, "sitebook.db");
    }

    #[test]
    fn figment_builds_without_files() {
        let config: SiteConfig = SiteConfig::figment_for(Path::new("/nonexistent/.sitebook"))
            .extract()
            .expect("should extract defaults");
        assert_eq!(config.general.default_limit, 20);
        assert_eq!(config.engine.max_timeline_entries, 250_000);
    }

    #[test]
    fn zero_entry_budget_is_rejected() {
        let mut config = SiteConfig::default();
        config.engine.max_timeline_entries = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("engine.max_timeline_entries"));
    }

    #[test]
    fn starter_toml_parses_back_to_defaults() {
        let config: SiteConfig = Figment::from(Toml::string(&SiteConfig::starter_toml()))
            .extract()
            .expect("starter config parses");
        assert!(config.engine.parallel);
        assert_eq!(config.engine.max_wall_clock_ms, 30_000);
        assert!(!config.rates.has_overrides());
    }
}
