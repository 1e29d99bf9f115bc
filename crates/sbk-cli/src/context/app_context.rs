use std::path::PathBuf;

use anyhow::Context;
use sbk_config::{PROJECT_DIR, SiteConfig};
use sbk_db::service::SiteService;
use sbk_engine::{ComputeBudget, CostEngine, EngineOptions, RateCatalog};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: SiteService,
    pub engine: CostEngine,
    pub config: SiteConfig,
}

impl AppContext {
    /// Load configuration, open the database and build the cost engine for
    /// the site rooted at `site_root`.
    pub async fn init(site_root: PathBuf) -> anyhow::Result<Self> {
        let project_dir = site_root.join(PROJECT_DIR);
        let config = SiteConfig::load_from(&project_dir).context("failed to load configuration")?;

        let engine = build_engine(&config, &project_dir)?;

        let db_path = config.database.resolve(&project_dir);
        let service = SiteService::new_local(&db_path.to_string_lossy())
            .await
            .with_context(|| format!("failed to open database at {}", db_path.display()))?;

        tracing::debug!(
            root = %site_root.display(),
            db = %db_path.display(),
            parallel = config.engine.parallel,
            "application context ready"
        );

        Ok(Self {
            service,
            engine,
            config,
        })
    }
}

/// The engine a configuration describes: built-in rates plus any override
/// file, under the configured compute budget.
pub fn build_engine(
    config: &SiteConfig,
    project_dir: &std::path::Path,
) -> anyhow::Result<CostEngine> {
    let catalog = match config.rates.resolve(project_dir) {
        Some(path) => RateCatalog::builtin_with_overrides(&path)
            .with_context(|| format!("failed to load rate overrides from {}", path.display()))?,
        None => RateCatalog::builtin(),
    };

    let options = EngineOptions {
        parallel: config.engine.parallel,
        budget: ComputeBudget {
            max_timeline_entries: config.engine.max_timeline_entries,
            max_wall_clock: config.engine.max_wall_clock(),
        },
    };
    Ok(CostEngine::new(catalog, options))
}
