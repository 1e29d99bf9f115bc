use std::path::{Path, PathBuf};

use anyhow::Context;
use sbk_config::{PROJECT_DIR, SiteConfig};
use sbk_db::service::SiteService;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct InitResponse {
    root: PathBuf,
    config: PathBuf,
    config_written: bool,
    database: PathBuf,
}

/// Handle `sbk init`.
pub async fn handle(args: &InitArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let root = match &flags.root {
        Some(root) => PathBuf::from(root),
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let response = init_site(&root, args.force).await?;
    output(&response, flags.format)
}

async fn init_site(root: &Path, force: bool) -> anyhow::Result<InitResponse> {
    let project_dir = root.join(PROJECT_DIR);
    std::fs::create_dir_all(&project_dir)
        .with_context(|| format!("failed to create {}", project_dir.display()))?;

    let config_path = project_dir.join("config.toml");
    let config_written = force || !config_path.exists();
    if config_written {
        std::fs::write(&config_path, SiteConfig::starter_toml())
            .with_context(|| format!("failed to write {}", config_path.display()))?;
    } else {
        tracing::info!(path = %config_path.display(), "keeping existing config");
    }

    let config = SiteConfig::load_from(&project_dir)?;
    let database = config.database.resolve(&project_dir);
    SiteService::new_local(&database.to_string_lossy())
        .await
        .with_context(|| format!("failed to create database at {}", database.display()))?;

    Ok(InitResponse {
        root: root.to_path_buf(),
        config: config_path,
        config_written,
        database,
    })
}
