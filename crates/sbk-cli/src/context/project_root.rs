use std::path::{Path, PathBuf};

use anyhow::Context;
use sbk_config::PROJECT_DIR;

/// Walk upwards from `start` until a `.sitebook` directory is found.
#[must_use]
pub fn find_site_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(PROJECT_DIR).is_dir() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// The directory holding `.sitebook/`, from `--root` or auto-detection.
pub fn resolve_site_root(explicit: Option<&str>) -> anyhow::Result<PathBuf> {
    if let Some(path) = explicit {
        let explicit = PathBuf::from(path);
        if explicit.file_name().and_then(|name| name.to_str()) == Some(PROJECT_DIR) {
            return explicit
                .parent()
                .map(Path::to_path_buf)
                .context("invalid --root path: '.sitebook' directory has no parent");
        }
        if explicit.join(PROJECT_DIR).is_dir() {
            return Ok(explicit);
        }
        anyhow::bail!(
            "invalid --root '{}': no .sitebook directory. Run 'sbk init' there first.",
            explicit.display()
        );
    }

    let start = std::env::current_dir().context("failed to read current directory")?;
    find_site_root(&start)
        .context("not a sitebook site (no .sitebook directory found). Run 'sbk init' first.")
}
