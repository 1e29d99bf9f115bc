//! Integration tests for layered configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var and cwd manipulation.

use std::path::Path;

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use sbk_config::{ConfigError, SiteConfig};

#[test]
fn loads_full_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "/data/site.db"

[engine]
parallel = false
max_timeline_entries = 1000
max_wall_clock_ms = 500

[rates]
catalog_path = "rates.toml"

[general]
default_limit = 50
"#,
        )?;

        let config: SiteConfig = Figment::from(Serialized::defaults(SiteConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.path, "/data/site.db");
        assert!(!config.engine.parallel);
        assert_eq!(config.engine.max_timeline_entries, 1000);
        assert_eq!(config.engine.max_wall_clock_ms, 500);
        assert_eq!(config.rates.catalog_path, "rates.toml");
        assert_eq!(config.general.default_limit, 50);
        Ok(())
    });
}

#[test]
fn partial_section_keeps_other_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[engine]\nparallel = false\n")?;

        let config: SiteConfig = Figment::from(Serialized::defaults(SiteConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(!config.engine.parallel);
        assert_eq!(config.engine.max_timeline_entries, 250_000);
        assert_eq!(config.database.path, "sitebook.db");
        Ok(())
    });
}

#[test]
fn env_var_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[engine]\nmax_wall_clock_ms = 500\n")?;
        jail.set_env("SITEBOOK_ENGINE__MAX_WALL_CLOCK_MS", "9000");

        let config: SiteConfig = Figment::from(Serialized::defaults(SiteConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("SITEBOOK_").split("__"))
            .extract()?;

        assert_eq!(config.engine.max_wall_clock_ms, 9000);
        Ok(())
    });
}

#[test]
fn typo_env_var_silently_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("SITEBOOK_ENGINE__PARALEL", "false");

        let config: SiteConfig = Figment::from(Serialized::defaults(SiteConfig::default()))
            .merge(Env::prefixed("SITEBOOK_").split("__"))
            .extract()?;

        assert!(config.engine.parallel);
        Ok(())
    });
}

#[test]
fn project_layer_beats_user_layer() {
    Jail::expect_with(|jail| {
        let root = jail.directory().to_path_buf();
        jail.set_env("XDG_CONFIG_HOME", root.join("xdg").display());
        jail.create_dir("xdg/sitebook")?;
        jail.create_file(
            "xdg/sitebook/config.toml",
            "[general]\ndefault_limit = 7\n\n[rates]\ncatalog_path = \"user-rates.toml\"\n",
        )?;
        jail.create_dir(".sitebook")?;
        jail.create_file(".sitebook/config.toml", "[general]\ndefault_limit = 9\n")?;

        let config = SiteConfig::load_from(Path::new(".sitebook")).expect("config loads");

        assert_eq!(config.general.default_limit, 9);
        assert_eq!(config.rates.catalog_path, "user-rates.toml");
        Ok(())
    });
}

#[test]
fn env_beats_every_file_layer() {
    Jail::expect_with(|jail| {
        jail.create_dir(".sitebook")?;
        jail.create_file(".sitebook/config.toml", "[database]\npath = \"file.db\"\n")?;
        jail.set_env("SITEBOOK_DATABASE__PATH", ":memory:");

        let config = SiteConfig::load().expect("config loads");

        assert!(config.database.is_in_memory());
        Ok(())
    });
}

#[test]
fn invalid_budget_fails_to_load() {
    Jail::expect_with(|jail| {
        jail.set_env("SITEBOOK_ENGINE__MAX_TIMELINE_ENTRIES", "0");

        let err = SiteConfig::load_from(Path::new(".sitebook")).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}

#[test]
fn wrong_type_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_dir(".sitebook")?;
        jail.create_file(".sitebook/config.toml", "[engine]\nparallel = \"sometimes\"\n")?;

        let err = SiteConfig::load().unwrap_err();

        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
