//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `CRADLE_` prefix, `__` between sections
//!    (`CRADLE_DEFAULTS__LANG=js`, `CRADLE_ENRICHMENT__PROGRAM=pnpm`)
//! 3. `--config FILE`, or else `.cradle.toml` in the current directory
//!    layered over the per-user config file
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// File name of a project-local configuration.
pub const LOCAL_CONFIG_FILE: &str = ".cradle.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for `cradle new --lib`.
    pub defaults: Defaults,
    /// The package-initialisation tool.
    pub enrichment: EnrichmentConfig,
    /// Template settings.
    pub templates: TemplateConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub lang: String,
    pub module: String,
    /// CI provider tag, or `none`.
    pub ci: String,
    /// Binary cache policy, or `none`.
    pub cache: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Program run as `<program> init [--yes]`.
    pub program: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory whose `.hbs` files override the built-in templates.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            lang: "ts".into(),
            module: "esm".into(),
            ci: "github".into(),
            cache: "npm".into(),
        }
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            program: "npm".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, files and the environment.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&Self::default()).context("Failed to seed default configuration")?,
        );

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path.as_path()).required(true)),
            None => builder
                .add_source(File::from(Self::config_path().as_path()).required(false))
                .add_source(File::from(Path::new(LOCAL_CONFIG_FILE)).required(false)),
        };

        builder
            .add_source(
                Environment::with_prefix("CRADLE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the per-user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.cradle.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "cradle", "cradle")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Look up a dotted key such as `defaults.lang`.
    ///
    /// Returns `None` for unknown keys and for whole sections.
    pub fn get(&self, key: &str) -> Option<String> {
        let tree = serde_json::to_value(self).ok()?;
        let value = key
            .split('.')
            .try_fold(&tree, |node, part| node.get(part))?;

        match value {
            serde_json::Value::Object(_) => None,
            serde_json::Value::Null => Some(String::new()),
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn defaults_match_create_flags() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.lang, "ts");
        assert_eq!(cfg.defaults.ci, "github");
        assert_eq!(cfg.enrichment.program, "npm");
        assert!(cfg.templates.dir.is_none());
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cradle.toml");
        fs::write(&path, "[defaults]\nlang = \"js\"\n\n[enrichment]\nprogram = \"pnpm\"\n").unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.defaults.lang, "js");
        assert_eq!(cfg.defaults.module, "esm");
        assert_eq!(cfg.enrichment.program, "pnpm");
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn get_reads_dotted_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("defaults.cache").as_deref(), Some("npm"));
        assert_eq!(cfg.get("output.no_color").as_deref(), Some("false"));
        assert_eq!(cfg.get("templates.dir").as_deref(), Some(""));
        assert_eq!(cfg.get("defaults"), None);
        assert_eq!(cfg.get("does.not.exist"), None);
    }

    #[test]
    fn round_trips_through_toml() {
        let cfg = AppConfig::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        assert!(text.contains("[defaults]"));
        assert_eq!(toml::from_str::<AppConfig>(&text).unwrap(), cfg);
    }
}
