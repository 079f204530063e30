//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `ARCHFORGE_*` environment variables, `__` between section and key
//!    (`ARCHFORGE_BACKUP__DIR=.snapshots`)
//! 3. TOML config file (`--config`, or the platform config dir)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use archforge_core::application::DEFAULT_BACKUP_DIR;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Values used when `init` flags are omitted.
    pub defaults: Defaults,
    pub templates: TemplateConfig,
    pub backup: BackupConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub architecture: String,
    pub paradigm: String,
    pub framework: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory whose templates take precedence over the built-in ones.
    pub local_dir: Option<PathBuf>,
    /// Cache location; the platform cache dir when unset.
    pub cache_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    /// Relative to the project root.
    pub dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub color: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            architecture: "hexagonal-single".into(),
            paradigm: "reactive".into(),
            framework: "spring".into(),
        }
    }
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_BACKUP_DIR),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults::default(),
            templates: TemplateConfig::default(),
            backup: BackupConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// A file passed with `--config` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };

        let defaults = Config::try_from(&Self::default()).map_err(config_error)?;
        let config = Config::builder()
            .add_source(defaults)
            .add_source(File::from(path.as_path()).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix("ARCHFORGE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_error)?;

        config.try_deserialize().map_err(config_error)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs`, falling back to `.archforge.toml` in
    /// the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "archforge", "archforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".archforge.toml"))
    }

    /// Template cache directory, defaulting to the platform cache dir.
    pub fn cache_dir(&self) -> PathBuf {
        self.templates.cache_dir.clone().unwrap_or_else(|| {
            directories::ProjectDirs::from("dev", "archforge", "archforge")
                .map(|d| d.cache_dir().join("templates"))
                .unwrap_or_else(|| Path::new(".archforge").join("cache"))
        })
    }

    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

fn config_error(e: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}
