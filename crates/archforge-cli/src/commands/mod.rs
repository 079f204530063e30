//! Command handlers plus the composition root they share.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use archforge_adapters::{
    BuiltinTemplates, DirectoryTemplates, LocalFileStore, TemplateCache, TemplateRenderer,
    TemplateSources, YamlMetadataSource, YamlProjectConfigStore,
};
use archforge_core::application::ports::{FileStore, MetadataSource, ProjectConfigStore, Renderer};
use archforge_core::application::{GenerationOrchestrator, TemplateValidationService};
use archforge_core::domain::ProjectConfig;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

pub mod cache;
pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod validate;

/// Adapters wired together for one invocation.
pub struct Services {
    pub metadata: Arc<dyn MetadataSource>,
    pub renderer: Arc<dyn Renderer>,
    pub store: Arc<dyn FileStore>,
    pub backup_dir: PathBuf,
}

impl Services {
    /// Template lookup order: configured local directory, then the cache,
    /// then the templates compiled into the binary.
    pub fn build(config: &AppConfig) -> Self {
        let mut sources = TemplateSources::new();
        if let Some(dir) = &config.templates.local_dir {
            sources = sources.with(DirectoryTemplates::new(dir));
        }
        if let Some(cached) = TemplateCache::new(config.cache_dir()).source() {
            sources = sources.with(cached);
        }
        let sources = sources.with(BuiltinTemplates);
        debug!(sources = ?sources.describe(), "Template sources configured");

        Self {
            metadata: Arc::new(YamlMetadataSource::new(sources.clone())),
            renderer: Arc::new(TemplateRenderer::new(sources)),
            store: Arc::new(LocalFileStore::new()),
            backup_dir: config.backup.dir.clone(),
        }
    }

    pub fn orchestrator(&self) -> GenerationOrchestrator {
        GenerationOrchestrator::new(
            self.metadata.clone(),
            self.renderer.clone(),
            self.store.clone(),
            self.backup_dir.clone(),
        )
    }

    pub fn template_validation(&self) -> TemplateValidationService {
        TemplateValidationService::new(self.metadata.clone(), self.renderer.clone())
    }

    /// Project root at or above `start`, with its persisted configuration.
    pub fn find_project(&self, start: Option<&Path>) -> CliResult<(PathBuf, ProjectConfig)> {
        let start = match start {
            Some(dir) => absolute(dir)?,
            None => std::env::current_dir()?,
        };
        let configs = YamlProjectConfigStore::new(self.store.clone());
        let root = configs
            .locate(&start)
            .ok_or(CliError::ProjectNotFound { start })?;
        let config = configs.load(&root)?;
        Ok((root, config))
    }
}

pub(crate) fn absolute(path: &Path) -> CliResult<PathBuf> {
    Ok(std::path::absolute(path)?)
}

/// Parse a configured default, reporting a bad value as a config error.
pub(crate) fn config_value<T>(key: &str, value: &str) -> CliResult<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.parse().map_err(|e: T::Err| CliError::ConfigError {
        message: format!("invalid value '{value}' for {key}: {e}"),
        source: Some(Box::new(e)),
    })
}
