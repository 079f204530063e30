//! Driven (output) ports - implemented by infrastructure.
//!
//! Every port is `Send + Sync` and is shared as `Arc<dyn Port>` so a single
//! composition root can hand the same adapter to several services.

use std::path::{Path, PathBuf};

use crate::domain::{
    AdapterDescriptor, ArchitectureDescriptor, Framework, Paradigm, ProjectConfig, RenderContext,
};
use crate::error::ArchforgeResult;

/// Port for template rendering.
///
/// Implemented by:
/// - `archforge_adapters::renderer::TemplateRenderer` (`{{var}}` substitution
///   over layered template sources)
#[cfg_attr(test, mockall::automock)]
pub trait Renderer: Send + Sync {
    /// Render `template_id` with `context`.
    ///
    /// Fails with `TemplateNotFound` when no source has the template and with
    /// `TemplateInvalid` when it cannot be expanded.
    fn render(&self, template_id: &str, context: &RenderContext) -> ArchforgeResult<String>;

    /// Check that `template_id` exists and is well formed, without a context.
    fn check(&self, template_id: &str) -> ArchforgeResult<()>;
}

/// Port for file access.
///
/// Implemented by:
/// - `archforge_adapters::filesystem::LocalFileStore` (production)
/// - `archforge_adapters::filesystem::MemoryFileStore` (testing)
///
/// Paths are used as given; callers join them onto the project root.
#[cfg_attr(test, mockall::automock)]
pub trait FileStore: Send + Sync {
    fn read(&self, path: &Path) -> ArchforgeResult<String>;

    /// Replace the file atomically, creating parent directories.
    fn write(&self, path: &Path, content: &str) -> ArchforgeResult<()>;

    fn exists(&self, path: &Path) -> bool;

    /// Immediate children of a directory, sorted. Missing directory → empty.
    fn list(&self, dir: &Path) -> ArchforgeResult<Vec<PathBuf>>;

    fn mkdir(&self, path: &Path) -> ArchforgeResult<()>;

    /// Remove a file or a directory tree. Missing paths are not an error.
    fn remove(&self, path: &Path) -> ArchforgeResult<()>;
}

/// Coordinates of one adapter descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterQuery {
    /// Adapter technology id, e.g. `redis`.
    pub adapter: String,
    pub framework: Framework,
    pub paradigm: Paradigm,
    /// `driven` or `driving`.
    pub kind: String,
}

impl AdapterQuery {
    pub fn new(
        adapter: impl Into<String>,
        framework: Framework,
        paradigm: Paradigm,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            adapter: adapter.into(),
            framework,
            paradigm,
            kind: kind.into(),
        }
    }

    /// Directory name used for this kind in template trees.
    pub fn kind_dir(&self) -> &'static str {
        if self.kind == "driving" {
            "entry-points"
        } else {
            "driven-adapters"
        }
    }
}

/// Port for descriptor loading.
///
/// Implemented by:
/// - `archforge_adapters::metadata::YamlMetadataSource`
#[cfg_attr(test, mockall::automock)]
pub trait MetadataSource: Send + Sync {
    /// Parse `architectures/{id}/structure.yml`. Validation is the caller's job.
    fn load_architecture(&self, id: &str) -> ArchforgeResult<ArchitectureDescriptor>;

    fn load_adapter(&self, query: &AdapterQuery) -> ArchforgeResult<AdapterDescriptor>;

    /// Adapter ids available for a framework, paradigm and kind, sorted.
    fn adapter_names(&self, framework: Framework, paradigm: Paradigm, kind: &str) -> Vec<String>;
}

/// Port for the persisted project configuration.
///
/// Implemented by:
/// - `archforge_adapters::project_config::YamlProjectConfigStore`
pub trait ProjectConfigStore: Send + Sync {
    /// Fails with `ProjectConfigMissing` when the project has no config file.
    fn load(&self, root: &Path) -> ArchforgeResult<ProjectConfig>;
}
