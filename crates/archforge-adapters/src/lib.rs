//! Infrastructure adapters for archforge.
//!
//! This crate implements the ports defined in `archforge_core::application::ports`.
//! It owns every file-system access and the templates that ship with the tool.

pub mod cache;
pub mod filesystem;
pub mod metadata;
pub mod project_config;
pub mod renderer;
pub mod templates;

// Re-export commonly used adapters
pub use cache::TemplateCache;
pub use filesystem::{LocalFileStore, MemoryFileStore};
pub use metadata::{AdapterLookup, FrameworkAwareLookup, LegacyFlatLookup, YamlMetadataSource};
pub use project_config::YamlProjectConfigStore;
pub use renderer::TemplateRenderer;
pub use templates::{BuiltinTemplates, DirectoryTemplates, TemplateSource, TemplateSources};
