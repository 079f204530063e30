//! `.archforge.yml` persistence.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use archforge_core::application::ApplicationError;
use archforge_core::application::ports::{FileStore, ProjectConfigStore};
use archforge_core::domain::ProjectConfig;
use archforge_core::error::ArchforgeResult;
use tracing::debug;

pub struct YamlProjectConfigStore {
    store: Arc<dyn FileStore>,
}

impl YamlProjectConfigStore {
    pub fn new(store: Arc<dyn FileStore>) -> Self {
        Self { store }
    }

    /// Closest directory at or above `start` that holds a project config.
    pub fn locate(&self, start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .find(|dir| self.store.exists(&dir.join(ProjectConfig::FILE_NAME)))
            .map(Path::to_path_buf)
    }
}

impl ProjectConfigStore for YamlProjectConfigStore {
    fn load(&self, root: &Path) -> ArchforgeResult<ProjectConfig> {
        let path = root.join(ProjectConfig::FILE_NAME);
        if !self.store.exists(&path) {
            return Err(ApplicationError::ProjectConfigMissing { path }.into());
        }
        let config = ProjectConfig::from_yaml(&self.store.read(&path)?)?;
        debug!(
            project = %config.name,
            architecture = %config.architecture,
            "Project configuration loaded"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::MemoryFileStore;
    use archforge_core::domain::{Framework, Paradigm};
    use archforge_core::error::ErrorCategory;

    const CONFIG: &str = "\
name: shop
baseNamespace: com.acme.shop
architecture: hexagonal-single
paradigm: reactive
framework: spring
toolVersion: 0.1.0
createdAt: 2026-01-05T10:00:00Z
dependencyOverrides:
  org.springframework.boot:spring-boot-starter-data-redis-reactive: 3.3.0
";

    fn store_with_config() -> Arc<MemoryFileStore> {
        let files = Arc::new(MemoryFileStore::new());
        files
            .write(Path::new("/w/shop/.archforge.yml"), CONFIG)
            .unwrap();
        files
    }

    #[test]
    fn loads_persisted_config() {
        let store = YamlProjectConfigStore::new(store_with_config());
        let config = store.load(Path::new("/w/shop")).unwrap();
        assert_eq!(config.paradigm, Paradigm::Reactive);
        assert_eq!(config.framework, Framework::Spring);
        assert!(!config.adapters_as_modules);
        assert_eq!(config.dependency_overrides.len(), 1);
    }

    #[test]
    fn missing_config_is_not_found() {
        let store = YamlProjectConfigStore::new(Arc::new(MemoryFileStore::new()));
        let err = store.load(Path::new("/w/shop")).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn locate_walks_up_from_a_subdirectory() {
        let store = YamlProjectConfigStore::new(store_with_config());
        assert_eq!(
            store.locate(Path::new("/w/shop/src/main/java")),
            Some(PathBuf::from("/w/shop"))
        );
        assert_eq!(store.locate(Path::new("/elsewhere")), None);
    }
}
