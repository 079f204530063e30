//! In-memory file store for tests and dry runs.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use archforge_core::application::ApplicationError;
use archforge_core::application::ports::FileStore;
use archforge_core::error::ArchforgeResult;

/// Files keyed by path. Directories exist implicitly while they hold a file.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileStore {
    inner: Arc<RwLock<BTreeMap<PathBuf, String>>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored file, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut files) = self.inner.write() {
            files.clear();
        }
    }
}

fn poisoned(path: &Path) -> ApplicationError {
    ApplicationError::FileStore {
        path: path.to_path_buf(),
        reason: "store lock poisoned".into(),
    }
}

impl FileStore for MemoryFileStore {
    fn read(&self, path: &Path) -> ArchforgeResult<String> {
        let files = self.inner.read().map_err(|_| poisoned(path))?;
        files.get(path).cloned().ok_or_else(|| {
            ApplicationError::FileStore {
                path: path.to_path_buf(),
                reason: "no such file".into(),
            }
            .into()
        })
    }

    fn write(&self, path: &Path, content: &str) -> ArchforgeResult<()> {
        let mut files = self.inner.write().map_err(|_| poisoned(path))?;
        files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|files| files.keys().any(|p| p.starts_with(path)))
            .unwrap_or(false)
    }

    fn list(&self, dir: &Path) -> ArchforgeResult<Vec<PathBuf>> {
        let files = self.inner.read().map_err(|_| poisoned(dir))?;
        let mut children: Vec<PathBuf> = files
            .keys()
            .filter_map(|p| {
                let rest = p.strip_prefix(dir).ok()?;
                rest.components().next().map(|c| dir.join(c))
            })
            .collect();
        children.dedup();
        Ok(children)
    }

    fn mkdir(&self, _path: &Path) -> ArchforgeResult<()> {
        Ok(())
    }

    fn remove(&self, path: &Path) -> ArchforgeResult<()> {
        let mut files = self.inner.write().map_err(|_| poisoned(path))?;
        files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_are_implied_by_their_files() {
        let store = MemoryFileStore::new();
        store.write(Path::new("/p/src/A.java"), "a").unwrap();
        store.write(Path::new("/p/src/B.java"), "b").unwrap();
        store.write(Path::new("/p/README.md"), "r").unwrap();

        assert!(store.exists(Path::new("/p/src")));
        assert_eq!(
            store.list(Path::new("/p")).unwrap(),
            [PathBuf::from("/p/README.md"), PathBuf::from("/p/src")]
        );

        store.remove(Path::new("/p/src")).unwrap();
        assert_eq!(store.files(), [PathBuf::from("/p/README.md")]);
    }
}
