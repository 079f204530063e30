//! In-memory `FileStore` used by service unit tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::application::ApplicationError;
use crate::application::ports::FileStore;
use crate::error::ArchforgeResult;

#[derive(Default)]
pub struct InMemoryStore {
    files: Mutex<BTreeMap<PathBuf, String>>,
    fail_on: Mutex<Option<String>>,
    fail_once: Mutex<Option<PathBuf>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, path: &str, content: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), content.to_string());
    }

    pub fn get(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(Path::new(path)).cloned()
    }

    /// Make every write whose path contains `needle` fail.
    pub fn fail_writes_containing(&self, needle: &str) {
        *self.fail_on.lock().unwrap() = Some(needle.to_string());
    }

    /// Make only the next write to exactly `path` fail.
    pub fn fail_next_write_to(&self, path: &str) {
        *self.fail_once.lock().unwrap() = Some(PathBuf::from(path));
    }

    pub fn paths_under(&self, prefix: &str) -> Vec<PathBuf> {
        self.files
            .lock()
            .unwrap()
            .keys()
            .filter(|p| p.starts_with(prefix))
            .cloned()
            .collect()
    }
}

impl FileStore for InMemoryStore {
    fn read(&self, path: &Path) -> ArchforgeResult<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| {
                ApplicationError::FileStore {
                    path: path.to_path_buf(),
                    reason: "not found".into(),
                }
                .into()
            })
    }

    fn write(&self, path: &Path, content: &str) -> ArchforgeResult<()> {
        {
            let mut once = self.fail_once.lock().unwrap();
            if once.as_deref() == Some(path) {
                *once = None;
                return Err(ApplicationError::FileStore {
                    path: path.to_path_buf(),
                    reason: "injected failure".into(),
                }
                .into());
            }
        }
        if let Some(needle) = self.fail_on.lock().unwrap().as_deref() {
            if path.to_string_lossy().contains(needle) {
                return Err(ApplicationError::FileStore {
                    path: path.to_path_buf(),
                    reason: "injected failure".into(),
                }
                .into());
            }
        }
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files
            .lock()
            .unwrap()
            .keys()
            .any(|p| p.starts_with(path))
    }

    fn list(&self, dir: &Path) -> ArchforgeResult<Vec<PathBuf>> {
        let mut children: Vec<PathBuf> = self
            .files
            .lock()
            .unwrap()
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
        self.files.lock().unwrap().retain(|p, _| !p.starts_with(path));
        Ok(())
    }
}
