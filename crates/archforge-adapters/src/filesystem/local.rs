//! Local file store backed by `std::fs`.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use archforge_core::application::ApplicationError;
use archforge_core::application::ports::FileStore;
use archforge_core::error::{ArchforgeError, ArchforgeResult};
use tempfile::NamedTempFile;

/// Production store. Writes go to a temporary sibling that is renamed over
/// the target, so a reader never sees a half-written file.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileStore;

impl LocalFileStore {
    pub fn new() -> Self {
        Self
    }
}

impl FileStore for LocalFileStore {
    fn read(&self, path: &Path) -> ArchforgeResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write(&self, path: &Path, content: &str) -> ArchforgeResult<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| map_io_error(parent, e, "create directory"))?;

        let mut tmp =
            NamedTempFile::new_in(parent).map_err(|e| map_io_error(path, e, "create temp file"))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| map_io_error(path, e, "write file"))?;
        tmp.persist(path)
            .map_err(|e| map_io_error(path, e.error, "replace file"))?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list(&self, dir: &Path) -> ArchforgeResult<Vec<PathBuf>> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(map_io_error(dir, e, "list directory")),
        };
        let mut children = Vec::new();
        for entry in entries {
            children.push(entry.map_err(|e| map_io_error(dir, e, "list directory"))?.path());
        }
        children.sort();
        Ok(children)
    }

    fn mkdir(&self, path: &Path) -> ArchforgeResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn remove(&self, path: &Path) -> ArchforgeResult<()> {
        let result = if path.is_dir() {
            std::fs::remove_dir_all(path)
        } else {
            std::fs::remove_file(path)
        };
        match result {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io_error(path, e, "remove")),
        }
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ArchforgeError {
    ApplicationError::FileStore {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_creates_parents_and_replaces_content() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("a/b/c.txt");
        let store = LocalFileStore::new();

        store.write(&target, "one").unwrap();
        store.write(&target, "two").unwrap();

        assert_eq!(store.read(&target).unwrap(), "two");
        // No temp files left next to the target.
        assert_eq!(store.list(&dir.path().join("a/b")).unwrap(), [target]);
    }

    #[test]
    fn list_of_missing_dir_is_empty_and_sorted_otherwise() {
        let dir = TempDir::new().unwrap();
        let store = LocalFileStore::new();
        assert!(store.list(&dir.path().join("nope")).unwrap().is_empty());

        store.write(&dir.path().join("b.txt"), "").unwrap();
        store.write(&dir.path().join("a.txt"), "").unwrap();
        let names: Vec<_> = store
            .list(dir.path())
            .unwrap()
            .into_iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.txt", "b.txt"]);
    }

    #[test]
    fn remove_is_idempotent_for_files_and_dirs() {
        let dir = TempDir::new().unwrap();
        let store = LocalFileStore::new();
        let nested = dir.path().join("x/y.txt");
        store.write(&nested, "y").unwrap();

        store.remove(&dir.path().join("x")).unwrap();
        assert!(!store.exists(&nested));
        store.remove(&dir.path().join("x")).unwrap();
    }

    #[test]
    fn read_of_missing_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let err = LocalFileStore::new()
            .read(&dir.path().join("missing"))
            .unwrap_err();
        assert_eq!(err.category(), archforge_core::error::ErrorCategory::Io);
    }
}
