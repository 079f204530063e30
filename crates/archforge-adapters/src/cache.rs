//! Local copy of a template directory.
//!
//! `update` mirrors the configured template directory into the cache dir;
//! `clear` removes it. The composition root puts a populated cache after the
//! configured directory and before the built-in templates.

use std::io;
use std::path::{Path, PathBuf};

use archforge_core::application::ApplicationError;
use archforge_core::error::{ArchforgeError, ArchforgeResult};
use tracing::{info, instrument};
use walkdir::WalkDir;

use crate::templates::DirectoryTemplates;

#[derive(Debug, Clone)]
pub struct TemplateCache {
    dir: PathBuf,
}

impl TemplateCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_populated(&self) -> bool {
        std::fs::read_dir(&self.dir).is_ok_and(|mut entries| entries.next().is_some())
    }

    /// Source over the cached tree, if there is one.
    pub fn source(&self) -> Option<DirectoryTemplates> {
        self.is_populated()
            .then(|| DirectoryTemplates::new(&self.dir))
    }

    /// Remove the cache. Returns the number of files deleted.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn clear(&self) -> ArchforgeResult<usize> {
        if !self.dir.exists() {
            return Ok(0);
        }
        let files = count_files(&self.dir)?;
        match std::fs::remove_dir_all(&self.dir) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(io_error(&self.dir, e, "remove cache")),
        }
        info!(files, "Template cache cleared");
        Ok(files)
    }

    /// Replace the cache with a copy of `from`. Returns the number of files
    /// copied.
    #[instrument(skip(self), fields(dir = %self.dir.display(), from = %from.display()))]
    pub fn update(&self, from: &Path) -> ArchforgeResult<usize> {
        if !from.is_dir() {
            return Err(ArchforgeError::Configuration {
                message: format!("template directory {} does not exist", from.display()),
            });
        }
        self.clear()?;

        let mut copied = 0;
        for entry in WalkDir::new(from).min_depth(1) {
            let entry = entry.map_err(|e| ApplicationError::FileStore {
                path: from.to_path_buf(),
                reason: format!("directory walk error: {e}"),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(from).map_err(|_| {
                ArchforgeError::Internal {
                    message: format!("{} is outside {}", entry.path().display(), from.display()),
                }
            })?;
            let target = self.dir.join(relative);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| io_error(parent, e, "create directory"))?;
            }
            std::fs::copy(entry.path(), &target).map_err(|e| io_error(&target, e, "copy"))?;
            copied += 1;
        }

        info!(files = copied, "Template cache updated");
        Ok(copied)
    }
}

fn count_files(dir: &Path) -> ArchforgeResult<usize> {
    let mut count = 0;
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| ApplicationError::FileStore {
            path: dir.to_path_buf(),
            reason: format!("directory walk error: {e}"),
        })?;
        if entry.file_type().is_file() {
            count += 1;
        }
    }
    Ok(count)
}

fn io_error(path: &Path, e: io::Error, operation: &str) -> ArchforgeError {
    ApplicationError::FileStore {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}
