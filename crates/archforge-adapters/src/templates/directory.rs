//! Templates read from a directory on disk.

use std::io;
use std::path::{Path, PathBuf};

use archforge_core::application::ApplicationError;
use archforge_core::error::ArchforgeResult;

use super::TemplateSource;

#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    root: PathBuf,
}

impl DirectoryTemplates {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateSource for DirectoryTemplates {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn read(&self, id: &str) -> ArchforgeResult<Option<String>> {
        let path = self.root.join(id);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            // A directory where a file was expected is simply a miss.
            Err(_) if path.is_dir() => Ok(None),
            Err(e) => Err(ApplicationError::FileStore {
                path,
                reason: format!("Failed to read template: {e}"),
            }
            .into()),
        }
    }

    fn children(&self, prefix: &str) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(self.root.join(prefix)) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_ok_and(|t| t.is_dir()))
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
