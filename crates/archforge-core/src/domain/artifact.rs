//! Planned and rendered artifacts, and the backup manifest.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::context::RenderContext;
use crate::domain::path_resolver::ResolvedPath;
use crate::domain::value_objects::ArtifactKind;

/// Where an artifact's content comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactSource {
    /// Rendered by the renderer from a template id and a context.
    Template {
        template_id: String,
        context: RenderContext,
    },
    /// Content already known at planning time.
    Inline(String),
}

/// A file the request will produce, fully resolved before rendering starts.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedArtifact {
    /// Target path relative to the project root.
    pub target: PathBuf,
    pub source: ArtifactSource,
    pub kind: ArtifactKind,
    /// Directory the component resolved into; `None` for project files.
    pub resolved: Option<ResolvedPath>,
}

impl PlannedArtifact {
    pub fn new(
        target: impl Into<PathBuf>,
        template_id: impl Into<String>,
        context: RenderContext,
    ) -> Self {
        Self::with_source(
            target,
            ArtifactSource::Template {
                template_id: template_id.into(),
                context,
            },
        )
    }

    pub fn inline(target: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::with_source(target, ArtifactSource::Inline(content.into()))
    }

    fn with_source(target: impl Into<PathBuf>, source: ArtifactSource) -> Self {
        let target = target.into();
        Self {
            kind: ArtifactKind::from_path(&target),
            target,
            source,
            resolved: None,
        }
    }

    /// Template id, `None` for inline content.
    pub fn template_id(&self) -> Option<&str> {
        match &self.source {
            ArtifactSource::Template { template_id, .. } => Some(template_id),
            ArtifactSource::Inline(_) => None,
        }
    }

    pub fn resolved(mut self, resolved: ResolvedPath) -> Self {
        self.resolved = Some(resolved);
        self
    }
}

/// Rendered file content. Lives only for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub path: PathBuf,
    pub content: String,
    pub kind: ArtifactKind,
}

impl GeneratedArtifact {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            kind: ArtifactKind::from_path(&path),
            path,
            content: content.into(),
        }
    }
}

/// Record of one backup: original relative path → snapshot path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupManifest {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub entries: BTreeMap<PathBuf, PathBuf>,
}

impl BackupManifest {
    pub const FILE_NAME: &'static str = "manifest.json";

    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            created_at,
            entries: BTreeMap::new(),
        }
    }

    pub fn record(&mut self, original: impl Into<PathBuf>, snapshot: impl Into<PathBuf>) {
        self.entries.insert(original.into(), snapshot.into());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, original: &Path) -> bool {
        self.entries.contains_key(original)
    }
}
