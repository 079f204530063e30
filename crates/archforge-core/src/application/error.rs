//! Application layer errors.
//!
//! These errors represent failures talking to the outside world (templates,
//! metadata, files, backups), not business rules. Business rule violations
//! are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    // Rendering
    #[error("template not found: {template_id}")]
    TemplateNotFound { template_id: String },

    #[error("template '{template_id}' is invalid: {reason}")]
    TemplateInvalid { template_id: String, reason: String },

    // Metadata and configuration
    #[error("{what} not found (looked in: {})", attempted.join(", "))]
    MetadataNotFound { what: String, attempted: Vec<String> },

    #[error("cannot parse {source_name}: {reason}")]
    MetadataParse { source_name: String, reason: String },

    #[error("no project configuration at {}", path.display())]
    ProjectConfigMissing { path: PathBuf },

    // Files and backups
    #[error("file store error at {}: {reason}", path.display())]
    FileStore { path: PathBuf, reason: String },

    #[error("backup failed: {reason}")]
    BackupFailed {
        reason: String,
        guidance: Option<String>,
    },

    #[error("backup '{id}' not found")]
    BackupNotFound { id: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { template_id } => vec![
                format!("Add {template_id} to your template directory"),
                "Run 'archforge validate-templates' to list every missing template".into(),
            ],
            Self::TemplateInvalid { template_id, .. } => {
                vec![format!("Fix the placeholders in {template_id}")]
            }
            Self::MetadataNotFound { .. } => vec![
                "Check the architecture id and adapter type for typos".into(),
                "Run 'archforge cache update' if you keep templates in a local directory".into(),
            ],
            Self::MetadataParse { source_name, .. } => vec![format!("Fix the YAML in {source_name}")],
            Self::ProjectConfigMissing { .. } => vec![
                "Run this command inside a project created with 'archforge init'".into(),
                "Or pass --project-dir to point at the project root".into(),
            ],
            Self::FileStore { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::BackupFailed { guidance, .. } => match guidance {
                Some(g) => vec![g.clone()],
                None => vec!["Check free disk space and permissions on the backup directory".into()],
            },
            Self::BackupNotFound { .. } => {
                vec!["The backup was already restored or deleted".into()]
            }
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. }
            | Self::MetadataNotFound { .. }
            | Self::ProjectConfigMissing { .. }
            | Self::BackupNotFound { .. } => ErrorCategory::NotFound,
            Self::TemplateInvalid { .. } => ErrorCategory::Render,
            Self::MetadataParse { .. } => ErrorCategory::Configuration,
            Self::FileStore { .. } | Self::BackupFailed { .. } => ErrorCategory::Io,
        }
    }
}
