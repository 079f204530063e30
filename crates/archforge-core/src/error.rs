//! Unified error handling for archforge core.
//!
//! Wraps domain and application errors behind one type with a category (for
//! exit codes and styling) and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::application::services::GenerationStage;
use crate::domain::DomainError;

/// Root error type for archforge core operations.
#[derive(Debug, Error, Clone)]
pub enum ArchforgeError {
    /// Validation and path-resolution failures.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Rendering, metadata, file-store and backup failures.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },

    /// A generation request stopped at `stage`.
    #[error("{}", aborted_message(stage, *rolled_back, errors))]
    Aborted {
        /// Stage the request stopped in.
        stage: GenerationStage,
        rolled_back: bool,
        errors: Vec<ArchforgeError>,
        /// Every stage entered, ending with `Failed`.
        stages: Vec<GenerationStage>,
    },
}

fn aborted_message(stage: &GenerationStage, rolled_back: bool, errors: &[ArchforgeError]) -> String {
    let mut out = format!("generation failed while {stage}");
    if rolled_back {
        out.push_str(" (changes rolled back)");
    }
    match errors {
        [] => {}
        [single] => {
            out.push_str(": ");
            out.push_str(&single.to_string());
        }
        many => {
            out.push_str(&format!(" with {} errors:", many.len()));
            for e in many {
                out.push_str("\n  - ");
                out.push_str(&e.to_string());
            }
        }
    }
    out
}

impl ArchforgeError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Run 'archforge config show' to inspect the effective settings".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in archforge".into()],
            Self::Aborted {
                rolled_back,
                errors,
                ..
            } => {
                let mut out: Vec<String> = Vec::new();
                for s in errors.iter().flat_map(Self::suggestions) {
                    if !out.contains(&s) {
                        out.push(s);
                    }
                }
                if *rolled_back {
                    out.push("No files were changed; fix the problem and run the command again".into());
                }
                out
            }
        }
    }

    /// Get error category for display and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::PathResolution => ErrorCategory::PathResolution,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
            Self::Aborted { errors, .. } => errors
                .first()
                .map_or(ErrorCategory::Internal, Self::category),
        }
    }

    /// Individual failures, flattening an aborted request.
    pub fn causes(&self) -> Vec<&ArchforgeError> {
        match self {
            Self::Aborted { errors, .. } => errors.iter().flat_map(Self::causes).collect(),
            other => vec![other],
        }
    }
}

/// Error categories for UI display and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    PathResolution,
    NotFound,
    Render,
    Io,
    Internal,
}

/// Convenient result type alias.
pub type ArchforgeResult<T> = Result<T, ArchforgeError>;

/// Extension trait for turning foreign errors into internal errors.
pub trait Context<T> {
    fn context(self, msg: impl Into<String>) -> ArchforgeResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> ArchforgeResult<T> {
        self.map_err(|e| ArchforgeError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aborted_takes_category_of_first_error() {
        let err = ArchforgeError::Aborted {
            stage: GenerationStage::Validating,
            rolled_back: false,
            stages: vec![GenerationStage::Validating, GenerationStage::Failed],
            errors: vec![
                DomainError::InvalidNamespace {
                    namespace: "Com".into(),
                    reason: "x".into(),
                }
                .into(),
                ApplicationError::TemplateNotFound {
                    template_id: "a".into(),
                }
                .into(),
            ],
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.causes().len(), 2);
        let text = err.to_string();
        assert!(text.starts_with("generation failed while validating with 2 errors:"), "{text}");
    }

    #[test]
    fn rollback_is_mentioned() {
        let err = ArchforgeError::Aborted {
            stage: GenerationStage::Writing,
            rolled_back: true,
            stages: vec![GenerationStage::Writing, GenerationStage::Failed],
            errors: vec![
                ApplicationError::FileStore {
                    path: "a.txt".into(),
                    reason: "disk full".into(),
                }
                .into(),
            ],
        };
        assert_eq!(err.category(), ErrorCategory::Io);
        assert!(err.to_string().contains("(changes rolled back)"));
        assert!(err.suggestions().iter().any(|s| s.contains("No files were changed")));
    }

    #[test]
    fn context_wraps_foreign_errors() {
        let parsed: Result<u8, _> = "x".parse::<u8>();
        let err = parsed.context("parsing count").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(err.to_string().contains("parsing count"));
    }
}
