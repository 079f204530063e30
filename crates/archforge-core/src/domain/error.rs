// ============================================================================
// domain/error.rs - validation, configuration and path-resolution failures
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so aggregated lists can be copied into reports)
/// - Categorizable (for CLI display and exit codes)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    #[error("architecture '{architecture}' has an invalid descriptor: {}", violations.join("; "))]
    MetadataInvalid {
        architecture: String,
        violations: Vec<String>,
    },

    #[error("invalid project configuration: {reason}")]
    InvalidProjectConfig { reason: String },

    #[error("'{document}' is not a valid YAML mapping: {reason}")]
    InvalidDocument { document: String, reason: String },

    // ========================================================================
    // Path Resolution Errors
    // ========================================================================
    #[error("no path template for adapter kind '{kind}' (declared: {})", available.join(", "))]
    UnknownAdapterKind { kind: String, available: Vec<String> },

    #[error(
        "path template '{template}' needs a module but none was selected; declared modules: {}",
        modules.join(", ")
    )]
    MissingModuleSelection {
        template: String,
        modules: Vec<String>,
    },

    #[error("module '{module}' is not declared (declared modules: {})", modules.join(", "))]
    UnknownModule { module: String, modules: Vec<String> },

    #[error("path '{path}' is not inside any declared module (declared modules: {})", modules.join(", "))]
    OutsideModules { path: String, modules: Vec<String> },

    #[error("cannot determine the layer of path '{path}'")]
    UndeterminedLayer { path: String },

    #[error("layer '{layer}' of path '{path}' is not declared (declared layers: {})", declared.join(", "))]
    UnknownLayer {
        layer: String,
        path: String,
        declared: Vec<String>,
    },

    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Layer '{from}' cannot depend on layer '{to}'. Allowed dependencies: [{}]", allowed.join(", "))]
    DependencyNotAllowed {
        from: String,
        to: String,
        allowed: Vec<String>,
    },

    #[error("invalid {kind} name '{name}': {reason}")]
    InvalidName {
        kind: &'static str,
        name: String,
        reason: String,
    },

    #[error("{component} requires '{field}'")]
    MissingField {
        component: String,
        field: &'static str,
    },

    #[error("invalid namespace '{namespace}': {reason}")]
    InvalidNamespace { namespace: String, reason: String },

    #[error("invalid method definition '{definition}': {reason}")]
    InvalidMethod { definition: String, reason: String },

    #[error("invalid field definition '{definition}': {reason}")]
    InvalidField { definition: String, reason: String },

    #[error("unknown {kind} '{value}' (expected one of: {})", expected.join(", "))]
    UnknownValue {
        kind: &'static str,
        value: String,
        expected: Vec<&'static str>,
    },

    #[error("artifact already exists: {}", path.display())]
    ArtifactExists { path: PathBuf },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MetadataInvalid { architecture, .. } => vec![
                format!("Fix architectures/{architecture}/structure.yml"),
                "adapterPaths must declare 'driven' or 'driving' and every template needs '{name}'"
                    .into(),
            ],
            Self::InvalidProjectConfig { .. } => vec![
                "Check .archforge.yml in the project root".into(),
                "Re-run 'archforge init' in an empty directory to see a valid file".into(),
            ],
            Self::InvalidDocument { document, .. } => vec![
                format!("Fix the YAML syntax in {document}"),
                "The top level of a shared configuration file must be a mapping".into(),
            ],
            Self::UnknownAdapterKind { available, .. } => vec![format!(
                "Use one of the declared adapter kinds: {}",
                available.join(", ")
            )],
            Self::MissingModuleSelection { modules, .. } | Self::UnknownModule { modules, .. } => vec![
                "Pass --module to choose where the component goes".into(),
                format!("Available modules: {}", modules.join(", ")),
            ],
            Self::OutsideModules { path, modules } => vec![
                format!("Declare '{path}' or one of its parents as a module in structure.yml"),
                "Initialise the project with --adapters-as-modules to give each adapter its own module"
                    .into(),
                format!("Available modules: {}", modules.join(", ")),
            ],
            Self::UndeterminedLayer { .. } | Self::UnknownLayer { .. } => vec![
                "Path templates must place components under a declared layer".into(),
                "Known layers: core, domain, application, infrastructure".into(),
            ],
            Self::DependencyNotAllowed { from, allowed, .. } => vec![format!(
                "Layer '{from}' may only depend on: [{}]",
                allowed.join(", ")
            )],
            Self::InvalidName { kind, .. } => vec![match *kind {
                "entity" | "use case" | "adapter" => {
                    "Use PascalCase identifiers, e.g. User, CreateOrder, UserRepository".into()
                }
                _ => "Use letters, digits and underscores, starting with a letter".into(),
            }],
            Self::MissingField { field, .. } => vec![format!("Provide --{field}")],
            Self::InvalidNamespace { .. } => vec![
                "Use dot-separated lowercase segments, e.g. com.acme.shop".into(),
            ],
            Self::InvalidMethod { .. } => vec![
                "Expected format: methodName:ReturnType[:param1:Type1,param2:Type2]".into(),
                "Separate several methods with '|'".into(),
            ],
            Self::InvalidField { .. } => {
                vec!["Expected format: name:Type[,other:Type]".into()]
            }
            Self::UnknownValue { expected, .. } => {
                vec![format!("Supported values: {}", expected.join(", "))]
            }
            Self::ArtifactExists { .. } => vec![
                "Choose a different name".into(),
                "Use --force to regenerate over existing files".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MetadataInvalid { .. }
            | Self::InvalidProjectConfig { .. }
            | Self::InvalidDocument { .. } => {
                ErrorCategory::Configuration
            }
            Self::UnknownAdapterKind { .. }
            | Self::MissingModuleSelection { .. }
            | Self::UnknownModule { .. }
            | Self::OutsideModules { .. }
            | Self::UndeterminedLayer { .. }
            | Self::UnknownLayer { .. } => ErrorCategory::PathResolution,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    PathResolution,
}
