// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for archforge.
//!
//! Pure logic only: descriptors, path resolution, layer checks, the YAML
//! merge engine and shared-file edits. All I/O (files, templates, metadata)
//! goes through ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: no filesystem, network, or terminal access
//! - **Immutable values**: descriptors and results are never mutated after
//!   construction
pub mod artifact;
pub mod component;
pub mod context;
pub mod dependency;
pub mod descriptor;
pub mod error;
pub mod layers;
pub mod merge;
pub mod path_resolver;
pub mod shared_file;
pub mod validation;
pub mod value_objects;

pub use artifact::{ArtifactSource, BackupManifest, GeneratedArtifact, PlannedArtifact};
pub use component::{
    ComponentConfig, Field, GenerationRequest, MethodSignature, Parameter, ProjectConfig,
    ProjectContext,
};
pub use context::{RenderContext, to_camel_case, to_kebab_case, to_pascal_case, to_snake_case};
pub use dependency::{DependencySpec, VersionConflict};
pub use descriptor::{
    AdapterDescriptor, ArchitectureDescriptor, ArtifactTemplate, NamingConventions,
    component_keys,
};
pub use error::{DomainError, ErrorCategory};
pub use layers::{LayerDependencies, LayerDependencyValidator};
pub use merge::{MergeConflict, MergeResult, YamlMergeEngine};
pub use path_resolver::{
    LAYER_SCAN_ORDER, PathResolver, ResolvedPath, extract_layer, substitute_placeholders,
};
pub use shared_file::{EditOutcome, SharedEdit};
pub use validation::ComponentValidator;
pub use value_objects::{
    ArtifactKind, ComponentKind, Framework, KNOWN_ARCHITECTURES, Paradigm,
};
