//! Application layer for archforge.
//!
//! This layer contains:
//! - **Services**: generation pipeline, metadata loading, backups, template
//!   validation
//! - **Ports**: traits for rendering, file access, metadata and project
//!   configuration
//! - **Errors**: application-specific error types
//!
//! The application layer sequences the domain layer; path rules, layer
//! checks and merge semantics live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    BackupCoordinator, DEFAULT_BACKUP_DIR, GenerationOrchestrator, GenerationPlan,
    GenerationPlanner, GenerationReport, GenerationStage, StructureMetadataResolver,
    TemplateValidationReport, TemplateValidationService,
};

pub use ports::{AdapterQuery, FileStore, MetadataSource, ProjectConfigStore, Renderer};

pub use error::ApplicationError;
