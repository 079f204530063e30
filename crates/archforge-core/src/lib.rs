//! archforge core - architecture-driven project generation
//!
//! This crate provides the domain and application layers for the archforge
//! scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          archforge-cli (CLI)            │
//! │     (composition root, commands)        │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (GenerationOrchestrator, Backups,      │
//! │   TemplateValidationService)            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Renderer, FileStore, MetadataSource,   │
//! │  ProjectConfigStore)                    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   archforge-adapters (Infrastructure)   │
//! │ (LocalFileStore, TemplateRenderer, ...) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (descriptors, PathResolver, layer graph,│
//! │  YamlMergeEngine, shared-file edits)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use archforge_core::prelude::*;
//!
//! # fn run(
//! #     metadata: Arc<dyn MetadataSource>,
//! #     renderer: Arc<dyn Renderer>,
//! #     store: Arc<dyn FileStore>,
//! #     project: ProjectContext,
//! # ) -> ArchforgeResult<()> {
//! let orchestrator = GenerationOrchestrator::new(metadata, renderer, store, ".archforge/backups");
//! let component = ComponentConfig::new(ComponentKind::OutputAdapter, "UserRepository")
//!     .entity("User")
//!     .adapter_type("redis");
//! let report = orchestrator.generate(&GenerationRequest::new(".", project, component))?;
//! println!("{} files written", report.artifacts.len());
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BackupCoordinator, GenerationOrchestrator, GenerationReport, GenerationStage,
        StructureMetadataResolver, TemplateValidationReport, TemplateValidationService,
        ports::{AdapterQuery, FileStore, MetadataSource, ProjectConfigStore, Renderer},
    };
    pub use crate::domain::{
        AdapterDescriptor, ArchitectureDescriptor, ComponentConfig, ComponentKind, Field,
        Framework, GenerationRequest, MethodSignature, Paradigm, ProjectConfig, ProjectContext,
        RenderContext,
    };
    pub use crate::error::{ArchforgeError, ArchforgeResult, ErrorCategory};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
