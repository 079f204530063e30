pub mod backup;
pub mod metadata_resolver;
pub mod orchestrator;
pub mod planner;
pub mod template_validation;

#[cfg(test)]
pub(crate) mod testing;

pub use backup::{BackupCoordinator, DEFAULT_BACKUP_DIR};
pub use metadata_resolver::StructureMetadataResolver;
pub use orchestrator::{GenerationOrchestrator, GenerationReport, GenerationStage};
pub use planner::{GenerationPlan, GenerationPlanner, PlannedDependency};
pub use template_validation::{TemplateValidationReport, TemplateValidationService};
