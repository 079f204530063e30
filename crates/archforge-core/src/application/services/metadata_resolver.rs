//! Loads and validates descriptors through a [`MetadataSource`].

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::application::ports::{AdapterQuery, MetadataSource};
use crate::domain::{AdapterDescriptor, ArchitectureDescriptor};
use crate::error::ArchforgeResult;

/// Stateless front for descriptor loading.
///
/// Every call goes to the source; a validated descriptor is immutable, so
/// callers may hold on to it for as long as they like.
#[derive(Clone)]
pub struct StructureMetadataResolver {
    source: Arc<dyn MetadataSource>,
}

impl StructureMetadataResolver {
    pub fn new(source: Arc<dyn MetadataSource>) -> Self {
        Self { source }
    }

    /// Load `architecture_id` and check every structural invariant.
    #[instrument(skip_all, fields(architecture = %architecture_id))]
    pub fn load(&self, architecture_id: &str) -> ArchforgeResult<ArchitectureDescriptor> {
        let descriptor = self.source.load_architecture(architecture_id)?;
        descriptor.validate()?;
        debug!(
            adapter_kinds = descriptor.adapter_paths.len(),
            modules = descriptor.modules.len(),
            "Architecture descriptor loaded"
        );
        Ok(descriptor)
    }

    /// Load an adapter descriptor and check it matches the requested kind.
    #[instrument(skip_all, fields(adapter = %query.adapter, kind = %query.kind))]
    pub fn load_adapter(&self, query: &AdapterQuery) -> ArchforgeResult<AdapterDescriptor> {
        let descriptor = self.source.load_adapter(query)?;
        let source_name = format!("adapter '{}'", query.adapter);

        if descriptor.kind != query.kind {
            return Err(ApplicationError::MetadataParse {
                source_name,
                reason: format!(
                    "declared as '{}' but requested as '{}'",
                    descriptor.kind, query.kind
                ),
            }
            .into());
        }
        if descriptor.artifacts.is_empty() {
            return Err(ApplicationError::MetadataParse {
                source_name,
                reason: "declares no artifacts".into(),
            }
            .into());
        }
        Ok(descriptor)
    }

    pub fn adapter_names(&self, query: &AdapterQuery) -> Vec<String> {
        self.source
            .adapter_names(query.framework, query.paradigm, &query.kind)
    }
}
