//! YAML descriptors read through [`TemplateSources`].
//!
//! ```text
//! architectures/{id}/structure.yml
//! frameworks/{framework}/{paradigm}/adapters/{kindDir}/{adapter}/metadata.yml
//! adapters/{kindDir}/{adapter}/metadata.yml
//! ```
//!
//! Adapter descriptors are located by an ordered list of [`AdapterLookup`]
//! strategies; the first one that finds a file wins.

use archforge_core::application::ApplicationError;
use archforge_core::application::ports::{AdapterQuery, MetadataSource};
use archforge_core::domain::{AdapterDescriptor, ArchitectureDescriptor, Framework, Paradigm};
use archforge_core::error::ArchforgeResult;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::templates::TemplateSources;

const ARCHITECTURES: &str = "architectures";
const STRUCTURE_FILE: &str = "structure.yml";
const ADAPTER_FILE: &str = "metadata.yml";

/// One way of laying out adapter descriptors in a template tree.
pub trait AdapterLookup: Send + Sync {
    fn name(&self) -> &'static str;

    /// Directory holding one sub-directory per adapter.
    fn adapters_dir(&self, framework: Framework, paradigm: Paradigm, kind_dir: &str) -> String;

    fn descriptor_id(&self, query: &AdapterQuery) -> String {
        format!(
            "{}/{}/{ADAPTER_FILE}",
            self.adapters_dir(query.framework, query.paradigm, query.kind_dir()),
            query.adapter
        )
    }
}

/// `frameworks/{framework}/{paradigm}/adapters/{kindDir}/{adapter}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameworkAwareLookup;

impl AdapterLookup for FrameworkAwareLookup {
    fn name(&self) -> &'static str {
        "framework-aware"
    }

    fn adapters_dir(&self, framework: Framework, paradigm: Paradigm, kind_dir: &str) -> String {
        format!("frameworks/{framework}/{paradigm}/adapters/{kind_dir}")
    }
}

/// `adapters/{kindDir}/{adapter}`, shared by every framework and paradigm.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyFlatLookup;

impl AdapterLookup for LegacyFlatLookup {
    fn name(&self) -> &'static str {
        "legacy-flat"
    }

    fn adapters_dir(&self, _: Framework, _: Paradigm, kind_dir: &str) -> String {
        format!("adapters/{kind_dir}")
    }
}

pub struct YamlMetadataSource {
    sources: TemplateSources,
    lookups: Vec<Box<dyn AdapterLookup>>,
}

impl YamlMetadataSource {
    /// Framework-aware lookup first, legacy flat layout second.
    pub fn new(sources: TemplateSources) -> Self {
        Self::with_lookups(
            sources,
            vec![Box::new(FrameworkAwareLookup), Box::new(LegacyFlatLookup)],
        )
    }

    pub fn with_lookups(sources: TemplateSources, lookups: Vec<Box<dyn AdapterLookup>>) -> Self {
        Self { sources, lookups }
    }

    /// Ids of every architecture the sources know about.
    pub fn architectures(&self) -> Vec<String> {
        self.sources.children(ARCHITECTURES)
    }

    fn parse<T: DeserializeOwned>(&self, id: &str, text: &str) -> ArchforgeResult<T> {
        serde_yaml::from_str(text).map_err(|e| {
            ApplicationError::MetadataParse {
                source_name: id.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

impl MetadataSource for YamlMetadataSource {
    #[instrument(skip(self))]
    fn load_architecture(&self, id: &str) -> ArchforgeResult<ArchitectureDescriptor> {
        let resource = format!("{ARCHITECTURES}/{id}/{STRUCTURE_FILE}");
        let text = self.sources.read(&resource)?.ok_or_else(|| {
            ApplicationError::MetadataNotFound {
                what: format!("architecture '{id}'"),
                attempted: self
                    .sources
                    .describe()
                    .into_iter()
                    .map(|s| format!("{s}: {resource}"))
                    .collect(),
            }
        })?;

        let descriptor: ArchitectureDescriptor = self.parse(&resource, &text)?;
        if descriptor.id != id {
            return Err(ApplicationError::MetadataParse {
                source_name: resource,
                reason: format!("declares architecture '{}'", descriptor.id),
            }
            .into());
        }
        Ok(descriptor)
    }

    #[instrument(skip_all, fields(adapter = %query.adapter, kind = %query.kind))]
    fn load_adapter(&self, query: &AdapterQuery) -> ArchforgeResult<AdapterDescriptor> {
        let mut attempted = Vec::new();
        for lookup in &self.lookups {
            let id = lookup.descriptor_id(query);
            if let Some(text) = self.sources.read(&id)? {
                debug!(strategy = lookup.name(), resource = %id, "Adapter descriptor found");
                return self.parse(&id, &text);
            }
            attempted.push(id);
        }
        Err(ApplicationError::MetadataNotFound {
            what: format!(
                "{} adapter '{}' for {}/{}",
                query.kind, query.adapter, query.framework, query.paradigm
            ),
            attempted,
        }
        .into())
    }

    fn adapter_names(&self, framework: Framework, paradigm: Paradigm, kind: &str) -> Vec<String> {
        let kind_dir = AdapterQuery::new("", framework, paradigm, kind).kind_dir();
        let mut names: Vec<String> = self
            .lookups
            .iter()
            .flat_map(|l| {
                self.sources
                    .children(&l.adapters_dir(framework, paradigm, kind_dir))
            })
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{BuiltinTemplates, DirectoryTemplates};
    use archforge_core::error::ErrorCategory;
    use tempfile::TempDir;

    fn builtin() -> YamlMetadataSource {
        YamlMetadataSource::new(TemplateSources::builtin())
    }

    #[test]
    fn every_builtin_architecture_is_valid() {
        let source = builtin();
        let ids = source.architectures();
        assert_eq!(ids.len(), 5);
        for id in ids {
            let descriptor = source.load_architecture(&id).unwrap();
            assert_eq!(descriptor.violations(), Vec::<String>::new(), "{id}");
        }
    }

    #[test]
    fn granular_descriptor_resolves_the_example_paths() {
        let descriptor = builtin()
            .load_architecture("hexagonal-multi-granular")
            .unwrap();
        assert_eq!(
            descriptor.adapter_paths["driven"],
            "infrastructure/driven-adapters/{name}"
        );
        assert_eq!(descriptor.entry_module.as_deref(), Some("application/app-service"));
    }

    #[test]
    fn framework_specific_descriptor_wins_over_legacy() {
        let query = AdapterQuery::new("redis", Framework::Spring, Paradigm::Reactive, "driven");
        let redis = builtin().load_adapter(&query).unwrap();
        assert_eq!(redis.artifacts.len(), 3);
        assert_eq!(
            redis.dependencies[0].artifact,
            "spring-boot-starter-data-redis-reactive"
        );
    }

    #[test]
    fn legacy_layout_is_the_fallback() {
        let query = AdapterQuery::new("generic", Framework::Quarkus, Paradigm::Imperative, "driven");
        let generic = builtin().load_adapter(&query).unwrap();
        assert_eq!(generic.name, "generic");
    }

    #[test]
    fn missing_adapter_lists_every_attempted_location() {
        let query = AdapterQuery::new("kafka", Framework::Spring, Paradigm::Reactive, "driven");
        let err = builtin().load_adapter(&query).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        let message = err.to_string();
        assert!(message.contains("frameworks/spring/reactive/adapters/driven-adapters/kafka/metadata.yml"));
        assert!(message.contains("adapters/driven-adapters/kafka/metadata.yml"));
    }

    #[test]
    fn adapter_names_merge_both_layouts() {
        let names = builtin().adapter_names(Framework::Spring, Paradigm::Imperative, "driven");
        assert_eq!(names, ["generic", "mongodb", "redis"]);
    }

    #[test]
    fn local_directory_adds_architectures() {
        let dir = TempDir::new().unwrap();
        let structure = dir.path().join("architectures/clean/structure.yml");
        std::fs::create_dir_all(structure.parent().unwrap()).unwrap();
        std::fs::write(
            &structure,
            "architecture: clean\nadapterPaths:\n  driven: infrastructure/{name}\n",
        )
        .unwrap();

        let source = YamlMetadataSource::new(
            TemplateSources::new()
                .with(DirectoryTemplates::new(dir.path()))
                .with(BuiltinTemplates),
        );
        assert_eq!(source.load_architecture("clean").unwrap().id, "clean");
        assert_eq!(source.architectures().len(), 6);
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let structure = dir.path().join("architectures/broken/structure.yml");
        std::fs::create_dir_all(structure.parent().unwrap()).unwrap();
        std::fs::write(&structure, "architecture: [unclosed\n").unwrap();

        let source = YamlMetadataSource::new(TemplateSources::new().with(DirectoryTemplates::new(dir.path())));
        let err = source.load_architecture("broken").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }
}
