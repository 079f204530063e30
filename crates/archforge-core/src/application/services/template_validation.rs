//! Up-front check that every template a project could need is present.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::application::ports::{AdapterQuery, MetadataSource, Renderer};
use crate::application::services::metadata_resolver::StructureMetadataResolver;
use crate::application::services::planner::GenerationPlanner;
use crate::domain::{Framework, Paradigm, ProjectContext};
use crate::error::ArchforgeError;

const ADAPTER_KINDS: [&str; 2] = ["driven", "driving"];

/// Findings of one validation run.
#[derive(Debug, Default, Serialize)]
pub struct TemplateValidationReport {
    /// Template ids that were checked.
    pub checked: Vec<String>,
    #[serde(serialize_with = "serialize_problems")]
    pub problems: Vec<ArchforgeError>,
}

impl TemplateValidationReport {
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }

    fn check(&mut self, renderer: &dyn Renderer, template_id: String) {
        if self.checked.contains(&template_id) {
            return;
        }
        if let Err(e) = renderer.check(&template_id) {
            warn!(template = %template_id, error = %e, "Template check failed");
            self.problems.push(e);
        }
        self.checked.push(template_id);
    }
}

fn serialize_problems<S: serde::Serializer>(
    problems: &[ArchforgeError],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(problems.iter().map(ToString::to_string))
}

pub struct TemplateValidationService {
    metadata: StructureMetadataResolver,
    renderer: Arc<dyn Renderer>,
}

impl TemplateValidationService {
    pub fn new(metadata: Arc<dyn MetadataSource>, renderer: Arc<dyn Renderer>) -> Self {
        Self {
            metadata: StructureMetadataResolver::new(metadata),
            renderer,
        }
    }

    /// Check the architecture descriptor, the project templates and every
    /// adapter available for `framework`/`paradigm`.
    ///
    /// Never fails; each problem lands in the report.
    #[instrument(skip_all, fields(%architecture, %framework, %paradigm))]
    pub fn validate(
        &self,
        architecture: &str,
        framework: Framework,
        paradigm: Paradigm,
        adapters_as_modules: bool,
    ) -> TemplateValidationReport {
        let mut report = TemplateValidationReport::default();

        let descriptor = match self.metadata.load(architecture) {
            Ok(d) => d,
            Err(e) => {
                report.problems.push(e);
                return report;
            }
        };
        let project = ProjectContext {
            base_namespace: "com.example".into(),
            architecture: architecture.to_string(),
            paradigm,
            framework,
            adapters_as_modules,
            dependency_overrides: Default::default(),
        };
        let planner = GenerationPlanner::new(&descriptor, &project);

        for id in planner.required_templates() {
            report.check(self.renderer.as_ref(), id);
        }

        for kind in ADAPTER_KINDS {
            let every_name = AdapterQuery::new("", framework, paradigm, kind);
            for name in self.metadata.adapter_names(&every_name) {
                let query = AdapterQuery::new(&name, framework, paradigm, kind);
                match self.metadata.load_adapter(&query) {
                    Ok(adapter) => {
                        for id in planner.adapter_templates(&adapter) {
                            report.check(self.renderer.as_ref(), id);
                        }
                    }
                    Err(e) => report.problems.push(e),
                }
            }
        }

        info!(
            checked = report.checked.len(),
            problems = report.problems.len(),
            "Template validation finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::application::ports::output::{MockMetadataSource, MockRenderer};
    use crate::domain::{AdapterDescriptor, ArchitectureDescriptor, ArtifactTemplate};

    fn metadata() -> MockMetadataSource {
        let mut source = MockMetadataSource::new();
        source.expect_load_architecture().returning(|id| {
            Ok(ArchitectureDescriptor::new(
                id,
                [("driven", "infrastructure/out/{name}"), ("driving", "infrastructure/in/{name}")],
            ))
        });
        source
            .expect_adapter_names()
            .returning(|_, _, kind| match kind {
                "driven" => vec!["redis".into()],
                _ => vec![],
            });
        source.expect_load_adapter().returning(|q| {
            Ok(AdapterDescriptor {
                name: q.adapter.clone(),
                kind: q.kind.clone(),
                description: None,
                dependencies: vec![],
                test_dependencies: vec![],
                application_properties: None,
                artifacts: vec![ArtifactTemplate {
                    template: "frameworks/{framework}/{paradigm}/adapters/{kindDir}/{adapter}/Adapter.java.tpl".into(),
                    file_name: "{className}.java".into(),
                    subpackage: None,
                }],
            })
        });
        source
    }

    #[test]
    fn reports_each_missing_template_once() {
        let mut renderer = MockRenderer::new();
        renderer.expect_check().returning(|id| {
            if id.contains("redis") {
                Err(ApplicationError::TemplateNotFound {
                    template_id: id.to_string(),
                }
                .into())
            } else {
                Ok(())
            }
        });

        let service = TemplateValidationService::new(Arc::new(metadata()), Arc::new(renderer));
        let report = service.validate("onion", Framework::Spring, Paradigm::Reactive, false);

        assert!(!report.is_valid());
        assert_eq!(report.problems.len(), 1);
        assert!(report.checked.contains(
            &"frameworks/spring/reactive/adapters/driven-adapters/redis/Adapter.java.tpl".to_string()
        ));
        assert!(report.checked.iter().all(|id| !id.contains('{')));
    }

    #[test]
    fn unknown_architecture_is_a_single_problem() {
        let mut source = MockMetadataSource::new();
        source.expect_load_architecture().returning(|id| {
            Err(ApplicationError::MetadataNotFound {
                what: format!("architecture '{id}'"),
                attempted: vec![],
            }
            .into())
        });
        let service = TemplateValidationService::new(Arc::new(source), Arc::new(MockRenderer::new()));
        let report = service.validate("nope", Framework::Spring, Paradigm::Imperative, false);
        assert_eq!(report.problems.len(), 1);
        assert!(report.checked.is_empty());
    }
}
