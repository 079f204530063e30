//! Turns a generation request into a complete, resolved plan.
//!
//! Planning is pure: every target path, template id and render context is
//! computed here from the descriptor and the request, before anything is
//! rendered or written. A plan that cannot be fully resolved is an error;
//! there are no partial plans.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::application::ports::AdapterQuery;
use crate::domain::{
    AdapterDescriptor, ArchitectureDescriptor, ComponentConfig, ComponentKind, DependencySpec,
    DomainError, LayerDependencyValidator, MethodSignature, Paradigm, PathResolver,
    PlannedArtifact, ProjectConfig, ProjectContext, RenderContext, ResolvedPath, SharedEdit,
    component_keys, extract_layer, substitute_placeholders, to_camel_case, to_kebab_case,
    to_pascal_case,
};
use crate::error::{ArchforgeError, ArchforgeResult};

pub const SETTINGS_FILE: &str = "settings.gradle.kts";
pub const BUILD_FILE: &str = "build.gradle.kts";
const JAVA_ROOT: &str = "src/main/java";
const RESOURCES_ROOT: &str = "src/main/resources";
const APPLICATION_YML: &str = "application.yml";

/// Template ids. `{framework}` and `{paradigm}` are filled per project.
pub mod templates {
    pub const ENTITY: &str = "components/entity/Entity.java.tpl";
    pub const USECASE_PORT: &str = "components/usecase/UseCasePort.java.tpl";
    pub const USECASE_IMPL: &str = "frameworks/{framework}/{paradigm}/usecase/UseCaseImpl.java.tpl";
    pub const ADAPTER_BUILD: &str = "project/adapter-build.gradle.kts.tpl";

    pub const SETTINGS: &str = "project/settings.gradle.kts.tpl";
    pub const ROOT_BUILD: &str = "project/root-build.gradle.kts.tpl";
    pub const MODULE_BUILD: &str = "project/module-build.gradle.kts.tpl";
    pub const APP_BUILD: &str = "frameworks/{framework}/{paradigm}/project/build.gradle.kts.tpl";
    pub const APP_MAIN: &str = "frameworks/{framework}/{paradigm}/project/Application.java.tpl";
    pub const APP_CONFIG: &str = "frameworks/{framework}/{paradigm}/project/application.yml.tpl";
    pub const PACKAGE_INFO: &str = "project/package-info.java.tpl";
    pub const GITIGNORE: &str = "project/gitignore.tpl";
    pub const README: &str = "project/README.md.tpl";
}

/// A dependency an adapter wants in an existing build file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedDependency {
    pub build_file: PathBuf,
    pub spec: DependencySpec,
    pub configuration: &'static str,
}

impl PlannedDependency {
    pub fn declaration(&self) -> String {
        self.spec.declaration(self.configuration)
    }
}

/// Everything one request will do, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationPlan {
    pub artifacts: Vec<PlannedArtifact>,
    pub shared_edits: Vec<SharedEdit>,
    pub dependencies: Vec<PlannedDependency>,
}

pub struct GenerationPlanner<'a> {
    descriptor: &'a ArchitectureDescriptor,
    project: &'a ProjectContext,
}

impl<'a> GenerationPlanner<'a> {
    pub fn new(descriptor: &'a ArchitectureDescriptor, project: &'a ProjectContext) -> Self {
        Self {
            descriptor,
            project,
        }
    }

    /// Adapter descriptor coordinates for `component`, if it is an adapter.
    pub fn adapter_query(&self, component: &ComponentConfig) -> Option<AdapterQuery> {
        let kind = component.kind.adapter_kind()?;
        let adapter = component.adapter_type.as_deref()?;
        Some(AdapterQuery::new(
            adapter,
            self.project.framework,
            self.project.paradigm,
            kind,
        ))
    }

    pub fn plan(
        &self,
        component: &ComponentConfig,
        adapter: Option<&AdapterDescriptor>,
        project_config: Option<&ProjectConfig>,
    ) -> ArchforgeResult<GenerationPlan> {
        let plan = match component.kind {
            ComponentKind::Project => {
                let config = project_config.ok_or_else(|| ArchforgeError::Configuration {
                    message: "project initialization needs a project configuration".into(),
                })?;
                self.plan_project(config)?
            }
            ComponentKind::Entity => self.plan_entity(component)?,
            ComponentKind::UseCase => self.plan_use_case(component)?,
            ComponentKind::InputAdapter | ComponentKind::OutputAdapter => {
                let adapter = adapter.ok_or_else(|| ArchforgeError::Internal {
                    message: "adapter descriptor was not loaded before planning".into(),
                })?;
                self.plan_adapter(component, adapter)?
            }
        };
        debug!(
            artifacts = plan.artifacts.len(),
            shared_edits = plan.shared_edits.len(),
            dependencies = plan.dependencies.len(),
            "Plan computed"
        );
        Ok(plan)
    }

    /// Every non-adapter template this project may need.
    pub fn required_templates(&self) -> Vec<String> {
        let mut ids = vec![
            templates::ENTITY,
            templates::USECASE_PORT,
            templates::USECASE_IMPL,
            templates::SETTINGS,
            templates::APP_BUILD,
            templates::APP_MAIN,
            templates::APP_CONFIG,
            templates::PACKAGE_INFO,
            templates::GITIGNORE,
            templates::README,
        ];
        if self.descriptor.is_multi_module() {
            ids.extend([templates::ROOT_BUILD, templates::MODULE_BUILD]);
        }
        if self.project.adapters_as_modules {
            ids.push(templates::ADAPTER_BUILD);
        }
        ids.into_iter().map(|id| self.template_id(id)).collect()
    }

    /// Template ids the artifacts of `adapter` render from.
    pub fn adapter_templates(&self, adapter: &AdapterDescriptor) -> Vec<String> {
        adapter
            .artifacts
            .iter()
            .map(|a| self.adapter_template_id(adapter, &a.template))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Components
    // -------------------------------------------------------------------------

    fn plan_entity(&self, component: &ComponentConfig) -> ArchforgeResult<GenerationPlan> {
        let resolved = self.resolve(None, component_keys::ENTITY, component)?;
        let package = self.java_package(resolved.path(), None);
        let class_name = self
            .descriptor
            .naming_conventions
            .class_name(component_keys::ENTITY, &component.name);
        let id_type = component.id_type.as_deref().unwrap_or("String");

        let fields = component
            .fields
            .iter()
            .map(|f| format!("    private {} {};", f.ty, f.name))
            .collect::<Vec<_>>()
            .join("\n");
        let imports = java_imports(
            component
                .fields
                .iter()
                .map(|f| f.ty.as_str())
                .chain([id_type]),
            false,
        );

        let context = self
            .base_context()
            .with("package", &package)
            .with("className", &class_name)
            .with("entityName", &class_name)
            .with("idType", id_type)
            .with("fields", fields)
            .with("imports", imports);

        let target = self.java_file(self.module_of(resolved.path())?, &package, &class_name);
        Ok(GenerationPlan {
            artifacts: vec![
                PlannedArtifact::new(target, self.template_id(templates::ENTITY), context)
                    .resolved(resolved),
            ],
            ..GenerationPlan::default()
        })
    }

    fn plan_use_case(&self, component: &ComponentConfig) -> ArchforgeResult<GenerationPlan> {
        let port = self.resolve(None, component_keys::USECASE_PORT, component)?;
        let implementation = self.resolve(None, component_keys::USECASE, component)?;
        self.check_direction(&implementation, &port)?;

        let naming = &self.descriptor.naming_conventions;
        let port_name = naming.class_name(component_keys::USECASE_PORT, &component.name);
        let impl_name = naming.class_name(component_keys::USECASE, &component.name);
        let port_package = self.java_package(port.path(), None);
        let impl_package = self.java_package(implementation.path(), None);
        let methods = self.paradigm_methods(&component.methods);
        let imports = self.method_imports(&methods);

        let context = self
            .base_context()
            .with("portName", &port_name)
            .with("portPackage", &port_package)
            .with("implName", &impl_name)
            .with("implPackage", &impl_package)
            .with("methods", declarations(&methods))
            .with("methodImplementations", stub_implementations(&methods, self.project.paradigm, true))
            .with("imports", imports);

        let port_target = self.java_file(self.module_of(port.path())?, &port_package, &port_name);
        let impl_target =
            self.java_file(self.module_of(implementation.path())?, &impl_package, &impl_name);

        Ok(GenerationPlan {
            artifacts: vec![
                PlannedArtifact::new(
                    port_target,
                    self.template_id(templates::USECASE_PORT),
                    context.clone().with("package", &port_package),
                )
                .resolved(port),
                PlannedArtifact::new(
                    impl_target,
                    self.template_id(templates::USECASE_IMPL),
                    context.with("package", &impl_package),
                )
                .resolved(implementation),
            ],
            ..GenerationPlan::default()
        })
    }

    fn plan_adapter(
        &self,
        component: &ComponentConfig,
        adapter: &AdapterDescriptor,
    ) -> ArchforgeResult<GenerationPlan> {
        let kind = component
            .kind
            .adapter_kind()
            .ok_or_else(|| ArchforgeError::Internal {
                message: format!("{} is not an adapter", component.kind),
            })?;
        let resolved = self.resolve(Some(kind), kind, component)?;
        let owner = component.entity.as_deref().unwrap_or_default();
        let owner_component = ComponentConfig {
            name: owner.to_string(),
            ..component.clone()
        };

        // Driven adapters serve an entity; driving adapters call a use case.
        let (owner_key, owner_class) = if component.kind == ComponentKind::OutputAdapter {
            (
                component_keys::ENTITY,
                self.descriptor
                    .naming_conventions
                    .class_name(component_keys::ENTITY, owner),
            )
        } else {
            (
                component_keys::USECASE_PORT,
                self.descriptor
                    .naming_conventions
                    .class_name(component_keys::USECASE_PORT, owner),
            )
        };
        let owner_path = self.resolve(None, owner_key, &owner_component)?;
        self.check_direction(&resolved, &owner_path)?;

        let as_module =
            self.project.adapters_as_modules && component.kind == ComponentKind::OutputAdapter;
        let module = if as_module {
            Some(resolved.path().to_string())
        } else {
            self.module_of(resolved.path())?.map(str::to_string)
        };

        let class_name = self
            .descriptor
            .naming_conventions
            .class_name(kind, &component.name);
        let package = self.java_package(resolved.path(), None);
        let owner_package = self.java_package(owner_path.path(), None);
        let methods = self.paradigm_methods(&component.methods);

        let mut context = self
            .base_context()
            .with("adapterPackage", &package)
            .with("adapterName", &component.name)
            .with("adapterType", &adapter.name)
            .with("className", &class_name)
            .with("methods", declarations(&methods))
            .with("imports", self.method_imports(&methods));
        if component.kind == ComponentKind::OutputAdapter {
            context = context
                .with("entityName", &owner_class)
                .with("entityPackage", &owner_package)
                .with("entityVariable", to_camel_case(&owner_class))
                .with("mapperName", format!("{owner_class}Mapper"))
                .with("dataName", format!("{owner_class}Data"))
                .with(
                    "methodImplementations",
                    stub_implementations(&methods, self.project.paradigm, false),
                );
        } else {
            let use_case_variable = to_camel_case(&owner_class);
            context = context
                .with("useCaseName", &owner_class)
                .with("useCasePackage", &owner_package)
                .with("useCaseVariable", &use_case_variable)
                .with("basePath", format!("/api/{}", to_kebab_case(&component.name)))
                .with(
                    "methodImplementations",
                    delegating_implementations(&methods, &use_case_variable),
                );
        }

        let mut plan = GenerationPlan::default();
        let file_context = RenderContext::new()
            .with("className", &class_name)
            .with("entity", &owner_class)
            .with("name", &component.name);

        for artifact in &adapter.artifacts {
            let artifact_package = match artifact.subpackage.as_deref() {
                Some(sub) if !sub.is_empty() => format!("{package}.{sub}"),
                _ => package.clone(),
            };
            let file_name = substitute_placeholders(&artifact.file_name, &file_context);
            let target = self
                .source_root(module.as_deref())
                .join(package_dir(&artifact_package))
                .join(file_name);
            let template_id = self.adapter_template_id(adapter, &artifact.template);
            plan.artifacts.push(
                PlannedArtifact::new(
                    target,
                    template_id,
                    context.clone().with("package", artifact_package),
                )
                .resolved(resolved.clone()),
            );
        }

        let overrides = &self.project.dependency_overrides;
        let dependencies: Vec<(DependencySpec, &'static str)> = adapter
            .dependencies
            .iter()
            .map(|d| (d.with_overrides(overrides), "implementation"))
            .chain(
                adapter
                    .test_dependencies
                    .iter()
                    .map(|d| (d.with_overrides(overrides), "testImplementation")),
            )
            .collect();

        if as_module {
            let module_dir = resolved.path();
            let gradle_path = module_dir.replace('/', ":");
            let mut lines = Vec::new();
            if let Some(owner_module) = self.module_of(owner_path.path())? {
                lines.push(format!(
                    "implementation(project(\":{}\"))",
                    owner_module.replace('/', ":")
                ));
            }
            lines.extend(dependencies.iter().map(|(spec, cfg)| spec.declaration(cfg)));

            plan.artifacts.push(PlannedArtifact::new(
                Path::new(module_dir).join(BUILD_FILE),
                self.template_id(templates::ADAPTER_BUILD),
                self.base_context()
                    .with("moduleName", module_dir)
                    .with("adapterType", &adapter.name)
                    .with("description", adapter.description.clone().unwrap_or_default())
                    .with("dependencies", indent_lines(&lines)),
            ));
            plan.shared_edits.push(SharedEdit::IncludeModule {
                file: PathBuf::from(SETTINGS_FILE),
                module: gradle_path.clone(),
            });
            plan.shared_edits.push(SharedEdit::AddDependency {
                file: self.entry_build_file(),
                declaration: format!("implementation(project(\":{gradle_path}\"))"),
            });
        } else {
            let build_file = build_file_in(module.as_deref());
            plan.dependencies
                .extend(dependencies.into_iter().map(|(spec, configuration)| {
                    PlannedDependency {
                        build_file: build_file.clone(),
                        spec,
                        configuration,
                    }
                }));
        }

        if let Some(properties) = adapter.application_properties.as_ref() {
            if !properties.is_empty() {
                plan.shared_edits.push(SharedEdit::MergeYaml {
                    file: self.application_config(),
                    overlay: properties.clone(),
                });
            }
        }

        Ok(plan)
    }

    // -------------------------------------------------------------------------
    // Project skeleton
    // -------------------------------------------------------------------------

    fn plan_project(&self, config: &ProjectConfig) -> ArchforgeResult<GenerationPlan> {
        let mut plan = GenerationPlan::default();
        let context = self
            .base_context()
            .with("projectName", &config.name)
            .with("architecture", &config.architecture)
            .with("toolVersion", &config.tool_version)
            .with("applicationClass", format!("{}Application", to_pascal_case(&config.name)));

        plan.artifacts
            .push(PlannedArtifact::inline(ProjectConfig::FILE_NAME, config.to_yaml()?));

        let includes = self
            .descriptor
            .modules
            .iter()
            .map(|m| format!("include(\"{}\")", m.replace('/', ":")))
            .collect::<Vec<_>>()
            .join("\n");
        plan.artifacts.push(PlannedArtifact::new(
            SETTINGS_FILE,
            self.template_id(templates::SETTINGS),
            context.clone().with("includes", includes),
        ));

        if self.descriptor.is_multi_module() {
            plan.artifacts.push(PlannedArtifact::new(
                BUILD_FILE,
                self.template_id(templates::ROOT_BUILD),
                context.clone(),
            ));
            for module in &self.descriptor.modules {
                plan.artifacts.push(self.module_build(module, &context)?);
                let package = self.java_package(module, None);
                plan.artifacts.push(PlannedArtifact::new(
                    self.java_file(Some(module), &package, "package-info"),
                    self.template_id(templates::PACKAGE_INFO),
                    context.clone().with("package", package),
                ));
            }
            if self.descriptor.entry_module.is_none() {
                plan.artifacts.push(PlannedArtifact::new(
                    BUILD_FILE,
                    self.template_id(templates::APP_BUILD),
                    context.clone().with("projectDependencies", ""),
                ));
            }
        } else {
            plan.artifacts.push(PlannedArtifact::new(
                BUILD_FILE,
                self.template_id(templates::APP_BUILD),
                context.clone().with("projectDependencies", ""),
            ));
            for package_path in &self.descriptor.packages {
                let package = self.java_package(package_path, None);
                plan.artifacts.push(PlannedArtifact::new(
                    self.java_file(None, &package, "package-info"),
                    self.template_id(templates::PACKAGE_INFO),
                    context.clone().with("package", package),
                ));
            }
        }

        let entry = self.descriptor.entry_module.as_deref();
        let application_class = context.get("applicationClass").unwrap_or("Application").to_string();
        plan.artifacts.push(PlannedArtifact::new(
            self.java_file(entry, &self.project.base_namespace, &application_class),
            self.template_id(templates::APP_MAIN),
            context.clone().with("package", &self.project.base_namespace),
        ));
        plan.artifacts.push(PlannedArtifact::new(
            self.application_config(),
            self.template_id(templates::APP_CONFIG),
            context.clone(),
        ));
        plan.artifacts.push(PlannedArtifact::new(
            ".gitignore",
            self.template_id(templates::GITIGNORE),
            context.clone(),
        ));
        plan.artifacts.push(PlannedArtifact::new(
            "README.md",
            self.template_id(templates::README),
            context,
        ));

        // A root build file may be planned twice for multi-module layouts
        // without an entry module; keep the application one.
        let mut seen = BTreeSet::new();
        let mut deduped = Vec::with_capacity(plan.artifacts.len());
        for artifact in plan.artifacts.into_iter().rev() {
            if seen.insert(artifact.target.clone()) {
                deduped.push(artifact);
            }
        }
        deduped.reverse();
        plan.artifacts = deduped;
        Ok(plan)
    }

    /// Build file for one module of a multi-module project.
    ///
    /// A module depends on every other module whose layer its own layer may
    /// depend on, and on modules of its own layer declared before it. The
    /// entry module depends on all of them.
    fn module_build(&self, module: &str, context: &RenderContext) -> ArchforgeResult<PlannedArtifact> {
        let is_entry = self.descriptor.entry_module.as_deref() == Some(module);
        let graph = &self.descriptor.layer_dependencies;
        let validator = LayerDependencyValidator::new(graph);

        let modules = &self.descriptor.modules;
        let own_index = modules.iter().position(|m| m == module);

        let dependencies: Vec<String> = modules
            .iter()
            .enumerate()
            .filter(|(_, other)| other.as_str() != module)
            .filter(|(index, other)| {
                if is_entry {
                    return true;
                }
                match (extract_layer(module), extract_layer(other)) {
                    (Some(from), Some(to)) if from != to => validator.can_depend_on(from, to),
                    (Some(_), Some(_)) => own_index.is_some_and(|own| *index < own),
                    _ => false,
                }
            })
            .map(|(_, other)| other)
            .map(|other| format!("implementation(project(\":{}\"))", other.replace('/', ":")))
            .collect();

        let (template, key) = if is_entry {
            (templates::APP_BUILD, "projectDependencies")
        } else {
            (templates::MODULE_BUILD, "dependencies")
        };
        Ok(PlannedArtifact::new(
            Path::new(module).join(BUILD_FILE),
            self.template_id(template),
            context
                .clone()
                .with("moduleName", module)
                .with(key, indent_lines(&dependencies)),
        ))
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn base_context(&self) -> RenderContext {
        RenderContext::new()
            .with("basePackage", &self.project.base_namespace)
            .with("framework", self.project.framework.as_str())
            .with("paradigm", self.project.paradigm.as_str())
    }

    fn resolve(
        &self,
        adapter_kind: Option<&str>,
        component_key: &str,
        component: &ComponentConfig,
    ) -> Result<ResolvedPath, DomainError> {
        let mut context = RenderContext::new();
        if let Some(module) = &component.module {
            context.insert("module", module);
        }
        if let Some(adapter) = &component.adapter_type {
            context.insert("adapter", adapter);
        }
        PathResolver::new(self.descriptor).resolve(
            adapter_kind,
            component_key,
            &to_kebab_case(&component.name),
            &context,
        )
    }

    /// `from` must be allowed to depend on `to` when both layers are known
    /// and differ. Skipped for descriptors without a layer graph.
    fn check_direction(&self, from: &ResolvedPath, to: &ResolvedPath) -> Result<(), DomainError> {
        if !self.descriptor.has_layer_dependencies() {
            return Ok(());
        }
        match (from.layer(), to.layer()) {
            (Some(f), Some(t)) if f != t => LayerDependencyValidator::new(
                &self.descriptor.layer_dependencies,
            )
            .validate_dependency(f, t),
            _ => Ok(()),
        }
    }

    fn template_id(&self, template: &str) -> String {
        substitute_placeholders(
            template,
            &RenderContext::new()
                .with("framework", self.project.framework.as_str())
                .with("paradigm", self.project.paradigm.as_str()),
        )
    }

    fn adapter_template_id(&self, adapter: &AdapterDescriptor, template: &str) -> String {
        self.template_id(&substitute_placeholders(
            template,
            &RenderContext::new()
                .with("adapter", &adapter.name)
                .with("kindDir", kind_dir(&adapter.kind)),
        ))
    }

    /// Module owning `path`. Multi-module layouts have no root source set,
    /// so a path outside every module cannot be placed.
    fn module_of(&self, path: &str) -> Result<Option<&'a str>, DomainError> {
        if !self.descriptor.is_multi_module() {
            return Ok(None);
        }
        self.descriptor
            .module_for(path)
            .map(Some)
            .ok_or_else(|| DomainError::OutsideModules {
                path: path.to_string(),
                modules: self.descriptor.modules.clone(),
            })
    }

    /// `infrastructure/driven-adapters/redis` → `{ns}.infrastructure.drivenadapters.redis`.
    fn java_package(&self, resolved: &str, sub: Option<&str>) -> String {
        let mut package = self.project.base_namespace.clone();
        for segment in resolved.split('/').filter(|s| !s.is_empty()) {
            package.push('.');
            package.extend(
                segment
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                    .map(|c| c.to_ascii_lowercase()),
            );
        }
        if let Some(sub) = sub {
            package.push('.');
            package.push_str(sub);
        }
        package
    }

    fn source_root(&self, module: Option<&str>) -> PathBuf {
        match module {
            Some(m) => Path::new(m).join(JAVA_ROOT),
            None => PathBuf::from(JAVA_ROOT),
        }
    }

    fn java_file(&self, module: Option<&str>, package: &str, class_name: &str) -> PathBuf {
        self.source_root(module)
            .join(package_dir(package))
            .join(format!("{class_name}.java"))
    }

    fn entry_build_file(&self) -> PathBuf {
        build_file_in(self.descriptor.entry_module.as_deref())
    }

    fn application_config(&self) -> PathBuf {
        let resources = match self.descriptor.entry_module.as_deref() {
            Some(m) => Path::new(m).join(RESOURCES_ROOT),
            None => PathBuf::from(RESOURCES_ROOT),
        };
        resources.join(APPLICATION_YML)
    }

    fn paradigm_methods(&self, methods: &[MethodSignature]) -> Vec<MethodSignature> {
        methods
            .iter()
            .map(|m| MethodSignature {
                return_type: paradigm_type(&m.return_type, self.project.paradigm),
                ..m.clone()
            })
            .collect()
    }

    fn method_imports(&self, methods: &[MethodSignature]) -> String {
        let types = methods.iter().flat_map(|m| {
            std::iter::once(m.return_type.as_str()).chain(m.parameters.iter().map(|p| p.ty.as_str()))
        });
        java_imports(types, self.project.paradigm == Paradigm::Reactive)
    }
}

fn build_file_in(module: Option<&str>) -> PathBuf {
    match module {
        Some(m) => Path::new(m).join(BUILD_FILE),
        None => PathBuf::from(BUILD_FILE),
    }
}

fn package_dir(package: &str) -> PathBuf {
    package.split('.').collect()
}

fn kind_dir(kind: &str) -> &'static str {
    if kind == "driving" {
        "entry-points"
    } else {
        "driven-adapters"
    }
}

fn indent_lines(lines: &[String]) -> String {
    lines
        .iter()
        .map(|l| format!("    {l}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap a return type for the paradigm: `User` → `Mono<User>`,
/// `List<User>` → `Flux<User>`, `void` → `Mono<Void>` when reactive.
pub fn paradigm_type(return_type: &str, paradigm: Paradigm) -> String {
    let ty = return_type.trim();
    if paradigm == Paradigm::Imperative || ty.starts_with("Mono<") || ty.starts_with("Flux<") {
        return ty.to_string();
    }
    if ty == "void" || ty == "Void" {
        return "Mono<Void>".to_string();
    }
    for collection in ["List<", "Set<", "Collection<"] {
        if let Some(inner) = ty.strip_prefix(collection).and_then(|r| r.strip_suffix('>')) {
            return format!("Flux<{inner}>");
        }
    }
    format!("Mono<{ty}>")
}

fn declarations(methods: &[MethodSignature]) -> String {
    methods
        .iter()
        .map(|m| format!("    {m};"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn stub_body(method: &MethodSignature, paradigm: Paradigm) -> String {
    let message = format!("\"{} is not implemented yet\"", method.name);
    match paradigm {
        Paradigm::Reactive if method.return_type.starts_with("Flux<") => {
            format!("return Flux.error(new UnsupportedOperationException({message}));")
        }
        Paradigm::Reactive => {
            format!("return Mono.error(new UnsupportedOperationException({message}));")
        }
        Paradigm::Imperative => format!("throw new UnsupportedOperationException({message});"),
    }
}

fn stub_implementations(methods: &[MethodSignature], paradigm: Paradigm, overrides: bool) -> String {
    methods
        .iter()
        .map(|m| {
            let annotation = if overrides { "    @Override\n" } else { "" };
            format!(
                "{annotation}    public {m} {{\n        {}\n    }}",
                stub_body(m, paradigm)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn delegating_implementations(methods: &[MethodSignature], target: &str) -> String {
    methods
        .iter()
        .map(|m| {
            let call = format!("{target}.{}({})", m.name, m.argument_list());
            let body = if m.return_type == "void" {
                format!("{call};")
            } else {
                format!("return {call};")
            };
            format!("    public {m} {{\n        {body}\n    }}")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

const KNOWN_IMPORTS: &[(&str, &str)] = &[
    ("BigDecimal", "java.math.BigDecimal"),
    ("Collection", "java.util.Collection"),
    ("Instant", "java.time.Instant"),
    ("List", "java.util.List"),
    ("LocalDate", "java.time.LocalDate"),
    ("LocalDateTime", "java.time.LocalDateTime"),
    ("Map", "java.util.Map"),
    ("Optional", "java.util.Optional"),
    ("Set", "java.util.Set"),
    ("UUID", "java.util.UUID"),
];

/// Sorted `import` lines for JDK types mentioned in `types`.
fn java_imports<'t>(types: impl IntoIterator<Item = &'t str>, reactive: bool) -> String {
    let mut imports = BTreeSet::new();
    for ty in types {
        for token in ty.split(|c: char| !c.is_ascii_alphanumeric()) {
            if let Some((_, path)) = KNOWN_IMPORTS.iter().find(|(name, _)| *name == token) {
                imports.insert(*path);
            }
            if reactive && (token == "Mono" || token == "Flux") {
                imports.insert("reactor.core.publisher.Flux");
                imports.insert("reactor.core.publisher.Mono");
            }
        }
    }
    imports
        .into_iter()
        .map(|i| format!("import {i};"))
        .collect::<Vec<_>>()
        .join("\n")
}
