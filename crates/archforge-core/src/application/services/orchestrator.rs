//! Generation orchestrator - the request state machine.
//!
//! ```text
//! VALIDATING → RESOLVING → RENDERING → BACKING_UP → WRITING
//!            → MERGING_SHARED_FILES → COMMITTED
//! ```
//!
//! `FAILED` is reachable from every non-terminal stage and closes the stage
//! trail carried by [`ArchforgeError::Aborted`]. Nothing touches the
//! project before BACKING_UP; a failure from BACKING_UP onwards removes the
//! files this request created and restores the snapshot before the error is
//! returned. The snapshot is deleted only once the request is committed.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::application::ports::{FileStore, MetadataSource, Renderer};
use crate::application::services::backup::BackupCoordinator;
use crate::application::services::metadata_resolver::StructureMetadataResolver;
use crate::application::services::planner::{GenerationPlan, GenerationPlanner};
use crate::domain::dependency::{detect_version_conflicts, is_declared};
use crate::domain::{
    ArtifactSource, ComponentValidator, DomainError, GeneratedArtifact,
    GenerationRequest, ProjectConfig, SharedEdit,
};
use crate::error::{ArchforgeError, ArchforgeResult};

/// Stages of one generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenerationStage {
    Validating,
    Resolving,
    Rendering,
    BackingUp,
    Writing,
    MergingSharedFiles,
    Committed,
    Failed,
}

impl GenerationStage {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Committed | Self::Failed)
    }

    /// Whether a failure in this stage may have touched the project.
    pub const fn mutates(&self) -> bool {
        matches!(
            self,
            Self::BackingUp | Self::Writing | Self::MergingSharedFiles
        )
    }
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Validating => "validating",
            Self::Resolving => "resolving",
            Self::Rendering => "rendering",
            Self::BackingUp => "backing up",
            Self::Writing => "writing",
            Self::MergingSharedFiles => "merging shared files",
            Self::Committed => "committed",
            Self::Failed => "failed",
        })
    }
}

/// Outcome of a committed request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationReport {
    /// Files rendered and written, relative to the project root.
    pub artifacts: Vec<PathBuf>,
    /// Shared files changed by incremental edits.
    pub edited_files: Vec<PathBuf>,
    /// Shared files that already satisfied every edit.
    pub unchanged_files: Vec<PathBuf>,
    /// Dotted key paths added to YAML documents.
    pub added_keys: Vec<String>,
    /// Merge conflicts; the existing value was kept for each.
    pub conflicts: Vec<String>,
    pub warnings: Vec<String>,
    pub stages: Vec<GenerationStage>,
}

impl GenerationReport {
    fn enter(&mut self, stage: GenerationStage) {
        debug!(%stage, "Entering stage");
        self.stages.push(stage);
    }

    /// Move to FAILED and build the error for a request that stopped in `stage`.
    fn fail(
        &mut self,
        stage: GenerationStage,
        rolled_back: bool,
        errors: Vec<ArchforgeError>,
    ) -> ArchforgeError {
        self.enter(GenerationStage::Failed);
        debug!(%stage, failures = errors.len(), "Request failed");
        ArchforgeError::Aborted {
            stage,
            rolled_back,
            errors,
            stages: self.stages.clone(),
        }
    }

    fn record_shared(&mut self, file: &Path, changed: bool) {
        let (target, other) = if changed {
            (&mut self.edited_files, &mut self.unchanged_files)
        } else {
            (&mut self.unchanged_files, &mut self.edited_files)
        };
        if changed {
            other.retain(|p| p != file);
        } else if other.iter().any(|p| p == file) {
            return;
        }
        if !target.iter().any(|p| p == file) {
            target.push(file.to_path_buf());
        }
    }
}

/// Files touched so far, for rollback.
#[derive(Default)]
struct Journal {
    backup_id: Option<String>,
    created: Vec<PathBuf>,
    /// Directories that did not exist before this request, relative to the
    /// project root.
    created_dirs: Vec<PathBuf>,
}

impl Journal {
    fn record_created<F: Fn(&Path) -> bool>(&mut self, target: &Path, exists: &F) {
        if !self.created.iter().any(|p| p == target) {
            self.created.push(target.to_path_buf());
        }
        if let Some(parent) = target.parent() {
            self.record_new_dirs(parent, exists);
        }
    }

    /// `dir` and its ancestors up to the first one that already exists.
    fn record_new_dirs<F: Fn(&Path) -> bool>(&mut self, dir: &Path, exists: &F) {
        for dir in dir.ancestors() {
            if dir.as_os_str().is_empty() || exists(dir) {
                break;
            }
            if !self.created_dirs.iter().any(|d| d == dir) {
                self.created_dirs.push(dir.to_path_buf());
            }
        }
    }

    /// New directories, deepest first.
    fn dirs_for_removal(&self) -> Vec<&Path> {
        let mut dirs: Vec<&Path> = self.created_dirs.iter().map(PathBuf::as_path).collect();
        dirs.sort_by_key(|d| std::cmp::Reverse(d.components().count()));
        dirs
    }
}

pub struct GenerationOrchestrator {
    metadata: StructureMetadataResolver,
    renderer: Arc<dyn Renderer>,
    store: Arc<dyn FileStore>,
    backups: BackupCoordinator,
}

impl GenerationOrchestrator {
    /// `backup_dir` is relative to each request's project root.
    pub fn new(
        metadata: Arc<dyn MetadataSource>,
        renderer: Arc<dyn Renderer>,
        store: Arc<dyn FileStore>,
        backup_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            metadata: StructureMetadataResolver::new(metadata),
            renderer,
            backups: BackupCoordinator::new(store.clone(), backup_dir),
            store,
        }
    }

    pub fn backups(&self) -> &BackupCoordinator {
        &self.backups
    }

    /// Run one request to completion or to a fully reported failure.
    #[instrument(
        skip_all,
        fields(
            kind = %request.component.kind,
            name = %request.component.name,
            root = %request.root.display()
        )
    )]
    pub fn generate(&self, request: &GenerationRequest) -> ArchforgeResult<GenerationReport> {
        let mut report = GenerationReport::default();

        // 1. VALIDATING
        report.enter(GenerationStage::Validating);
        let errors: Vec<ArchforgeError> =
            ComponentValidator::validate(&request.component, &request.project)
                .into_iter()
                .map(ArchforgeError::from)
                .collect();
        if !errors.is_empty() {
            return Err(report.fail(GenerationStage::Validating, false, errors));
        }

        // 2. RESOLVING
        report.enter(GenerationStage::Resolving);
        let (plan, edits) = match self.resolve(request, &mut report) {
            Ok(resolved) => resolved,
            Err(errors) => return Err(report.fail(GenerationStage::Resolving, false, errors)),
        };

        // 3. RENDERING
        report.enter(GenerationStage::Rendering);
        let generated = self
            .render(&plan)
            .map_err(|errors| report.fail(GenerationStage::Rendering, false, errors))?;

        // 4. BACKING_UP
        report.enter(GenerationStage::BackingUp);
        let mut journal = Journal::default();
        if let Err(e) = self.back_up(&request.root, &generated, &edits, &mut journal) {
            return Err(self.roll_back(
                &request.root,
                GenerationStage::BackingUp,
                e,
                journal,
                &mut report,
            ));
        }

        // 5. WRITING
        report.enter(GenerationStage::Writing);
        for artifact in &generated {
            if let Err(e) = self.store.write(&request.root.join(&artifact.path), &artifact.content) {
                return Err(self.roll_back(
                    &request.root,
                    GenerationStage::Writing,
                    e,
                    journal,
                    &mut report,
                ));
            }
            report.artifacts.push(artifact.path.clone());
        }

        // 6. MERGING_SHARED_FILES
        report.enter(GenerationStage::MergingSharedFiles);
        for edit in &edits {
            if let Err(e) = self.apply_edit(&request.root, edit, &mut report) {
                return Err(self.roll_back(
                    &request.root,
                    GenerationStage::MergingSharedFiles,
                    e,
                    journal,
                    &mut report,
                ));
            }
        }

        // 7. COMMITTED
        if let Some(id) = &journal.backup_id {
            if let Err(e) = self.backups.delete_backup(&request.root, id) {
                warn!(backup_id = %id, error = %e, "Could not delete backup after commit");
                report
                    .warnings
                    .push(format!("backup '{id}' could not be deleted: {e}"));
            }
        }
        report.enter(GenerationStage::Committed);
        info!(
            artifacts = report.artifacts.len(),
            edited = report.edited_files.len(),
            conflicts = report.conflicts.len(),
            "Generation committed"
        );
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Stages
    // -------------------------------------------------------------------------

    fn resolve(
        &self,
        request: &GenerationRequest,
        report: &mut GenerationReport,
    ) -> Result<(GenerationPlan, Vec<SharedEdit>), Vec<ArchforgeError>> {
        let descriptor = self
            .metadata
            .load(&request.project.architecture)
            .map_err(|e| vec![e])?;
        let planner = GenerationPlanner::new(&descriptor, &request.project);

        let adapter = match planner.adapter_query(&request.component) {
            Some(query) => Some(self.metadata.load_adapter(&query).map_err(|e| vec![e])?),
            None => None,
        };
        let plan = planner
            .plan(
                &request.component,
                adapter.as_ref(),
                request.project_config.as_ref(),
            )
            .map_err(|e| vec![e])?;

        let existing: Vec<ArchforgeError> = plan
            .artifacts
            .iter()
            .filter(|a| {
                let config_file = a.target == Path::new(ProjectConfig::FILE_NAME);
                (!request.force || config_file) && self.store.exists(&request.root.join(&a.target))
            })
            .map(|a| DomainError::ArtifactExists { path: a.target.clone() }.into())
            .collect();
        if !existing.is_empty() {
            return Err(existing);
        }

        let mut edits = plan.shared_edits.clone();
        let mut by_file: BTreeMap<&Path, Vec<_>> = BTreeMap::new();
        for dependency in &plan.dependencies {
            by_file
                .entry(dependency.build_file.as_path())
                .or_default()
                .push(dependency);
        }
        for (file, dependencies) in by_file {
            let path = request.root.join(file);
            let script = if self.store.exists(&path) {
                self.store.read(&path).map_err(|e| vec![e])?
            } else {
                String::new()
            };
            let specs: Vec<_> = dependencies.iter().map(|d| d.spec.clone()).collect();
            for conflict in detect_version_conflicts(&script, &specs) {
                warn!(file = %file.display(), "{conflict}");
                report.warnings.push(conflict.to_string());
            }
            edits.extend(
                dependencies
                    .into_iter()
                    .filter(|d| !is_declared(&script, &d.spec))
                    .map(|d| SharedEdit::AddDependency {
                        file: file.to_path_buf(),
                        declaration: d.declaration(),
                    }),
            );
        }

        Ok((plan, edits))
    }

    fn render(&self, plan: &GenerationPlan) -> Result<Vec<GeneratedArtifact>, Vec<ArchforgeError>> {
        let mut generated = Vec::with_capacity(plan.artifacts.len());
        let mut errors = Vec::new();
        for artifact in &plan.artifacts {
            let content = match &artifact.source {
                ArtifactSource::Inline(text) => Ok(text.clone()),
                ArtifactSource::Template {
                    template_id,
                    context,
                } => self.renderer.render(template_id, context),
            };
            match content {
                Ok(text) => generated.push(GeneratedArtifact::new(&artifact.target, text)),
                Err(e) => errors.push(e),
            }
        }
        if errors.is_empty() {
            Ok(generated)
        } else {
            Err(errors)
        }
    }

    fn back_up(
        &self,
        root: &Path,
        generated: &[GeneratedArtifact],
        edits: &[SharedEdit],
        journal: &mut Journal,
    ) -> ArchforgeResult<()> {
        let exists = |path: &Path| self.store.exists(&root.join(path));
        let mut existing = Vec::new();
        let targets = generated
            .iter()
            .map(|a| a.path.as_path())
            .chain(edits.iter().map(SharedEdit::file));
        for target in targets {
            if self.store.exists(&root.join(target)) {
                if !existing.iter().any(|p: &PathBuf| p == target) {
                    existing.push(target.to_path_buf());
                }
            } else {
                journal.record_created(target, &exists);
            }
        }

        if !existing.is_empty() {
            journal.record_new_dirs(self.backups.backup_dir(), &exists);
            journal.backup_id = Some(self.backups.create_backup(root, &existing)?);
        }
        Ok(())
    }

    fn apply_edit(
        &self,
        root: &Path,
        edit: &SharedEdit,
        report: &mut GenerationReport,
    ) -> ArchforgeResult<()> {
        let path = root.join(edit.file());
        let current = if self.store.exists(&path) {
            Some(self.store.read(&path)?)
        } else {
            None
        };

        let outcome = edit.apply(current.as_deref())?;
        for conflict in &outcome.conflicts {
            warn!(file = %edit.file().display(), "{conflict}");
            report.conflicts.push(conflict.to_string());
        }
        report.added_keys.extend(outcome.added_keys.iter().cloned());

        if let Some(content) = &outcome.content {
            self.store.write(&path, content)?;
            debug!(file = %edit.file().display(), edit = %edit.describe(), "Shared file updated");
        }
        report.record_shared(edit.file(), outcome.changed());
        Ok(())
    }

    /// Undo everything recorded in `journal`, then build the failure.
    fn roll_back(
        &self,
        root: &Path,
        stage: GenerationStage,
        cause: ArchforgeError,
        journal: Journal,
        report: &mut GenerationReport,
    ) -> ArchforgeError {
        warn!(%stage, error = %cause, "Stage failed, rolling back");
        let mut errors = vec![cause];
        let mut clean = true;
        let mut restored = true;

        for created in journal.created.iter().rev() {
            if let Err(e) = self.store.remove(&root.join(created)) {
                warn!(path = %created.display(), error = %e, "Could not remove created file");
                clean = false;
                errors.push(e);
            }
        }

        if let Some(id) = &journal.backup_id {
            match self.backups.restore_backup(root, id) {
                Ok(()) => {
                    if let Err(e) = self.backups.delete_backup(root, id) {
                        warn!(backup_id = %id, error = %e, "Could not delete restored backup");
                    }
                }
                Err(e) => {
                    warn!(backup_id = %id, error = %e, "Restore failed");
                    clean = false;
                    restored = false;
                    errors.push(e);
                }
            }
        }

        // Last: the backup itself may live in a new directory, and it must
        // survive a failed restore.
        let dirs = if restored { journal.dirs_for_removal() } else { Vec::new() };
        for dir in dirs {
            if let Err(e) = self.store.remove(&root.join(dir)) {
                warn!(path = %dir.display(), error = %e, "Could not remove created directory");
                clean = false;
                errors.push(e);
            }
        }

        if clean {
            info!("Rollback successful");
        }
        report.fail(stage, clean && stage.mutates(), errors)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::application::ports::AdapterQuery;
    use crate::application::ports::output::{MockMetadataSource, MockRenderer};
    use crate::application::services::testing::InMemoryStore;
    use crate::application::ApplicationError;
    use crate::domain::{
        AdapterDescriptor, ArchitectureDescriptor, ArtifactTemplate, ComponentConfig, ComponentKind,
        DependencySpec, Framework, LayerDependencies, Paradigm, ProjectContext,
    };

    const ROOT: &str = "/work/shop";

    fn descriptor() -> ArchitectureDescriptor {
        ArchitectureDescriptor::new(
            "hexagonal-single",
            [
                ("driven", "infrastructure/adapters/out/{name}"),
                ("driving", "infrastructure/adapters/in/{name}"),
            ],
        )
        .with_layers(LayerDependencies::from_pairs([
            ("infrastructure", &["application", "domain"][..]),
            ("application", &["domain"][..]),
            ("domain", &[][..]),
        ]))
    }

    fn redis() -> AdapterDescriptor {
        AdapterDescriptor {
            name: "redis".into(),
            kind: "driven".into(),
            description: None,
            dependencies: vec![
                DependencySpec::new("org.springframework.boot", "spring-boot-starter-data-redis")
                    .version("3.2.0"),
            ],
            test_dependencies: vec![],
            application_properties: Some(
                serde_yaml::from_str("spring:\n  data:\n    redis:\n      host: localhost\n      port: 6379\n")
                    .unwrap(),
            ),
            artifacts: vec![ArtifactTemplate {
                template: "adapters/{adapter}/Adapter.java.tpl".into(),
                file_name: "{className}.java".into(),
                subpackage: None,
            }],
        }
    }

    fn metadata() -> MockMetadataSource {
        let mut source = MockMetadataSource::new();
        source
            .expect_load_architecture()
            .returning(|_| Ok(descriptor()));
        source
            .expect_load_adapter()
            .returning(|_: &AdapterQuery| Ok(redis()));
        source
    }

    fn echo_renderer() -> MockRenderer {
        let mut renderer = MockRenderer::new();
        renderer
            .expect_render()
            .returning(|id, ctx| Ok(format!("{id} {}", ctx.get("className").unwrap_or_default())));
        renderer
    }

    fn request() -> GenerationRequest {
        let project = ProjectContext {
            base_namespace: "com.acme".into(),
            architecture: "hexagonal-single".into(),
            paradigm: Paradigm::Imperative,
            framework: Framework::Spring,
            adapters_as_modules: false,
            dependency_overrides: BTreeMap::new(),
        };
        let component = ComponentConfig::new(ComponentKind::OutputAdapter, "UserRepository")
            .entity("User")
            .adapter_type("redis");
        GenerationRequest::new(ROOT, project, component)
    }

    fn orchestrator(store: Arc<InMemoryStore>, renderer: MockRenderer) -> GenerationOrchestrator {
        GenerationOrchestrator::new(Arc::new(metadata()), Arc::new(renderer), store, ".archforge/backups")
    }

    fn seed(store: &InMemoryStore) {
        store.put(
            "/work/shop/build.gradle.kts",
            "dependencies {\n    implementation(\"org.springframework.boot:spring-boot-starter-data-redis:3.1.0\")\n}\n",
        );
        store.put(
            "/work/shop/src/main/resources/application.yml",
            "spring:\n  data:\n    redis:\n      port: 6380\n",
        );
    }

    #[test]
    fn commits_and_reports_every_stage() {
        let store = Arc::new(InMemoryStore::new());
        seed(&store);
        let report = orchestrator(store.clone(), echo_renderer())
            .generate(&request())
            .unwrap();

        assert_eq!(
            report.stages,
            [
                GenerationStage::Validating,
                GenerationStage::Resolving,
                GenerationStage::Rendering,
                GenerationStage::BackingUp,
                GenerationStage::Writing,
                GenerationStage::MergingSharedFiles,
                GenerationStage::Committed,
            ]
        );
        assert_eq!(report.artifacts.len(), 1);
        assert_eq!(report.added_keys, ["spring.data.redis.host"]);
        assert_eq!(report.conflicts.len(), 1);
        // Already declared in another version: warned about, not duplicated.
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("existing version 3.1.0, new version 3.2.0"));
        assert!(
            store
                .get("/work/shop/build.gradle.kts")
                .unwrap()
                .matches("spring-boot-starter-data-redis")
                .count()
                == 1
        );
        // Backup removed after commit.
        assert!(store.paths_under("/work/shop/.archforge").is_empty());
    }

    #[test]
    fn second_run_with_force_is_a_no_op_on_shared_files() {
        let store = Arc::new(InMemoryStore::new());
        seed(&store);
        let orchestrator = orchestrator(store.clone(), echo_renderer());
        orchestrator.generate(&request()).unwrap();
        let yml = store.get("/work/shop/src/main/resources/application.yml");

        let second = orchestrator.generate(&request().force(true)).unwrap();
        assert!(second.edited_files.is_empty(), "{:?}", second.edited_files);
        assert!(second.added_keys.is_empty());
        assert_eq!(second.conflicts.len(), 1);
        assert_eq!(store.get("/work/shop/src/main/resources/application.yml"), yml);
    }

    #[test]
    fn existing_artifact_fails_resolution_without_force() {
        let store = Arc::new(InMemoryStore::new());
        let orchestrator = orchestrator(store.clone(), echo_renderer());
        orchestrator.generate(&request()).unwrap();

        let err = orchestrator.generate(&request()).unwrap_err();
        match err {
            ArchforgeError::Aborted {
                stage, rolled_back, errors, stages,
            } => {
                assert_eq!(stage, GenerationStage::Resolving);
                assert_eq!(
                    stages,
                    [
                        GenerationStage::Validating,
                        GenerationStage::Resolving,
                        GenerationStage::Failed,
                    ]
                );
                assert!(!rolled_back);
                assert!(matches!(
                    errors[..],
                    [ArchforgeError::Domain(DomainError::ArtifactExists { .. })]
                ));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn validation_errors_are_aggregated_before_any_io() {
        let store = Arc::new(InMemoryStore::new());
        let mut request = request();
        request.project.base_namespace = "Com.Acme".into();
        request.component.entity = None;

        let err = orchestrator(store.clone(), MockRenderer::new())
            .generate(&request)
            .unwrap_err();
        assert_eq!(err.causes().len(), 2);
        assert!(store.paths_under("/").is_empty());
    }

    #[test]
    fn render_failure_aborts_before_writing() {
        let store = Arc::new(InMemoryStore::new());
        seed(&store);
        let before = store.paths_under("/");
        let mut renderer = MockRenderer::new();
        renderer.expect_render().returning(|id, _| {
            Err(ApplicationError::TemplateNotFound {
                template_id: id.to_string(),
            }
            .into())
        });

        let err = orchestrator(store.clone(), renderer)
            .generate(&request())
            .unwrap_err();
        assert!(matches!(
            err,
            ArchforgeError::Aborted { stage: GenerationStage::Rendering, .. }
        ));
        assert_eq!(store.paths_under("/"), before);
    }

    #[test]
    fn write_failure_rolls_back_shared_files_and_new_files() {
        let store = Arc::new(InMemoryStore::new());
        seed(&store);
        let yml_before = store.get("/work/shop/src/main/resources/application.yml");
        let before = store.paths_under("/work/shop/src");
        store.fail_next_write_to("/work/shop/src/main/resources/application.yml");

        let err = orchestrator(store.clone(), echo_renderer())
            .generate(&request())
            .unwrap_err();
        match &err {
            ArchforgeError::Aborted { stage, rolled_back, stages, .. } => {
                assert_eq!(*stage, GenerationStage::MergingSharedFiles);
                assert!(*rolled_back);
                assert_eq!(
                    stages[3..],
                    [
                        GenerationStage::BackingUp,
                        GenerationStage::Writing,
                        GenerationStage::MergingSharedFiles,
                        GenerationStage::Failed,
                    ]
                );
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            store.get("/work/shop/src/main/resources/application.yml"),
            yml_before
        );
        assert_eq!(store.paths_under("/work/shop/src"), before);
        assert!(store.paths_under("/work/shop/.archforge").is_empty());
    }

    #[test]
    fn journal_lists_new_directories_deepest_first() {
        let existing = [Path::new("src"), Path::new("src/main")];
        let exists = |p: &Path| existing.iter().any(|e| *e == p);
        let mut journal = Journal::default();

        journal.record_created(Path::new("src/main/java/com/acme/A.java"), &exists);
        journal.record_created(Path::new("src/main/java/com/acme/mapper/M.java"), &exists);
        journal.record_created(Path::new("README.md"), &exists);
        journal.record_new_dirs(Path::new(".archforge/backups"), &exists);

        assert_eq!(journal.created.len(), 3);
        let dirs: Vec<_> = journal.dirs_for_removal();
        assert_eq!(dirs[0], Path::new("src/main/java/com/acme/mapper"));
        assert_eq!(dirs.len(), 6);
        assert!(!dirs.contains(&Path::new("src/main")));
        let depth = |d: &&Path| d.components().count();
        assert!(dirs.windows(2).all(|w| depth(&w[0]) >= depth(&w[1])));
    }

    #[test]
    fn write_failure_leaves_nothing_behind() {
        let store = Arc::new(InMemoryStore::new());
        store.fail_writes_containing("UserRepositoryAdapter");
        let err = orchestrator(store.clone(), echo_renderer())
            .generate(&request())
            .unwrap_err();

        assert!(matches!(
            err,
            ArchforgeError::Aborted { stage: GenerationStage::Writing, rolled_back: true, .. }
        ));
        assert!(store.paths_under("/work/shop").is_empty());
    }

    #[test]
    fn stage_names() {
        assert_eq!(GenerationStage::MergingSharedFiles.to_string(), "merging shared files");
        assert!(GenerationStage::Failed.is_terminal());
        assert!(!GenerationStage::Rendering.mutates());
    }
}
