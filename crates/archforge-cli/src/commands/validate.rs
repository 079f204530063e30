//! `archforge validate-templates`

use archforge_core::domain::{Framework, Paradigm, ProjectConfig};
use tracing::{debug, instrument};

use super::{Services, config_value};
use crate::{
    cli::ValidateTemplatesArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// What to validate against, after merging flags, project and defaults.
#[derive(Debug, PartialEq)]
struct Target {
    architecture: String,
    framework: Framework,
    paradigm: Paradigm,
    adapters_as_modules: bool,
}

#[instrument(skip_all)]
pub fn execute(args: ValidateTemplatesArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let services = Services::build(&config);

    // Outside a project the configured defaults apply, unless a project
    // directory was named explicitly.
    let project = match services.find_project(args.project_dir.as_deref()) {
        Ok((_, project)) => Some(project),
        Err(CliError::ProjectNotFound { .. }) if args.project_dir.is_none() => None,
        Err(e) => return Err(e),
    };
    let target = target(&args, project.as_ref(), &config)?;
    debug!(?target, "Validating templates");

    output.header(&format!(
        "Templates for {} ({} / {})",
        target.architecture, target.framework, target.paradigm
    ))?;
    let report = services.template_validation().validate(
        &target.architecture,
        target.framework,
        target.paradigm,
        target.adapters_as_modules,
    );
    output.validation(&report)?;

    if report.is_valid() {
        Ok(())
    } else {
        Err(CliError::TemplatesInvalid {
            problems: report.problems,
        })
    }
}

fn target(
    args: &ValidateTemplatesArgs,
    project: Option<&ProjectConfig>,
    config: &AppConfig,
) -> CliResult<Target> {
    let architecture = match (&args.architecture, project) {
        (Some(a), _) => a.clone(),
        (None, Some(p)) => p.architecture.clone(),
        (None, None) => config.defaults.architecture.clone(),
    };
    let framework = match (args.framework, project) {
        (Some(f), _) => f,
        (None, Some(p)) => p.framework,
        (None, None) => config_value("defaults.framework", &config.defaults.framework)?,
    };
    let paradigm = match (args.paradigm, project) {
        (Some(p), _) => p,
        (None, Some(p)) => p.paradigm,
        (None, None) => config_value("defaults.paradigm", &config.defaults.paradigm)?,
    };
    Ok(Target {
        architecture,
        framework,
        paradigm,
        adapters_as_modules: args.adapters_as_modules
            || project.is_some_and(|p| p.adapters_as_modules),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn args() -> ValidateTemplatesArgs {
        ValidateTemplatesArgs {
            architecture: None,
            paradigm: None,
            framework: None,
            adapters_as_modules: false,
            project_dir: None,
        }
    }

    fn project() -> ProjectConfig {
        ProjectConfig {
            name: "shop".into(),
            base_namespace: "com.acme.shop".into(),
            architecture: "onion-multi".into(),
            paradigm: Paradigm::Imperative,
            framework: Framework::Spring,
            tool_version: "0.1.0".into(),
            created_at: chrono::Utc::now(),
            adapters_as_modules: true,
            dependency_overrides: BTreeMap::new(),
        }
    }

    #[test]
    fn defaults_apply_outside_a_project() {
        let t = target(&args(), None, &AppConfig::default()).unwrap();
        assert_eq!(t.architecture, "hexagonal-single");
        assert_eq!(t.paradigm, Paradigm::Reactive);
        assert!(!t.adapters_as_modules);
    }

    #[test]
    fn project_settings_beat_defaults_and_flags_beat_project() {
        let p = project();
        let t = target(&args(), Some(&p), &AppConfig::default()).unwrap();
        assert_eq!(t.architecture, "onion-multi");
        assert_eq!(t.paradigm, Paradigm::Imperative);
        assert!(t.adapters_as_modules);

        let mut flags = args();
        flags.paradigm = Some(Paradigm::Reactive);
        let t = target(&flags, Some(&p), &AppConfig::default()).unwrap();
        assert_eq!(t.paradigm, Paradigm::Reactive);
    }
}
