//! `archforge init`: create a project skeleton and its `.archforge.yml`.

use std::collections::BTreeMap;

use archforge_core::domain::{
    ComponentConfig, Framework, GenerationRequest, Paradigm, ProjectConfig,
};
use tracing::{info, instrument};

use super::{Services, absolute, config_value};
use crate::{
    cli::{GlobalArgs, InitArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let project = project_config(&args, &config)?;
    let root = absolute(&args.dir)?.join(&args.name);

    info!(
        architecture = %project.architecture,
        paradigm = %project.paradigm,
        framework = %project.framework,
        root = %root.display(),
        "Initializing project"
    );

    let request = GenerationRequest::new(
        &root,
        project.context(),
        ComponentConfig::project(&project.name),
    )
    .with_project_config(project.clone());
    let report = Services::build(&config).orchestrator().generate(&request)?;

    output.report(
        &format!("Project '{}' created ({})", project.name, project.architecture),
        &root,
        &report,
    )?;

    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", root.display()))?;
        output.print("  archforge generate entity <Name> --fields name:String")?;
    }

    Ok(())
}

/// Flags first, configured defaults second.
fn project_config(args: &InitArgs, config: &AppConfig) -> CliResult<ProjectConfig> {
    let paradigm = match args.paradigm {
        Some(p) => p,
        None => config_value::<Paradigm>("defaults.paradigm", &config.defaults.paradigm)?,
    };
    let framework = match args.framework {
        Some(f) => f,
        None => config_value::<Framework>("defaults.framework", &config.defaults.framework)?,
    };

    Ok(ProjectConfig {
        name: args.name.clone(),
        base_namespace: args
            .namespace
            .clone()
            .unwrap_or_else(|| default_namespace(&args.name)),
        architecture: args
            .architecture
            .clone()
            .unwrap_or_else(|| config.defaults.architecture.clone()),
        paradigm,
        framework,
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        created_at: chrono::Utc::now(),
        adapters_as_modules: args.adapters_as_modules,
        dependency_overrides: BTreeMap::new(),
    })
}

/// `my-shop` → `com.example.myshop`.
fn default_namespace(name: &str) -> String {
    let segment: String = name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    match segment.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => format!("com.example.{segment}"),
        Some(_) => format!("com.example.p{segment}"),
        None => "com.example".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(name: &str) -> InitArgs {
        InitArgs {
            name: name.into(),
            architecture: None,
            paradigm: None,
            framework: None,
            namespace: None,
            adapters_as_modules: false,
            dir: PathBuf::from("."),
        }
    }

    #[test]
    fn namespace_is_derived_from_name() {
        assert_eq!(default_namespace("my-shop"), "com.example.myshop");
        assert_eq!(default_namespace("Shop_2"), "com.example.shop2");
        assert_eq!(default_namespace("3d"), "com.example.p3d");
        assert_eq!(default_namespace("--"), "com.example");
    }

    #[test]
    fn flags_override_configured_defaults() {
        let mut cli = args("shop");
        cli.paradigm = Some(Paradigm::Imperative);
        cli.architecture = Some("onion-multi".into());

        let project = project_config(&cli, &AppConfig::default()).unwrap();
        assert_eq!(project.paradigm, Paradigm::Imperative);
        assert_eq!(project.framework, Framework::Spring);
        assert_eq!(project.architecture, "onion-multi");
        assert_eq!(project.base_namespace, "com.example.shop");
    }

    #[test]
    fn unparseable_default_is_reported() {
        let mut config = AppConfig::default();
        config.defaults.framework = "micronaut".into();
        let err = project_config(&args("shop"), &config).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
