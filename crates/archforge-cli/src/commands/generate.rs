//! `archforge generate <kind>`: add one component to an existing project.
//!
//! Translates arguments into a [`ComponentConfig`], finds the project root
//! and hands the request to the orchestrator. No business logic lives here.

use archforge_core::domain::{
    ComponentConfig, ComponentKind, Field, GenerationRequest, MethodSignature,
};
use tracing::{info, instrument};

use super::Services;
use crate::{
    cli::{GenerateCommands, TargetArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(cmd: GenerateCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let (component, target) = component(cmd)?;
    let services = Services::build(&config);
    let (root, project) = services.find_project(target.project_dir.as_deref())?;

    info!(
        kind = %component.kind,
        name = %component.name,
        root = %root.display(),
        "Generating component"
    );

    let request = GenerationRequest::new(&root, project.context(), component.clone())
        .force(target.force);
    let report = services.orchestrator().generate(&request)?;

    output.report(
        &format!("{} '{}' generated", component.kind.label(), component.name),
        &root,
        &report,
    )?;
    Ok(())
}

fn component(cmd: GenerateCommands) -> CliResult<(ComponentConfig, TargetArgs)> {
    let (component, target) = match cmd {
        GenerateCommands::Entity(args) => {
            let mut c = ComponentConfig::new(ComponentKind::Entity, args.name);
            if let Some(fields) = &args.fields {
                c = c.fields(Field::parse_list(fields).map_err(invalid("--fields"))?);
            }
            if let Some(id) = args.id_type {
                c = c.id_type(id);
            }
            (c, args.target)
        }
        GenerateCommands::UseCase(args) => {
            let methods = MethodSignature::parse_list(&args.methods).map_err(invalid("--methods"))?;
            (
                ComponentConfig::new(ComponentKind::UseCase, args.name).methods(methods),
                args.target,
            )
        }
        GenerateCommands::InputAdapter(args) => (
            ComponentConfig::new(ComponentKind::InputAdapter, args.name)
                .entity(args.use_case)
                .adapter_type(args.adapter_type)
                .methods(methods(args.methods.as_deref())?),
            args.target,
        ),
        GenerateCommands::OutputAdapter(args) => (
            ComponentConfig::new(ComponentKind::OutputAdapter, args.name)
                .entity(args.entity)
                .adapter_type(args.adapter_type)
                .methods(methods(args.methods.as_deref())?),
            args.target,
        ),
    };

    let component = match &target.module {
        Some(module) => component.module(module.clone()),
        None => component,
    };
    Ok((component, target))
}

fn methods(list: Option<&str>) -> CliResult<Vec<MethodSignature>> {
    list.map_or(Ok(Vec::new()), |l| {
        MethodSignature::parse_list(l).map_err(invalid("--methods"))
    })
}

fn invalid<E>(flag: &'static str) -> impl FnOnce(E) -> CliError
where
    E: std::error::Error + Send + Sync + 'static,
{
    move |e| CliError::InvalidInput {
        message: format!("{flag}: {e}"),
        source: Some(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{EntityArgs, OutputAdapterArgs, UseCaseArgs};

    fn target() -> TargetArgs {
        TargetArgs {
            project_dir: None,
            module: None,
            force: false,
        }
    }

    #[test]
    fn entity_arguments_become_a_component() {
        let (c, _) = component(GenerateCommands::Entity(EntityArgs {
            name: "User".into(),
            fields: Some("name:String,age:Integer".into()),
            id_type: Some("UUID".into()),
            target: target(),
        }))
        .unwrap();
        assert_eq!(c.kind, ComponentKind::Entity);
        assert_eq!(c.fields.len(), 2);
        assert_eq!(c.id_type.as_deref(), Some("UUID"));
    }

    #[test]
    fn module_flag_is_carried_over() {
        let mut t = target();
        t.module = Some("infrastructure".into());
        let (c, _) = component(GenerateCommands::OutputAdapter(OutputAdapterArgs {
            name: "UserRepository".into(),
            adapter_type: "redis".into(),
            entity: "User".into(),
            methods: None,
            target: t,
        }))
        .unwrap();
        assert_eq!(c.module.as_deref(), Some("infrastructure"));
        assert_eq!(c.entity.as_deref(), Some("User"));
        assert!(c.methods.is_empty());
    }

    #[test]
    fn malformed_methods_are_a_usage_error() {
        let err = component(GenerateCommands::UseCase(UseCaseArgs {
            name: "CreateUser".into(),
            methods: "create".into(),
            target: target(),
        }))
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("--methods"));
    }
}
