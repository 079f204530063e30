//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use archforge_core::domain::{Framework, Paradigm};
use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "archforge",
    bin_name = "archforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Architecture-driven project generation",
    long_about = "archforge scaffolds layered Java projects from declarative \
                  architecture descriptors and keeps shared build and \
                  configuration files in sync as components are added.",
    after_help = "EXAMPLES:\n\
        \x20 archforge init shop --architecture hexagonal-multi-granular --namespace com.acme.shop\n\
        \x20 archforge generate entity User --fields name:String,email:String\n\
        \x20 archforge generate output-adapter UserRepository --type redis --entity User\n\
        \x20 archforge completions bash > /usr/share/bash-completion/completions/archforge",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project skeleton.
    #[command(
        about = "Initialize a new project",
        after_help = "EXAMPLES:\n\
            \x20 archforge init shop --namespace com.acme.shop\n\
            \x20 archforge init shop --architecture onion-multi --paradigm imperative\n\
            \x20 archforge init shop --adapters-as-modules --dir ~/work"
    )]
    Init(InitArgs),

    /// Add a component to an existing project.
    #[command(
        visible_alias = "g",
        subcommand,
        about = "Generate a component inside the current project"
    )]
    Generate(GenerateCommands),

    /// Check that every template a project may need is present and well formed.
    #[command(
        about = "Validate templates",
        after_help = "EXAMPLES:\n\
            \x20 archforge validate-templates\n\
            \x20 archforge validate-templates --architecture onion-single --paradigm imperative"
    )]
    ValidateTemplates(ValidateTemplatesArgs),

    /// Manage the local template cache.
    #[command(subcommand, about = "Template cache management")]
    Cache(CacheCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 archforge completions bash > ~/.local/share/bash-completion/completions/archforge\n\
            \x20 archforge completions zsh  > ~/.zfunc/_archforge\n\
            \x20 archforge completions fish > ~/.config/fish/completions/archforge.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(subcommand, about = "Configuration management")]
    Config(ConfigCommands),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `archforge init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Project name; also the directory created under `--dir`.
    #[arg(value_name = "NAME")]
    pub name: String,

    #[arg(
        short = 'a',
        long = "architecture",
        value_name = "ID",
        help = "Architecture descriptor id (default from config)"
    )]
    pub architecture: Option<String>,

    #[arg(
        short = 'p',
        long = "paradigm",
        value_name = "PARADIGM",
        help = "reactive or imperative (default from config)"
    )]
    pub paradigm: Option<Paradigm>,

    #[arg(
        short = 'f',
        long = "framework",
        value_name = "FRAMEWORK",
        help = "Application framework (default from config)"
    )]
    pub framework: Option<Framework>,

    #[arg(
        short = 'n',
        long = "namespace",
        value_name = "PACKAGE",
        help = "Base package, e.g. com.acme.shop (default: com.example.<name>)"
    )]
    pub namespace: Option<String>,

    /// Give every output adapter its own build module.
    #[arg(long = "adapters-as-modules")]
    pub adapters_as_modules: bool,

    #[arg(
        short = 'd',
        long = "dir",
        value_name = "DIR",
        default_value = ".",
        help = "Parent directory of the new project"
    )]
    pub dir: PathBuf,
}

// ── generate ──────────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum GenerateCommands {
    /// Domain entity with fields and an id.
    #[command(after_help = "EXAMPLE:\n\
        \x20 archforge generate entity User --fields name:String,age:Integer --id-type UUID")]
    Entity(EntityArgs),

    /// Use-case port plus implementation.
    #[command(after_help = "EXAMPLE:\n\
        \x20 archforge generate use-case CreateUser --methods 'create:User:user:User|count:Long'")]
    UseCase(UseCaseArgs),

    /// Driving adapter delegating to a use case.
    #[command(after_help = "EXAMPLE:\n\
        \x20 archforge generate input-adapter UserController --type rest --use-case CreateUser")]
    InputAdapter(InputAdapterArgs),

    /// Driven adapter for an entity.
    #[command(after_help = "EXAMPLE:\n\
        \x20 archforge generate output-adapter UserRepository --type redis --entity User")]
    OutputAdapter(OutputAdapterArgs),
}

/// Options shared by every `generate` subcommand.
#[derive(Debug, Args)]
pub struct TargetArgs {
    #[arg(
        long = "project-dir",
        value_name = "DIR",
        help = "Project root or any directory below it (default: current directory)"
    )]
    pub project_dir: Option<PathBuf>,

    #[arg(
        short = 'm',
        long = "module",
        value_name = "MODULE",
        help = "Target module for multi-module architectures"
    )]
    pub module: Option<String>,

    /// Overwrite existing files; shared-file edits stay idempotent.
    #[arg(long = "force")]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct EntityArgs {
    #[arg(value_name = "NAME")]
    pub name: String,

    #[arg(long = "fields", value_name = "LIST", help = "Comma-separated name:Type pairs")]
    pub fields: Option<String>,

    #[arg(long = "id-type", value_name = "TYPE", help = "String, Long or UUID")]
    pub id_type: Option<String>,

    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Debug, Args)]
pub struct UseCaseArgs {
    #[arg(value_name = "NAME")]
    pub name: String,

    #[arg(
        long = "methods",
        value_name = "LIST",
        help = "'|'-separated name:ReturnType[:p1:T1,p2:T2] signatures"
    )]
    pub methods: String,

    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Debug, Args)]
pub struct InputAdapterArgs {
    #[arg(value_name = "NAME")]
    pub name: String,

    #[arg(short = 't', long = "type", value_name = "ADAPTER", help = "Adapter type, e.g. rest")]
    pub adapter_type: String,

    #[arg(long = "use-case", value_name = "NAME", help = "Use case the adapter delegates to")]
    pub use_case: String,

    #[arg(long = "methods", value_name = "LIST")]
    pub methods: Option<String>,

    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Debug, Args)]
pub struct OutputAdapterArgs {
    #[arg(value_name = "NAME")]
    pub name: String,

    #[arg(short = 't', long = "type", value_name = "ADAPTER", help = "Adapter type, e.g. redis")]
    pub adapter_type: String,

    #[arg(long = "entity", value_name = "NAME", help = "Entity the adapter persists")]
    pub entity: String,

    #[arg(long = "methods", value_name = "LIST")]
    pub methods: Option<String>,

    #[command(flatten)]
    pub target: TargetArgs,
}

// ── validate-templates ────────────────────────────────────────────────────────

/// Arguments for `archforge validate-templates`.
///
/// Anything not given on the command line comes from the project found at
/// `--project-dir`, then from the configured defaults.
#[derive(Debug, Args)]
pub struct ValidateTemplatesArgs {
    #[arg(short = 'a', long = "architecture", value_name = "ID")]
    pub architecture: Option<String>,

    #[arg(short = 'p', long = "paradigm", value_name = "PARADIGM")]
    pub paradigm: Option<Paradigm>,

    #[arg(short = 'f', long = "framework", value_name = "FRAMEWORK")]
    pub framework: Option<Framework>,

    #[arg(long = "adapters-as-modules")]
    pub adapters_as_modules: bool,

    #[arg(long = "project-dir", value_name = "DIR")]
    pub project_dir: Option<PathBuf>,
}

// ── cache ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum CacheCommands {
    /// Remove every cached template.
    Clear,
    /// Re-sync the cache from a template directory.
    Update {
        /// Source directory (default: `templates.local_dir` from config).
        #[arg(long = "from", value_name = "DIR")]
        from: Option<PathBuf>,
    },
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `archforge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config ────────────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML.
    Show,
    /// Print the path of the configuration file in use.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_init_with_aliases() {
        let cli = Cli::parse_from([
            "archforge",
            "init",
            "shop",
            "--paradigm",
            "webflux",
            "--framework",
            "spring-boot",
            "--adapters-as-modules",
        ]);
        let Commands::Init(args) = cli.command else {
            panic!("expected init");
        };
        assert_eq!(args.paradigm, Some(Paradigm::Reactive));
        assert_eq!(args.framework, Some(Framework::Spring));
        assert!(args.adapters_as_modules);
        assert_eq!(args.dir, PathBuf::from("."));
    }

    #[test]
    fn unknown_paradigm_is_a_usage_error() {
        let result = Cli::try_parse_from(["archforge", "init", "shop", "--paradigm", "async"]);
        assert!(result.is_err());
    }

    #[test]
    fn generate_alias_and_shared_target_flags() {
        let cli = Cli::parse_from([
            "archforge",
            "g",
            "output-adapter",
            "UserRepository",
            "--type",
            "redis",
            "--entity",
            "User",
            "--force",
            "--project-dir",
            "/tmp/shop",
        ]);
        let Commands::Generate(GenerateCommands::OutputAdapter(args)) = cli.command else {
            panic!("expected output-adapter");
        };
        assert_eq!(args.adapter_type, "redis");
        assert!(args.target.force);
        assert_eq!(args.target.project_dir, Some(PathBuf::from("/tmp/shop")));
    }

    #[test]
    fn use_case_requires_methods() {
        let result = Cli::try_parse_from(["archforge", "generate", "use-case", "CreateUser"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["archforge", "--quiet", "--verbose", "config", "path"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "archforge",
            "config",
            "show",
            "-vv",
            "-c",
            "team.toml",
            "--output-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.config, Some(PathBuf::from("team.toml")));
        assert_eq!(cli.global.output_format, OutputFormat::Json);

        let defaults = Cli::try_parse_from(["archforge", "config", "path"]).unwrap();
        assert_eq!(defaults.global.output_format, OutputFormat::Auto);
    }
}
