//! CLI error handling.
//!
//! Wraps core errors, adds the failures only the CLI can hit (config files,
//! locating the project) and maps everything to an exit code.

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use archforge_core::error::{ArchforgeError, ErrorCategory as CoreCategory};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input that clap could not catch.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No `.archforge.yml` at or above the starting directory.
    #[error("No archforge project found at or above {}", start.display())]
    ProjectNotFound { start: PathBuf },

    /// A configuration file could not be read or parsed.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// `validate-templates` found problems.
    #[error("{} template problem(s) found", problems.len())]
    TemplatesInvalid { problems: Vec<ArchforgeError> },

    #[error("{0}")]
    Core(#[from] ArchforgeError),

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// User-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {message}"),
                "Use --help for usage information".into(),
            ],
            Self::ProjectNotFound { start } => vec![
                format!("'{}' is not inside a generated project", start.display()),
                "Run 'archforge init <name>' first".into(),
                "Or pass --project-dir to point at the project root".into(),
            ],
            Self::ConfigError { .. } => vec![
                format!(
                    "Check your config file (default: {})",
                    crate::config::AppConfig::config_path().display()
                ),
                "Run 'archforge config show' to see the effective settings".into(),
            ],
            Self::TemplatesInvalid { problems } => {
                let mut out: Vec<String> = Vec::new();
                for s in problems.iter().flat_map(ArchforgeError::suggestions) {
                    if !out.contains(&s) {
                        out.push(s);
                    }
                }
                out
            }
            Self::Core(core) => core.suggestions(),
            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::ProjectNotFound { .. } => ErrorCategory::NotFound,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::TemplatesInvalid { problems } => problems
                .first()
                .map_or(ErrorCategory::Internal, |e| from_core(e.category())),
            Self::Core(core) => from_core(core.category()),
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Individual failure messages, one per line of the report.
    fn details(&self) -> Vec<String> {
        match self {
            Self::TemplatesInvalid { problems } => problems.iter().map(ToString::to_string).collect(),
            Self::Core(core @ ArchforgeError::Aborted { errors, .. }) if errors.len() > 1 => {
                core.causes().iter().map(ToString::to_string).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Headline without the per-cause list that `Display` may include.
    fn headline(&self) -> String {
        match self {
            Self::Core(ArchforgeError::Aborted {
                stage,
                rolled_back,
                errors,
                ..
            }) if errors.len() > 1 => {
                let rolled = if *rolled_back { " (changes rolled back)" } else { "" };
                format!("generation failed while {stage}{rolled} with {} errors", errors.len())
            }
            other => other.to_string(),
        }
    }

    /// Format the error with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n{} {}\n\n", "✗".red().bold(), "Error:".red().bold()));
        output.push_str(&format!("  {}\n", self.headline().red()));

        for detail in self.details() {
            output.push_str(&format!("    {} {}\n", "•".red(), detail));
        }

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!("\n  {} {}\n", "→".dimmed(), err.to_string().dimmed()));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`].
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {}\n", self.headline()));

        for detail in self.details() {
            out.push_str(&format!("  - {detail}\n"));
        }

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

fn from_core(category: CoreCategory) -> ErrorCategory {
    match category {
        CoreCategory::Validation | CoreCategory::PathResolution => ErrorCategory::UserError,
        CoreCategory::NotFound => ErrorCategory::NotFound,
        CoreCategory::Configuration => ErrorCategory::Configuration,
        CoreCategory::Render | CoreCategory::Io | CoreCategory::Internal => ErrorCategory::Internal,
    }
}

/// Exit-code classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserError,
    NotFound,
    Configuration,
    Internal,
}
