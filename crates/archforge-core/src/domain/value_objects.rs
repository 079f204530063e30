//! Domain value objects: Paradigm, Framework, ComponentKind, ArtifactKind.
//!
//! Pure value types with a string form and a `FromStr` parser. Architecture
//! ids stay plain strings because descriptors are data, not code; the ids
//! shipped with the tool are listed in [`KNOWN_ARCHITECTURES`].

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Architecture ids with built-in descriptors.
pub const KNOWN_ARCHITECTURES: &[&str] = &[
    "hexagonal-single",
    "hexagonal-multi",
    "hexagonal-multi-granular",
    "onion-single",
    "onion-multi",
];

// ── Paradigm ─────────────────────────────────────────────────────────────────

/// Programming paradigm of the generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Paradigm {
    Reactive,
    Imperative,
}

impl Paradigm {
    pub const ALL: [Self; 2] = [Self::Reactive, Self::Imperative];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reactive => "reactive",
            Self::Imperative => "imperative",
        }
    }
}

impl fmt::Display for Paradigm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Paradigm {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reactive" | "webflux" => Ok(Self::Reactive),
            "imperative" | "mvc" | "blocking" => Ok(Self::Imperative),
            other => Err(DomainError::UnknownValue {
                kind: "paradigm",
                value: other.to_string(),
                expected: Self::ALL.iter().map(|p| p.as_str()).collect(),
            }),
        }
    }
}

// ── Framework ────────────────────────────────────────────────────────────────

/// Target application framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Spring,
    Quarkus,
}

impl Framework {
    pub const ALL: [Self; 2] = [Self::Spring, Self::Quarkus];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Quarkus => "quarkus",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spring" | "spring-boot" => Ok(Self::Spring),
            "quarkus" => Ok(Self::Quarkus),
            other => Err(DomainError::UnknownValue {
                kind: "framework",
                value: other.to_string(),
                expected: Self::ALL.iter().map(|f| f.as_str()).collect(),
            }),
        }
    }
}

// ── ComponentKind ────────────────────────────────────────────────────────────

/// What a generation request produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    Project,
    Entity,
    UseCase,
    InputAdapter,
    OutputAdapter,
}

impl ComponentKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Entity => "entity",
            Self::UseCase => "use-case",
            Self::InputAdapter => "input-adapter",
            Self::OutputAdapter => "output-adapter",
        }
    }

    /// Adapter-kind key used to look up `adapterPaths` in a descriptor.
    pub const fn adapter_kind(&self) -> Option<&'static str> {
        match self {
            Self::InputAdapter => Some("driving"),
            Self::OutputAdapter => Some("driven"),
            _ => None,
        }
    }

    /// Human label used in validation messages.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Entity => "entity",
            Self::UseCase => "use case",
            Self::InputAdapter | Self::OutputAdapter => "adapter",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "project" => Ok(Self::Project),
            "entity" => Ok(Self::Entity),
            "use-case" | "usecase" => Ok(Self::UseCase),
            "input-adapter" | "driving" => Ok(Self::InputAdapter),
            "output-adapter" | "driven" => Ok(Self::OutputAdapter),
            other => Err(DomainError::UnknownValue {
                kind: "component kind",
                value: other.to_string(),
                expected: vec![
                    "project",
                    "entity",
                    "use-case",
                    "input-adapter",
                    "output-adapter",
                ],
            }),
        }
    }
}

// ── ArtifactKind ─────────────────────────────────────────────────────────────

/// Logical grouping of a generated file. Used for reporting only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    JavaSource,
    KotlinSource,
    BuildScript,
    Settings,
    YamlConfig,
    PropertiesConfig,
    Markdown,
    Gitignore,
    Other,
}

impl ArtifactKind {
    /// Classify a path by its file name.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match name.as_str() {
            "build.gradle.kts" | "build.gradle" => Self::BuildScript,
            "settings.gradle.kts" | "settings.gradle" => Self::Settings,
            ".gitignore" => Self::Gitignore,
            n if n.ends_with(".java") => Self::JavaSource,
            n if n.ends_with(".kt") || n.ends_with(".kts") => Self::KotlinSource,
            n if n.ends_with(".yml") || n.ends_with(".yaml") => Self::YamlConfig,
            n if n.ends_with(".properties") => Self::PropertiesConfig,
            n if n.ends_with(".md") => Self::Markdown,
            _ => Self::Other,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::JavaSource => "java-source",
            Self::KotlinSource => "kotlin-source",
            Self::BuildScript => "build-script",
            Self::Settings => "settings",
            Self::YamlConfig => "yaml-config",
            Self::PropertiesConfig => "properties-config",
            Self::Markdown => "markdown",
            Self::Gitignore => "gitignore",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
