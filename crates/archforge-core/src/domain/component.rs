//! Generation inputs: project context, component configuration, request.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::value_objects::{ComponentKind, Framework, Paradigm};

// ── Fields and methods ───────────────────────────────────────────────────────

/// `name:Type` entity field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl Field {
    /// Parse `name:Type,other:Type`.
    pub fn parse_list(input: &str) -> Result<Vec<Field>, DomainError> {
        input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<Field>)
            .collect()
    }
}

impl FromStr for Field {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| DomainError::InvalidField {
            definition: s.to_string(),
            reason: reason.to_string(),
        };
        let (name, ty) = s.split_once(':').ok_or_else(|| invalid("expected name:Type"))?;
        let (name, ty) = (name.trim(), ty.trim());
        if name.is_empty() || ty.is_empty() {
            return Err(invalid("name and type must both be present"));
        }
        Ok(Field {
            name: name.to_string(),
            ty: ty.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// `methodName:ReturnType[:param1:Type1,param2:Type2]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSignature {
    pub name: String,
    pub return_type: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl MethodSignature {
    /// Parse several signatures separated by `|`.
    pub fn parse_list(input: &str) -> Result<Vec<MethodSignature>, DomainError> {
        input
            .split('|')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<MethodSignature>)
            .collect()
    }

    /// `Type1 param1, Type2 param2`.
    pub fn parameter_list(&self) -> String {
        self.parameters
            .iter()
            .map(|p| format!("{} {}", p.ty, p.name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `param1, param2`.
    pub fn argument_list(&self) -> String {
        self.parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for MethodSignature {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| DomainError::InvalidMethod {
            definition: s.to_string(),
            reason: reason.to_string(),
        };

        let mut head = s.splitn(3, ':');
        let name = head.next().unwrap_or_default().trim();
        let return_type = head
            .next()
            .map(str::trim)
            .ok_or_else(|| invalid("missing return type"))?;
        if name.is_empty() || return_type.is_empty() {
            return Err(invalid("name and return type are required"));
        }

        let mut parameters = Vec::new();
        if let Some(params) = head.next() {
            for pair in params.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                let (pname, pty) = pair
                    .split_once(':')
                    .ok_or_else(|| invalid("parameters must be name:Type"))?;
                let (pname, pty) = (pname.trim(), pty.trim());
                if pname.is_empty() || pty.is_empty() {
                    return Err(invalid("parameters must be name:Type"));
                }
                parameters.push(Parameter {
                    name: pname.to_string(),
                    ty: pty.to_string(),
                });
            }
        }

        Ok(MethodSignature {
            name: name.to_string(),
            return_type: return_type.to_string(),
            parameters,
        })
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}({})", self.return_type, self.name, self.parameter_list())
    }
}

// ── ComponentConfig ──────────────────────────────────────────────────────────

/// What to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentConfig {
    pub kind: ComponentKind,
    pub name: String,
    /// Owning entity (adapters) or use case (input adapters).
    #[serde(default)]
    pub entity: Option<String>,
    /// Adapter technology id, e.g. `redis` or `rest`.
    #[serde(default)]
    pub adapter_type: Option<String>,
    #[serde(default)]
    pub methods: Vec<MethodSignature>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub id_type: Option<String>,
    /// Explicit module for multi-module descriptors.
    #[serde(default)]
    pub module: Option<String>,
}

impl ComponentConfig {
    pub fn new(kind: ComponentKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            entity: None,
            adapter_type: None,
            methods: Vec::new(),
            fields: Vec::new(),
            id_type: None,
            module: None,
        }
    }

    pub fn project(name: impl Into<String>) -> Self {
        Self::new(ComponentKind::Project, name)
    }

    pub fn entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn adapter_type(mut self, adapter_type: impl Into<String>) -> Self {
        self.adapter_type = Some(adapter_type.into());
        self
    }

    pub fn methods(mut self, methods: Vec<MethodSignature>) -> Self {
        self.methods = methods;
        self
    }

    pub fn fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    pub fn id_type(mut self, id_type: impl Into<String>) -> Self {
        self.id_type = Some(id_type.into());
        self
    }

    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }
}

// ── ProjectContext / GenerationRequest ───────────────────────────────────────

/// Project-wide settings every component is generated against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectContext {
    pub base_namespace: String,
    pub architecture: String,
    pub paradigm: Paradigm,
    pub framework: Framework,
    pub adapters_as_modules: bool,
    #[serde(default)]
    pub dependency_overrides: BTreeMap<String, String>,
}

impl ProjectContext {
    /// `com.acme.shop` → `com/acme/shop`.
    pub fn namespace_path(&self) -> String {
        self.base_namespace.replace('.', "/")
    }
}

impl From<&ProjectConfig> for ProjectContext {
    fn from(config: &ProjectConfig) -> Self {
        Self {
            base_namespace: config.base_namespace.clone(),
            architecture: config.architecture.clone(),
            paradigm: config.paradigm,
            framework: config.framework,
            adapters_as_modules: config.adapters_as_modules,
            dependency_overrides: config.dependency_overrides.clone(),
        }
    }
}

/// One invocation of the generation pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub root: PathBuf,
    pub project: ProjectContext,
    pub component: ComponentConfig,
    /// Overwrite existing artifacts instead of failing validation.
    pub force: bool,
    /// Configuration to persist when initializing a project.
    pub project_config: Option<ProjectConfig>,
}

impl GenerationRequest {
    pub fn new(root: impl Into<PathBuf>, project: ProjectContext, component: ComponentConfig) -> Self {
        Self {
            root: root.into(),
            project,
            component,
            force: false,
            project_config: None,
        }
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_project_config(mut self, config: ProjectConfig) -> Self {
        self.project_config = Some(config);
        self
    }
}

// ── ProjectConfig ────────────────────────────────────────────────────────────

/// Persisted project configuration (`.archforge.yml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub name: String,
    pub base_namespace: String,
    pub architecture: String,
    pub paradigm: Paradigm,
    pub framework: Framework,
    pub tool_version: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub adapters_as_modules: bool,
    /// `"group:artifact" -> version`.
    #[serde(default)]
    pub dependency_overrides: BTreeMap<String, String>,
}

impl ProjectConfig {
    pub const FILE_NAME: &'static str = ".archforge.yml";

    pub fn context(&self) -> ProjectContext {
        ProjectContext::from(self)
    }

    pub fn from_yaml(text: &str) -> Result<Self, DomainError> {
        serde_yaml::from_str(text).map_err(|e| DomainError::InvalidProjectConfig {
            reason: e.to_string(),
        })
    }

    pub fn to_yaml(&self) -> Result<String, DomainError> {
        serde_yaml::to_string(self).map_err(|e| DomainError::InvalidProjectConfig {
            reason: e.to_string(),
        })
    }
}
