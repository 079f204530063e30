//! Architecture and adapter descriptors.
//!
//! An [`ArchitectureDescriptor`] is the declarative definition of one
//! layering style: where adapters and components go, how classes are named,
//! which layers may depend on which, and which modules exist. It is parsed
//! from `architectures/{id}/structure.yml` and is immutable once validated.
//!
//! An [`AdapterDescriptor`] describes one adapter technology (redis, rest,
//! ...): the files it renders, the dependencies it needs, and the
//! application properties it contributes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::dependency::DependencySpec;
use crate::domain::error::DomainError;
use crate::domain::layers::LayerDependencies;

/// Component-path keys understood by the planner.
pub mod component_keys {
    pub const ENTITY: &str = "entity";
    pub const USECASE_PORT: &str = "usecase-port";
    pub const USECASE: &str = "usecase";
}

const DEFAULT_COMPONENT_PATHS: &[(&str, &str)] = &[
    (component_keys::ENTITY, "domain/model"),
    (component_keys::USECASE_PORT, "domain/port/in"),
    (component_keys::USECASE, "application/usecase"),
];

const DEFAULT_SUFFIXES: &[(&str, &str)] = &[
    (component_keys::USECASE_PORT, "UseCase"),
    (component_keys::USECASE, "UseCaseImpl"),
    ("driven", "Adapter"),
    ("driving", "Controller"),
];

// ── ArchitectureDescriptor ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureDescriptor {
    #[serde(rename = "architecture")]
    pub id: String,

    /// adapter kind (`driven`, `driving`) → path template containing `{name}`.
    #[serde(default)]
    pub adapter_paths: BTreeMap<String, String>,

    /// component key → path template. Missing keys fall back to defaults.
    #[serde(default)]
    pub component_paths: BTreeMap<String, String>,

    #[serde(default)]
    pub naming_conventions: NamingConventions,

    #[serde(default)]
    pub layer_dependencies: LayerDependencies,

    /// Flat package list for single-module layouts.
    #[serde(default)]
    pub packages: Vec<String>,

    /// Module directories for multi-module layouts.
    #[serde(default)]
    pub modules: Vec<String>,

    /// Module holding `application.yml` and the main build file.
    #[serde(default)]
    pub entry_module: Option<String>,

    /// Require an explicit module whenever a template mentions `{module}`.
    #[serde(default)]
    pub strict_modules: bool,
}

impl ArchitectureDescriptor {
    /// Minimal descriptor with only adapter paths; everything else defaulted.
    pub fn new<'a, I>(id: impl Into<String>, adapter_paths: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self {
            id: id.into(),
            adapter_paths: adapter_paths
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            component_paths: BTreeMap::new(),
            naming_conventions: NamingConventions::default(),
            layer_dependencies: LayerDependencies::default(),
            packages: Vec::new(),
            modules: Vec::new(),
            entry_module: None,
            strict_modules: false,
        }
    }

    pub fn with_layers(mut self, layers: LayerDependencies) -> Self {
        self.layer_dependencies = layers;
        self
    }

    pub fn with_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modules = modules.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_multi_module(&self) -> bool {
        !self.modules.is_empty()
    }

    pub fn has_layer_dependencies(&self) -> bool {
        !self.layer_dependencies.is_empty()
    }

    /// Declared adapter kinds, sorted.
    pub fn adapter_kinds(&self) -> Vec<String> {
        self.adapter_paths.keys().cloned().collect()
    }

    /// Path template for a component key, falling back to built-in defaults.
    pub fn component_path(&self, key: &str) -> Option<&str> {
        self.component_paths
            .get(key)
            .map(String::as_str)
            .or_else(|| {
                DEFAULT_COMPONENT_PATHS
                    .iter()
                    .find(|(k, _)| *k == key)
                    .map(|(_, v)| *v)
            })
    }

    /// Longest declared module that is a path prefix of `path`.
    pub fn module_for<'a>(&'a self, path: &str) -> Option<&'a str> {
        self.modules
            .iter()
            .filter(|m| path == m.as_str() || path.starts_with(&format!("{m}/")))
            .max_by_key(|m| m.len())
            .map(String::as_str)
    }

    /// Check every structural invariant, collecting all violations.
    pub fn validate(&self) -> Result<(), DomainError> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(DomainError::MetadataInvalid {
                architecture: self.id.clone(),
                violations,
            })
        }
    }

    pub fn violations(&self) -> Vec<String> {
        let mut violations = Vec::new();

        if self.adapter_paths.is_empty() {
            violations.push("Adapter paths cannot be empty".to_string());
        } else if !self.adapter_paths.contains_key("driven")
            && !self.adapter_paths.contains_key("driving")
        {
            violations
                .push("Adapter paths must contain at least 'driven' or 'driving' entries".into());
        }

        for (kind, template) in &self.adapter_paths {
            if !template.contains("{name}") {
                violations.push(format!(
                    "Adapter path for '{kind}' must contain '{{name}}': {template}"
                ));
            }
        }

        for (from, to) in self.layer_dependencies.undeclared_targets() {
            violations.push(format!(
                "Layer '{from}' references undeclared layer '{to}'"
            ));
        }

        if let Some(entry) = &self.entry_module {
            if !self.modules.iter().any(|m| m == entry) {
                violations.push(format!("Entry module '{entry}' is not a declared module"));
            }
        }

        violations
    }
}

// ── NamingConventions ────────────────────────────────────────────────────────

/// Per-component-type class name prefixes and suffixes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConventions {
    #[serde(default)]
    pub suffixes: BTreeMap<String, String>,
    #[serde(default)]
    pub prefixes: BTreeMap<String, String>,
}

impl NamingConventions {
    pub fn suffix(&self, key: &str) -> &str {
        self.suffixes.get(key).map(String::as_str).unwrap_or_else(|| {
            DEFAULT_SUFFIXES
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| *v)
                .unwrap_or("")
        })
    }

    pub fn prefix(&self, key: &str) -> &str {
        self.prefixes.get(key).map(String::as_str).unwrap_or("")
    }

    /// `prefix + name + suffix`, without doubling an affix the name already has.
    pub fn class_name(&self, key: &str, name: &str) -> String {
        let prefix = self.prefix(key);
        let suffix = self.suffix(key);
        let mut out = String::new();
        if !name.starts_with(prefix) {
            out.push_str(prefix);
        }
        out.push_str(name);
        if !name.ends_with(suffix) {
            out.push_str(suffix);
        }
        out
    }
}

// ── AdapterDescriptor ────────────────────────────────────────────────────────

/// One file an adapter renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactTemplate {
    /// Template id; may contain `{framework}` / `{paradigm}` tokens.
    pub template: String,
    /// File name pattern, e.g. `{className}.java` or `{entity}Mapper.java`.
    pub file_name: String,
    /// Sub-package below the adapter package, e.g. `mapper`.
    #[serde(default)]
    pub subpackage: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterDescriptor {
    pub name: String,

    /// `driven` or `driving`.
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub dependencies: Vec<DependencySpec>,

    #[serde(default)]
    pub test_dependencies: Vec<DependencySpec>,

    /// Fragment merged into `application.yml`.
    #[serde(default)]
    pub application_properties: Option<serde_yaml::Mapping>,

    #[serde(default)]
    pub artifacts: Vec<ArtifactTemplate>,
}
