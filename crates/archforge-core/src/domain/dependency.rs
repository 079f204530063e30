//! Build dependency coordinates, version overrides and conflict detection.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A `group:artifact[:version]` dependency contributed by an adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySpec {
    pub group: String,
    pub artifact: String,
    #[serde(default)]
    pub version: Option<String>,
    /// Build configuration, e.g. `implementation` or `testImplementation`.
    #[serde(default)]
    pub scope: Option<String>,
}

impl DependencySpec {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: None,
            scope: None,
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// `group:artifact`, the key used by `dependencyOverrides`.
    pub fn key(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }

    pub fn coordinate(&self) -> String {
        match &self.version {
            Some(v) => format!("{}:{}:{}", self.group, self.artifact, v),
            None => self.key(),
        }
    }

    /// Build-file line, e.g. `implementation("org.foo:bar:1.0")`.
    pub fn declaration(&self, default_configuration: &str) -> String {
        let configuration = self.scope.as_deref().unwrap_or(default_configuration);
        format!("{configuration}(\"{}\")", self.coordinate())
    }

    /// Replace the version when the project pins one for this key.
    pub fn with_overrides(&self, overrides: &BTreeMap<String, String>) -> Self {
        match overrides.get(&self.key()) {
            Some(pinned) => Self {
                version: Some(pinned.clone()),
                ..self.clone()
            },
            None => self.clone(),
        }
    }
}

/// Same artifact declared with a different version than the build file has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionConflict {
    pub key: String,
    pub existing: String,
    pub requested: String,
}

impl fmt::Display for VersionConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Version conflict for {}: existing version {}, new version {}",
            self.key, self.existing, self.requested
        )
    }
}

/// Every quoted `group:artifact:version` coordinate in a build script.
pub fn declared_coordinates(build_script: &str) -> BTreeMap<String, String> {
    let mut found = BTreeMap::new();
    // Odd segments of a split on '"' are the quoted strings.
    for quoted in build_script.split('"').skip(1).step_by(2) {
        let parts: Vec<&str> = quoted.split(':').collect();
        let well_formed = parts.len() == 3
            && parts
                .iter()
                .all(|p| !p.is_empty() && !p.chars().any(char::is_whitespace));
        if well_formed {
            found.insert(format!("{}:{}", parts[0], parts[1]), parts[2].to_string());
        }
    }
    found
}

/// Versioned dependencies that disagree with what the build script declares.
pub fn detect_version_conflicts(
    build_script: &str,
    requested: &[DependencySpec],
) -> Vec<VersionConflict> {
    let existing = declared_coordinates(build_script);
    requested
        .iter()
        .filter_map(|dep| {
            let wanted = dep.version.as_ref()?;
            let have = existing.get(&dep.key())?;
            (have != wanted).then(|| VersionConflict {
                key: dep.key(),
                existing: have.clone(),
                requested: wanted.clone(),
            })
        })
        .collect()
}

/// Whether the build script already mentions `group:artifact` in any version.
pub fn is_declared(build_script: &str, dep: &DependencySpec) -> bool {
    let key = dep.key();
    build_script.split('"').skip(1).step_by(2).any(|quoted| {
        quoted == key || quoted.starts_with(&format!("{key}:"))
    })
}
