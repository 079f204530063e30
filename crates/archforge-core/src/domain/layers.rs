//! Layer dependency graph and the edge check built on it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Declared layer graph: layer → layers it may depend on directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerDependencies {
    allowed: BTreeMap<String, Vec<String>>,
}

impl LayerDependencies {
    pub fn new(allowed: BTreeMap<String, Vec<String>>) -> Self {
        Self { allowed }
    }

    /// Build from `(layer, [targets])` pairs.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [&'a str])>,
    {
        let allowed = pairs
            .into_iter()
            .map(|(from, to)| {
                (
                    from.to_string(),
                    to.iter().map(|t| t.to_string()).collect(),
                )
            })
            .collect();
        Self { allowed }
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    /// Declared layer nodes.
    pub fn layers(&self) -> impl Iterator<Item = &str> {
        self.allowed.keys().map(String::as_str)
    }

    pub fn declares(&self, layer: &str) -> bool {
        self.allowed.contains_key(layer)
    }

    /// Allowed targets for `from`; empty when `from` is undeclared.
    pub fn allowed_for(&self, from: &str) -> &[String] {
        self.allowed.get(from).map(Vec::as_slice).unwrap_or_default()
    }

    /// Edges whose target is not itself a declared node.
    pub fn undeclared_targets(&self) -> Vec<(String, String)> {
        let mut missing = Vec::new();
        for (from, targets) in &self.allowed {
            for to in targets {
                if !self.allowed.contains_key(to) {
                    missing.push((from.clone(), to.clone()));
                }
            }
        }
        missing
    }
}

/// Membership test for a single dependency edge.
///
/// Only declared, direct edges count: `a → b` and `b → c` do not make
/// `a → c` legal.
#[derive(Debug, Clone, Copy)]
pub struct LayerDependencyValidator<'a> {
    graph: &'a LayerDependencies,
}

impl<'a> LayerDependencyValidator<'a> {
    pub fn new(graph: &'a LayerDependencies) -> Self {
        Self { graph }
    }

    pub fn can_depend_on(&self, from: &str, to: &str) -> bool {
        self.graph.allowed_for(from).iter().any(|l| l == to)
    }

    pub fn validate_dependency(&self, from: &str, to: &str) -> Result<(), DomainError> {
        if self.can_depend_on(from, to) {
            return Ok(());
        }
        Err(DomainError::DependencyNotAllowed {
            from: from.to_string(),
            to: to.to_string(),
            allowed: self.graph.allowed_for(from).to_vec(),
        })
    }
}
