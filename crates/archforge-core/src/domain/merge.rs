//! Conflict-aware YAML merge.
//!
//! Merges a candidate (overlay) document into a base document without ever
//! overwriting a value the base already has. Hand edits in shared files
//! survive every regeneration; disagreements are reported, not applied.
//!
//! Rules, per key of the overlay:
//!
//! | base has key? | both mappings? | equal? | outcome                     |
//! |---------------|----------------|--------|-----------------------------|
//! | no            | -              | -      | copied, recorded as added   |
//! | yes           | yes            | -      | recurse                     |
//! | yes           | no             | yes    | nothing                     |
//! | yes           | no             | no     | base kept, conflict recorded|
//!
//! Sequences are compared as whole values; they are never merged element
//! by element.

use std::fmt;

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::domain::error::DomainError;

/// A key present in both documents with different non-mapping values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeConflict {
    pub key_path: String,
    pub base: Value,
    pub candidate: Value,
}

impl fmt::Display for MergeConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Property '{}' already exists with value '{}', keeping existing value (new value: '{}')",
            self.key_path,
            display_value(&self.base),
            display_value(&self.candidate)
        )
    }
}

/// Outcome of [`YamlMergeEngine::merge`]. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeResult {
    merged: Mapping,
    added_keys: Vec<String>,
    conflicts: Vec<MergeConflict>,
}

impl MergeResult {
    pub fn merged(&self) -> &Mapping {
        &self.merged
    }

    pub fn into_merged(self) -> Mapping {
        self.merged
    }

    /// Dotted key paths copied from the overlay, in visit order.
    pub fn added_keys(&self) -> &[String] {
        &self.added_keys
    }

    pub fn conflicts(&self) -> &[MergeConflict] {
        &self.conflicts
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// `true` when the merged document differs from the base.
    pub fn changed(&self) -> bool {
        !self.added_keys.is_empty()
    }
}

/// Stateless merge engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlMergeEngine;

impl YamlMergeEngine {
    pub fn new() -> Self {
        Self
    }

    /// Merge `overlay` into `base`; base wins on conflict.
    pub fn merge(&self, base: &Mapping, overlay: &Mapping) -> MergeResult {
        let mut merged = base.clone();
        let mut added_keys = Vec::new();
        let mut conflicts = Vec::new();
        merge_into(&mut merged, overlay, "", &mut Some((&mut added_keys, &mut conflicts)));
        MergeResult {
            merged,
            added_keys,
            conflicts,
        }
    }

    /// Same algorithm without bookkeeping, for transient composite documents.
    pub fn deep_merge(&self, base: &Mapping, overlay: &Mapping) -> Mapping {
        let mut merged = base.clone();
        merge_into(&mut merged, overlay, "", &mut None);
        merged
    }

    /// Would merging `overlay[key]` into `base[key]` record a conflict?
    pub fn has_conflict(&self, base: &Mapping, overlay: &Mapping, key: &str) -> bool {
        let key = Value::String(key.to_string());
        match (base.get(&key), overlay.get(&key)) {
            (Some(Value::Mapping(b)), Some(Value::Mapping(o))) => {
                o.iter().any(|(k, _)| match k {
                    Value::String(s) => self.has_conflict(b, o, s),
                    other => match (b.get(other), o.get(other)) {
                        (Some(bv), Some(ov)) => !both_mappings(bv, ov) && bv != ov,
                        _ => false,
                    },
                })
            }
            (Some(b), Some(o)) => b != o,
            _ => false,
        }
    }
}

type Bookkeeping<'a> = Option<(&'a mut Vec<String>, &'a mut Vec<MergeConflict>)>;

fn merge_into(target: &mut Mapping, overlay: &Mapping, prefix: &str, book: &mut Bookkeeping<'_>) {
    for (key, candidate) in overlay {
        let path = join_path(prefix, key);
        match target.get_mut(key) {
            None => {
                target.insert(key.clone(), candidate.clone());
                if let Some((added, _)) = book {
                    added.push(path);
                }
            }
            Some(Value::Mapping(existing)) if candidate.is_mapping() => {
                if let Value::Mapping(nested) = candidate {
                    merge_into(existing, nested, &path, book);
                }
            }
            Some(existing) => {
                if existing != candidate {
                    if let Some((_, conflicts)) = book {
                        conflicts.push(MergeConflict {
                            key_path: path,
                            base: existing.clone(),
                            candidate: candidate.clone(),
                        });
                    }
                }
            }
        }
    }
}

fn both_mappings(a: &Value, b: &Value) -> bool {
    a.is_mapping() && b.is_mapping()
}

fn join_path(prefix: &str, key: &Value) -> String {
    let key = display_value(key);
    if prefix.is_empty() {
        key
    } else {
        format!("{prefix}.{key}")
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| format!("{other:?}")),
    }
}

/// Parse a shared YAML document; empty or `null` documents become `{}`.
pub fn parse_document(name: &str, text: &str) -> Result<Mapping, DomainError> {
    if text.trim().is_empty() {
        return Ok(Mapping::new());
    }
    let value: Value = serde_yaml::from_str(text).map_err(|e| DomainError::InvalidDocument {
        document: name.to_string(),
        reason: e.to_string(),
    })?;
    match value {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        _ => Err(DomainError::InvalidDocument {
            document: name.to_string(),
            reason: "top level is not a mapping".to_string(),
        }),
    }
}

/// Serialize a mapping back to YAML text.
pub fn render_document(name: &str, doc: &Mapping) -> Result<String, DomainError> {
    serde_yaml::to_string(doc).map_err(|e| DomainError::InvalidDocument {
        document: name.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> Mapping {
        parse_document("test", text).unwrap()
    }

    fn get<'a>(doc: &'a Mapping, path: &str) -> Option<&'a Value> {
        let mut parts = path.split('.');
        let first = parts.next()?;
        let mut current = doc.get(first)?;
        for part in parts {
            current = current.as_mapping()?.get(part)?;
        }
        Some(current)
    }

    #[test]
    fn base_wins_on_conflict() {
        let base = yaml("server:\n  port: 8080\n");
        let overlay = yaml("server:\n  port: 9090\n");
        let result = YamlMergeEngine::new().merge(&base, &overlay);

        assert_eq!(get(result.merged(), "server.port"), Some(&Value::from(8080)));
        assert_eq!(result.conflicts().len(), 1);
        assert_eq!(result.conflicts()[0].key_path, "server.port");
        assert_eq!(result.conflicts()[0].candidate, Value::from(9090));
        assert!(result.added_keys().is_empty());
    }

    #[test]
    fn absent_keys_are_added_with_dotted_paths() {
        let base = yaml("spring:\n  application:\n    name: shop\n");
        let overlay = yaml("spring:\n  data:\n    redis:\n      host: localhost\nlogging:\n  level: INFO\n");
        let result = YamlMergeEngine::new().merge(&base, &overlay);

        assert_eq!(result.added_keys(), ["spring.data", "logging"]);
        assert_eq!(
            get(result.merged(), "spring.data.redis.host"),
            Some(&Value::from("localhost"))
        );
        assert_eq!(
            get(result.merged(), "spring.application.name"),
            Some(&Value::from("shop"))
        );
        assert!(!result.has_conflicts());
    }

    #[test]
    fn equal_values_are_a_no_op() {
        let base = yaml("a: 1\nb: [1, 2]\n");
        let result = YamlMergeEngine::new().merge(&base, &base);
        assert!(result.added_keys().is_empty());
        assert!(!result.has_conflicts());
        assert_eq!(result.merged(), &base);
    }

    #[test]
    fn sequences_are_opaque() {
        let base = yaml("profiles: [dev]\n");
        let overlay = yaml("profiles: [dev, prod]\n");
        let result = YamlMergeEngine::new().merge(&base, &overlay);
        assert_eq!(result.conflicts().len(), 1);
        assert_eq!(get(result.merged(), "profiles"), get(&base, "profiles"));
    }

    #[test]
    fn scalar_versus_mapping_is_a_conflict() {
        let base = yaml("cache: none\n");
        let overlay = yaml("cache:\n  type: redis\n");
        let result = YamlMergeEngine::new().merge(&base, &overlay);
        assert_eq!(result.conflicts()[0].key_path, "cache");
        assert_eq!(get(result.merged(), "cache"), Some(&Value::from("none")));
    }

    #[test]
    fn merge_is_idempotent() {
        let engine = YamlMergeEngine::new();
        let base = yaml("server:\n  port: 8080\n");
        let overlay = yaml("server:\n  port: 9090\n  ssl: false\nextra: true\n");

        let first = engine.merge(&base, &overlay);
        let second = engine.merge(first.merged(), &overlay);

        assert!(second.added_keys().is_empty());
        assert_eq!(second.conflicts(), first.conflicts());
        assert_eq!(second.merged(), first.merged());
    }

    #[test]
    fn deep_merge_matches_merge_output() {
        let engine = YamlMergeEngine::new();
        let base = yaml("a:\n  b: 1\n");
        let overlay = yaml("a:\n  b: 2\n  c: 3\n");
        assert_eq!(
            &engine.deep_merge(&base, &overlay),
            engine.merge(&base, &overlay).merged()
        );
    }

    #[test]
    fn has_conflict_recurses() {
        let engine = YamlMergeEngine::new();
        let base = yaml("server:\n  port: 8080\n  host: a\nname: x\n");
        let overlay = yaml("server:\n  port: 8080\n  host: b\nname: x\nnew: 1\n");
        assert!(engine.has_conflict(&base, &overlay, "server"));
        assert!(!engine.has_conflict(&base, &overlay, "name"));
        assert!(!engine.has_conflict(&base, &overlay, "new"));
    }

    #[test]
    fn conflict_message_names_both_values() {
        let conflict = MergeConflict {
            key_path: "server.port".into(),
            base: Value::from(8080),
            candidate: Value::from(9090),
        };
        assert_eq!(
            conflict.to_string(),
            "Property 'server.port' already exists with value '8080', keeping existing value (new value: '9090')"
        );
    }

    #[test]
    fn parse_document_handles_empty_and_rejects_scalars() {
        assert!(parse_document("a.yml", "").unwrap().is_empty());
        assert!(parse_document("a.yml", "~").unwrap().is_empty());
        assert!(parse_document("a.yml", "- 1\n- 2\n").is_err());
    }
}
