//! Key/value context shared by path templates and file templates.
//!
//! Path templates use `{key}` tokens (see [`crate::domain::path_resolver`]);
//! file templates use `{{key}}` tokens and are expanded by the renderer
//! adapter. Both read from the same [`RenderContext`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Ordered variable map handed to the path resolver and the renderer.
///
/// Ordered so that debug output and test snapshots are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, consuming self.
    ///
    /// ```rust
    /// use archforge_core::domain::RenderContext;
    ///
    /// let ctx = RenderContext::new()
    ///     .with("basePackage", "com.acme")
    ///     .with("name", "redis");
    /// assert_eq!(ctx.get("name"), Some("redis"));
    /// ```
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Union of two contexts; `other` wins on shared keys.
    pub fn union(&self, other: &RenderContext) -> RenderContext {
        let mut merged = self.clone();
        for (k, v) in other.iter() {
            merged.insert(k, v);
        }
        merged
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RenderContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ctx = RenderContext::new();
        for (k, v) in iter {
            ctx.insert(k, v);
        }
        ctx
    }
}

// ============================================================================
// String Case Conversion Helpers
// ============================================================================

/// `UserRepository` → `user_repository`.
pub fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// `UserRepository` → `user-repository`. Used for module directory names.
pub fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

/// `user-repository` → `UserRepository`.
pub fn to_pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

/// `UserRepository` → `userRepository`.
pub fn to_camel_case(s: &str) -> String {
    let words = split_words(s);
    let mut out = String::new();
    for (i, w) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(w);
        } else {
            out.push_str(&capitalize(w));
        }
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::new();
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Split a string into lowercase words.
///
/// Boundaries: explicit separators (`_`, `-`, whitespace), a lower-to-upper
/// transition (`myApp`), and the end of an acronym (`HTTPServer`).
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(next) = chars.peek() {
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}
