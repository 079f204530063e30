//! Placeholder-based path resolution against an [`ArchitectureDescriptor`].
//!
//! Templates such as `infrastructure/driven-adapters/{name}` are expanded
//! from a [`RenderContext`]. Substitution is a single left-to-right pass:
//! known `{key}` tokens are replaced, unknown tokens are left verbatim.
//!
//! ```rust
//! use archforge_core::domain::{RenderContext, substitute_placeholders};
//!
//! let ctx = RenderContext::new().with("a", "x");
//! assert_eq!(substitute_placeholders("{a}/{b}", &ctx), "x/{b}");
//! ```

use serde::Serialize;

use crate::domain::context::RenderContext;
use crate::domain::descriptor::ArchitectureDescriptor;
use crate::domain::error::DomainError;

/// Layers recognised in resolved paths, in tie-break order.
pub const LAYER_SCAN_ORDER: [&str; 4] = ["core", "domain", "application", "infrastructure"];

const MODULE_TOKEN: &str = "{module}";

/// A concrete relative path plus the layer it resolved into.
///
/// Produced while planning and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPath {
    path: String,
    layer: Option<String>,
}

impl ResolvedPath {
    pub fn path(&self) -> &str {
        &self.path
    }

    /// `None` only when the descriptor declares no layer graph and the path
    /// matched no known layer.
    pub fn layer(&self) -> Option<&str> {
        self.layer.as_deref()
    }
}

/// Stateless resolver bound to one descriptor.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    descriptor: &'a ArchitectureDescriptor,
}

impl<'a> PathResolver<'a> {
    pub fn new(descriptor: &'a ArchitectureDescriptor) -> Self {
        Self { descriptor }
    }

    /// Resolve the directory for an adapter of `adapter_kind` called `name`.
    pub fn resolve_adapter_path(
        &self,
        adapter_kind: &str,
        name: &str,
        context: &RenderContext,
    ) -> Result<String, DomainError> {
        let template = self
            .descriptor
            .adapter_paths
            .get(adapter_kind)
            .ok_or_else(|| DomainError::UnknownAdapterKind {
                kind: adapter_kind.to_string(),
                available: self.descriptor.adapter_kinds(),
            })?;

        let full = context.union(
            &RenderContext::new()
                .with("name", name)
                .with("type", adapter_kind),
        );
        self.expand(template, &full)
    }

    /// Resolve a non-adapter component directory (entity, use case, port).
    pub fn resolve_component_path(
        &self,
        component_key: &str,
        name: &str,
        context: &RenderContext,
    ) -> Result<String, DomainError> {
        let template = self
            .descriptor
            .component_path(component_key)
            .ok_or_else(|| DomainError::UnknownAdapterKind {
                kind: component_key.to_string(),
                available: self.descriptor.component_paths.keys().cloned().collect(),
            })?;

        let full = context.union(
            &RenderContext::new()
                .with("name", name)
                .with("type", component_key),
        );
        self.expand(template, &full)
    }

    /// Resolve and validate in one step.
    pub fn resolve(
        &self,
        adapter_kind: Option<&str>,
        component_key: &str,
        name: &str,
        context: &RenderContext,
    ) -> Result<ResolvedPath, DomainError> {
        let path = match adapter_kind {
            Some(kind) => self.resolve_adapter_path(kind, name, context)?,
            None => self.resolve_component_path(component_key, name, context)?,
        };
        let layer = if self.descriptor.has_layer_dependencies() {
            Some(self.validate_path(&path)?)
        } else {
            extract_layer(&path).map(str::to_string)
        };
        Ok(ResolvedPath { path, layer })
    }

    /// Find the layer of `path` and check it is declared.
    pub fn validate_path(&self, path: &str) -> Result<String, DomainError> {
        let layer = extract_layer(path).ok_or_else(|| DomainError::UndeterminedLayer {
            path: path.to_string(),
        })?;

        let graph = &self.descriptor.layer_dependencies;
        if !graph.is_empty() && !graph.declares(layer) {
            return Err(DomainError::UnknownLayer {
                layer: layer.to_string(),
                path: path.to_string(),
                declared: graph.layers().map(str::to_string).collect(),
            });
        }
        Ok(layer.to_string())
    }

    fn expand(&self, template: &str, full: &RenderContext) -> Result<String, DomainError> {
        let template = if template.contains(MODULE_TOKEN) {
            match full.get("module") {
                Some(module) => {
                    if self.descriptor.is_multi_module()
                        && !self.descriptor.modules.iter().any(|m| m == module)
                    {
                        return Err(DomainError::UnknownModule {
                            module: module.to_string(),
                            modules: self.descriptor.modules.clone(),
                        });
                    }
                    template.to_string()
                }
                None if self.descriptor.is_multi_module() || self.descriptor.strict_modules => {
                    return Err(DomainError::MissingModuleSelection {
                        template: template.to_string(),
                        modules: self.descriptor.modules.clone(),
                    });
                }
                None => strip_module_segment(template),
            }
        } else {
            template.to_string()
        };

        Ok(substitute_placeholders(&template, full))
    }
}

/// Replace `{key}` tokens present in `context`; leave the rest verbatim.
pub fn substitute_placeholders(template: &str, context: &RenderContext) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if close > 0 => {
                let key = &after[..close];
                match context.get(key) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Drop the `{module}` segment from a single-module template.
fn strip_module_segment(template: &str) -> String {
    let stripped = template
        .replace("{module}/", "")
        .replace("/{module}", "");
    if stripped == MODULE_TOKEN {
        String::new()
    } else {
        stripped
    }
}

/// Left-most known layer appearing as a full segment of `path`.
pub fn extract_layer(path: &str) -> Option<&'static str> {
    let normalized = path.to_lowercase().replace('\\', "/");
    let mut best: Option<(usize, &'static str)> = None;

    for layer in LAYER_SCAN_ORDER {
        let Some(index) = segment_index(&normalized, layer) else {
            continue;
        };
        // Strictly smaller index only, so earlier scan entries win ties.
        if best.is_none_or(|(i, _)| index < i) {
            best = Some((index, layer));
        }
    }
    best.map(|(_, layer)| layer)
}

fn segment_index(path: &str, layer: &str) -> Option<usize> {
    if path == layer || path.starts_with(&format!("{layer}/")) {
        return Some(0);
    }
    if let Some(i) = path.find(&format!("/{layer}/")) {
        return Some(i + 1);
    }
    if path.ends_with(&format!("/{layer}")) {
        return Some(path.len() - layer.len());
    }
    None
}
