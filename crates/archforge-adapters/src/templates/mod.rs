//! Where template and descriptor text comes from.
//!
//! Every resource is addressed by a slash-separated id relative to a
//! template root, e.g. `architectures/onion-single/structure.yml` or
//! `frameworks/spring/reactive/project/Application.java.tpl`. A
//! [`TemplateSources`] list is searched in order and the first source that
//! has the id wins, so a configured directory shadows the built-in set.

mod builtin;
mod directory;

use std::sync::Arc;

use archforge_core::application::ApplicationError;
use archforge_core::error::ArchforgeResult;
use tracing::trace;

pub use builtin::BuiltinTemplates;
pub use directory::DirectoryTemplates;

pub trait TemplateSource: Send + Sync {
    /// Human-readable origin, used in "looked in" diagnostics.
    fn describe(&self) -> String;

    /// Text of `id`, or `None` when this source does not have it.
    fn read(&self, id: &str) -> ArchforgeResult<Option<String>>;

    /// Names of the directories directly below `prefix`.
    fn children(&self, prefix: &str) -> Vec<String>;
}

/// Ordered list of sources; earlier entries shadow later ones.
#[derive(Clone, Default)]
pub struct TemplateSources {
    sources: Vec<Arc<dyn TemplateSource>>,
}

impl TemplateSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the templates compiled into the binary.
    pub fn builtin() -> Self {
        Self::new().with(BuiltinTemplates)
    }

    pub fn with(mut self, source: impl TemplateSource + 'static) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    pub fn describe(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.describe()).collect()
    }

    /// First hit for `id`, searched in order.
    pub fn read(&self, id: &str) -> ArchforgeResult<Option<String>> {
        check_id(id)?;
        for source in &self.sources {
            if let Some(text) = source.read(id)? {
                trace!(id, source = %source.describe(), "Resource found");
                return Ok(Some(text));
            }
        }
        Ok(None)
    }

    /// Union of [`TemplateSource::children`] over every source, sorted.
    pub fn children(&self, prefix: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .sources
            .iter()
            .flat_map(|s| s.children(prefix))
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

/// Ids are relative and may not climb out of the template root.
fn check_id(id: &str) -> ArchforgeResult<()> {
    let climbs = id.split(['/', '\\']).any(|segment| segment == "..");
    if id.is_empty() || id.starts_with('/') || climbs {
        return Err(ApplicationError::TemplateInvalid {
            template_id: id.to_string(),
            reason: "template ids must be relative paths inside the template root".into(),
        }
        .into());
    }
    Ok(())
}
