//! `{{key}}` template renderer.

use std::collections::BTreeSet;

use archforge_core::application::ApplicationError;
use archforge_core::application::ports::Renderer;
use archforge_core::domain::RenderContext;
use archforge_core::error::ArchforgeResult;
use tracing::{debug, instrument};

use crate::templates::TemplateSources;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Renders templates from an ordered list of sources.
///
/// Every `{{key}}` must be present in the context; a template that mentions
/// an unknown key is `TemplateInvalid` rather than rendered with a hole.
#[derive(Clone)]
pub struct TemplateRenderer {
    sources: TemplateSources,
}

impl TemplateRenderer {
    pub fn new(sources: TemplateSources) -> Self {
        Self { sources }
    }

    fn load(&self, template_id: &str) -> ArchforgeResult<String> {
        self.sources.read(template_id)?.ok_or_else(|| {
            ApplicationError::TemplateNotFound {
                template_id: template_id.to_string(),
            }
            .into()
        })
    }
}

impl Renderer for TemplateRenderer {
    #[instrument(skip_all, fields(template = %template_id))]
    fn render(&self, template_id: &str, context: &RenderContext) -> ArchforgeResult<String> {
        let text = self.load(template_id)?;
        let rendered = render_text(&text, context).map_err(|reason| {
            ApplicationError::TemplateInvalid {
                template_id: template_id.to_string(),
                reason,
            }
        })?;
        debug!(bytes = rendered.len(), "Template rendered");
        Ok(rendered)
    }

    fn check(&self, template_id: &str) -> ArchforgeResult<()> {
        let text = self.load(template_id)?;
        placeholders(&text).map(|_| ()).map_err(|reason| {
            ApplicationError::TemplateInvalid {
                template_id: template_id.to_string(),
                reason,
            }
            .into()
        })
    }
}

/// Every placeholder key in `text`, or why the text is malformed.
pub fn placeholders(text: &str) -> Result<BTreeSet<String>, String> {
    let mut keys = BTreeSet::new();
    let mut rest = text;
    while let Some(start) = rest.find(OPEN) {
        let after = &rest[start + OPEN.len()..];
        let end = after
            .find(CLOSE)
            .ok_or_else(|| format!("unclosed '{OPEN}' near '{}'", snippet(after)))?;
        let key = after[..end].trim();
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(format!("invalid placeholder '{OPEN}{key}{CLOSE}'"));
        }
        keys.insert(key.to_string());
        rest = &after[end + CLOSE.len()..];
    }
    Ok(keys)
}

fn render_text(text: &str, context: &RenderContext) -> Result<String, String> {
    let missing: Vec<String> = placeholders(text)?
        .into_iter()
        .filter(|key| !context.contains(key))
        .collect();
    if !missing.is_empty() {
        return Err(format!("no value for {}", missing.join(", ")));
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after = &rest[start + OPEN.len()..];
        // Well-formedness was checked above.
        let end = after.find(CLOSE).unwrap_or(after.len());
        out.push_str(context.get(after[..end].trim()).unwrap_or_default());
        rest = after.get(end + CLOSE.len()..).unwrap_or_default();
    }
    out.push_str(rest);
    Ok(out)
}

fn snippet(text: &str) -> String {
    text.chars().take(20).collect()
}
