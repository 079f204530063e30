//! Append-only, check-before-write edits to shared project files.
//!
//! Every edit is a pure function of the current file content: it returns the
//! new content, or `None` when the file already satisfies the edit. Applying
//! the same edit twice is therefore a no-op.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_yaml::Mapping;

use crate::domain::error::DomainError;
use crate::domain::merge::{MergeConflict, YamlMergeEngine, parse_document, render_document};

const INDENT: &str = "    ";

/// One incremental change to a file shared across generation runs.
#[derive(Debug, Clone, PartialEq)]
pub enum SharedEdit {
    /// Add `include("a:b")` to a settings script.
    IncludeModule { file: PathBuf, module: String },
    /// Add a dependency line inside the `dependencies { }` block.
    AddDependency { file: PathBuf, declaration: String },
    /// Merge a YAML fragment into a configuration document, base wins.
    MergeYaml { file: PathBuf, overlay: Mapping },
}

/// Result of applying one edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EditOutcome {
    /// New content, `None` when nothing changed.
    #[serde(skip)]
    pub content: Option<String>,
    pub added_keys: Vec<String>,
    pub conflicts: Vec<MergeConflict>,
}

impl EditOutcome {
    fn unchanged() -> Self {
        Self::default()
    }

    fn replaced(content: String) -> Self {
        Self {
            content: Some(content),
            ..Self::default()
        }
    }

    pub fn changed(&self) -> bool {
        self.content.is_some()
    }
}

impl SharedEdit {
    pub fn file(&self) -> &Path {
        match self {
            Self::IncludeModule { file, .. }
            | Self::AddDependency { file, .. }
            | Self::MergeYaml { file, .. } => file,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::IncludeModule { module, .. } => format!("include module {module}"),
            Self::AddDependency { declaration, .. } => format!("add {declaration}"),
            Self::MergeYaml { overlay, .. } => format!("merge {} top-level key(s)", overlay.len()),
        }
    }

    /// Apply to `current` (`None` when the file does not exist yet).
    pub fn apply(&self, current: Option<&str>) -> Result<EditOutcome, DomainError> {
        match self {
            Self::IncludeModule { module, .. } => Ok(match current {
                Some(text) => ensure_include(text, module)
                    .map(EditOutcome::replaced)
                    .unwrap_or_else(EditOutcome::unchanged),
                None => EditOutcome::replaced(format!("{}\n", include_line(module))),
            }),
            Self::AddDependency { declaration, .. } => Ok(match current {
                Some(text) => ensure_dependency(text, declaration)
                    .map(EditOutcome::replaced)
                    .unwrap_or_else(EditOutcome::unchanged),
                None => EditOutcome::replaced(format!(
                    "dependencies {{\n{INDENT}{declaration}\n}}\n"
                )),
            }),
            Self::MergeYaml { file, overlay } => {
                let name = file.display().to_string();
                let base = parse_document(&name, current.unwrap_or_default())?;
                let result = YamlMergeEngine::new().merge(&base, overlay);
                let content = if result.changed() || current.is_none() {
                    Some(render_document(&name, result.merged())?)
                } else {
                    None
                };
                Ok(EditOutcome {
                    content,
                    added_keys: result.added_keys().to_vec(),
                    conflicts: result.conflicts().to_vec(),
                })
            }
        }
    }
}

fn include_line(module: &str) -> String {
    format!("include(\"{module}\")")
}

/// Append an `include("module")` line unless the module is already listed.
pub fn ensure_include(settings: &str, module: &str) -> Option<String> {
    let quoted = format!("\"{module}\"");
    let quoted_colon = format!("\":{module}\"");
    let listed = settings.lines().any(|line| {
        let line = line.trim_start();
        line.starts_with("include") && (line.contains(&quoted) || line.contains(&quoted_colon))
    });
    if listed {
        return None;
    }

    let mut out = settings.to_string();
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&include_line(module));
    out.push('\n');
    Some(out)
}

/// Insert `declaration` into the `dependencies { }` block unless present.
///
/// Placement: after the last line using the same configuration, otherwise
/// just before the block's closing brace. A missing block is appended.
pub fn ensure_dependency(build_script: &str, declaration: &str) -> Option<String> {
    let declaration = declaration.trim();
    if build_script.lines().any(|l| l.trim() == declaration) {
        return None;
    }

    let Some(block_open) = find_dependencies_block(build_script) else {
        let mut out = build_script.to_string();
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&format!("\ndependencies {{\n{INDENT}{declaration}\n}}\n"));
        return Some(out);
    };

    // Malformed scripts with an unbalanced block are left untouched.
    let block_close = find_matching_closing_brace(build_script, block_open)?;
    let configuration = declaration.split('(').next().unwrap_or(declaration);
    let marker = format!("{configuration}(");

    let body_start = block_open + 1;
    let body = &build_script[body_start..block_close];

    let mut insert_at = None;
    let mut peer_indent = None;
    let mut body_indent = None;
    let mut offset = body_start;
    for (n, line) in body.split_inclusive('\n').enumerate() {
        let trimmed = line.trim_start();
        let leading = &line[..line.len() - trimmed.len()];
        if trimmed.starts_with(&marker) {
            insert_at = Some(offset + line.len());
            peer_indent = Some(leading);
        } else if n > 0 && body_indent.is_none() && !trimmed.is_empty() && !trimmed.starts_with('}') {
            body_indent = Some(leading);
        }
        offset += line.len();
    }

    let line_start = build_script[..block_close]
        .rfind('\n')
        .map(|i| i + 1)
        .unwrap_or(0);
    let before_brace = &build_script[line_start..block_close];
    let indent = match peer_indent.or(body_indent) {
        Some(indent) => indent.to_string(),
        None => {
            let closing = &before_brace[..before_brace.len() - before_brace.trim_start().len()];
            format!("{closing}{INDENT}")
        }
    };

    let pos = match insert_at {
        Some(pos) => pos,
        // On its own line right before the closing brace.
        None if before_brace.trim().is_empty() => line_start,
        None => block_close,
    };
    let (head, tail) = build_script.split_at(pos);
    let mut out = String::with_capacity(build_script.len() + declaration.len() + 8);
    out.push_str(head);
    if !head.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&indent);
    out.push_str(declaration);
    out.push('\n');
    out.push_str(tail);
    Some(out)
}

/// Byte index of the `{` opening the top-level `dependencies` block.
///
/// Blocks nested in `buildscript`, `allprojects` or `subprojects` are
/// skipped, as are occurrences in strings and line comments.
fn find_dependencies_block(script: &str) -> Option<usize> {
    const KEYWORD: &str = "dependencies";
    let bytes = script.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut at_line_start = true;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            match b {
                b'\\' if !escaped => escaped = true,
                b'"' if !escaped => in_string = false,
                _ => escaped = false,
            }
            i += 1;
            continue;
        }
        match b {
            b'\n' => at_line_start = true,
            b' ' | b'\t' | b'\r' => {}
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = script[i..].find('\n').map_or(bytes.len(), |n| i + n);
                continue;
            }
            _ => {
                match b {
                    b'"' => in_string = true,
                    b'{' => depth += 1,
                    b'}' => depth = depth.saturating_sub(1),
                    b'd' if depth == 0 && at_line_start && script[i..].starts_with(KEYWORD) => {
                        let rest = script[i + KEYWORD.len()..].trim_start();
                        if rest.starts_with('{') {
                            return Some(script.len() - rest.len());
                        }
                    }
                    _ => {}
                }
                at_line_start = false;
            }
        }
        i += 1;
    }
    None
}

/// Index of the `}` matching the `{` at `open`, ignoring braces in strings.
pub fn find_matching_closing_brace(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        if in_string {
            match b {
                b'\\' if !escaped => escaped = true,
                b'"' if !escaped => in_string = false,
                _ => escaped = false,
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
