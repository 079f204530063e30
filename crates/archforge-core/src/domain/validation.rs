//! Input validators run before anything is planned or written.
//!
//! Every check returns all of its findings; callers aggregate them.

use std::collections::HashSet;

use crate::domain::component::{ComponentConfig, ProjectContext};
use crate::domain::error::DomainError;
use crate::domain::value_objects::ComponentKind;

pub const ID_TYPES: &[&str] = &["String", "Long", "UUID"];

/// Stateless validation rules for generation inputs.
pub struct ComponentValidator;

impl ComponentValidator {
    /// All findings for one component in one project.
    pub fn validate(component: &ComponentConfig, project: &ProjectContext) -> Vec<DomainError> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_namespace(&project.base_namespace) {
            errors.push(e);
        }

        let kind = component.kind;
        if component.name.trim().is_empty() {
            errors.push(DomainError::MissingField {
                component: kind.label().to_string(),
                field: "name",
            });
            return errors;
        }

        match kind {
            ComponentKind::Project => {
                if let Err(e) = Self::validate_project_name(&component.name) {
                    errors.push(e);
                }
            }
            ComponentKind::Entity => {
                errors.extend(Self::validate_class_name(kind.label(), &component.name).err());
                errors.extend(Self::validate_fields(component));
                if let Some(id) = &component.id_type {
                    if !ID_TYPES.contains(&id.as_str()) {
                        errors.push(DomainError::UnknownValue {
                            kind: "id type",
                            value: id.clone(),
                            expected: ID_TYPES.to_vec(),
                        });
                    }
                }
            }
            ComponentKind::UseCase => {
                errors.extend(Self::validate_class_name(kind.label(), &component.name).err());
                if component.methods.is_empty() {
                    errors.push(DomainError::MissingField {
                        component: format!("use case '{}'", component.name),
                        field: "methods",
                    });
                }
                errors.extend(Self::validate_methods(component));
            }
            ComponentKind::InputAdapter | ComponentKind::OutputAdapter => {
                errors.extend(Self::validate_class_name(kind.label(), &component.name).err());
                let owner_field = if kind == ComponentKind::InputAdapter {
                    "use-case"
                } else {
                    "entity"
                };
                match component.entity.as_deref().map(str::trim) {
                    None | Some("") => errors.push(DomainError::MissingField {
                        component: format!("adapter '{}'", component.name),
                        field: owner_field,
                    }),
                    Some(owner) => {
                        errors.extend(Self::validate_class_name(owner_field, owner).err());
                    }
                }
                if component
                    .adapter_type
                    .as_deref()
                    .is_none_or(|t| t.trim().is_empty())
                {
                    errors.push(DomainError::MissingField {
                        component: format!("adapter '{}'", component.name),
                        field: "type",
                    });
                }
                errors.extend(Self::validate_methods(component));
            }
        }

        errors
    }

    /// Dot-separated segments matching `[a-z][a-z0-9_]*`.
    pub fn validate_namespace(namespace: &str) -> Result<(), DomainError> {
        let invalid = |reason: String| DomainError::InvalidNamespace {
            namespace: namespace.to_string(),
            reason,
        };
        if namespace.is_empty() {
            return Err(invalid("namespace cannot be empty".into()));
        }
        for segment in namespace.split('.') {
            let mut chars = segment.chars();
            let valid = chars.next().is_some_and(|c| c.is_ascii_lowercase())
                && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
            if !valid {
                return Err(invalid(format!(
                    "segment '{segment}' must match [a-z][a-z0-9_]*"
                )));
            }
        }
        Ok(())
    }

    /// PascalCase class name: `[A-Z][A-Za-z0-9]*`.
    pub fn validate_class_name(kind: &'static str, name: &str) -> Result<(), DomainError> {
        let mut chars = name.chars();
        let starts_upper = chars.next().is_some_and(|c| c.is_ascii_uppercase());
        if !starts_upper {
            return Err(DomainError::InvalidName {
                kind,
                name: name.to_string(),
                reason: "must start with an uppercase letter".into(),
            });
        }
        if !chars.all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::InvalidName {
                kind,
                name: name.to_string(),
                reason: "may only contain letters and digits".into(),
            });
        }
        Ok(())
    }

    /// camelCase member name: `[a-z][A-Za-z0-9]*`.
    pub fn validate_member_name(kind: &'static str, name: &str) -> Result<(), DomainError> {
        let mut chars = name.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_lowercase())
            && chars.all(|c| c.is_ascii_alphanumeric());
        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidName {
                kind,
                name: name.to_string(),
                reason: "must be camelCase (start lowercase, letters and digits only)".into(),
            })
        }
    }

    /// Project directory name: `[A-Za-z][A-Za-z0-9_-]*`.
    pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
        let mut chars = name.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidName {
                kind: "project",
                name: name.to_string(),
                reason: "use letters, digits, '-' and '_', starting with a letter".into(),
            })
        }
    }

    fn validate_fields(component: &ComponentConfig) -> Vec<DomainError> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();
        for field in &component.fields {
            if let Err(e) = Self::validate_member_name("field", &field.name) {
                errors.push(e);
            }
            if !seen.insert(field.name.as_str()) {
                errors.push(DomainError::InvalidField {
                    definition: format!("{}:{}", field.name, field.ty),
                    reason: "duplicate field name".into(),
                });
            }
        }
        errors
    }

    fn validate_methods(component: &ComponentConfig) -> Vec<DomainError> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();
        for method in &component.methods {
            if let Err(e) = Self::validate_member_name("method", &method.name) {
                errors.push(e);
            }
            if !seen.insert(method.name.as_str()) {
                errors.push(DomainError::InvalidMethod {
                    definition: method.to_string(),
                    reason: "duplicate method name".into(),
                });
            }
            for p in &method.parameters {
                if let Err(e) = Self::validate_member_name("parameter", &p.name) {
                    errors.push(e);
                }
            }
        }
        errors
    }
}
