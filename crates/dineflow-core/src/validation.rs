//! Request validation
//!
//! Every input type declares a [`Schema`] describing field kinds, optionality,
//! defaults and cross-field rules; numeric and length bounds live on the typed
//! input as `validator` attributes. [`validate`] runs both and either returns
//! the normalized, typed value or every issue it found.
//!
//! Fields are accepted under their canonical camelCase name or the snake_case
//! spelling some clients still send; the normalized payload only carries the
//! canonical name.

use std::collections::HashSet;
use std::ops::Deref;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use dineflow_shared::utils::{to_camel_case, to_snake_case};

use crate::error::{DomainError, Issue};
use crate::services::tenant_context::resolve_tenant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// String, trimmed.
    Text,
    /// Canonical UUID accepted by the tenant resolver.
    TenantId,
    Uuid,
    /// Integer amount in minor currency units. Fractional numbers are rejected.
    Money,
    /// Whole number within `min..=max`.
    Integer { min: i64, max: i64 },
    Boolean { default: Option<bool> },
    /// Three ASCII letters, uppercased.
    Currency,
    /// Array of strings, trimmed, lowercased, de-duplicated.
    Tags { max_item_len: usize },
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: true }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: false }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Rule {
    AtLeastOneOf(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub fields: &'static [FieldSpec],
    pub rules: &'static [Rule],
}

/// Implemented by every payload type a route accepts.
pub trait RequestSchema: DeserializeOwned + Validate {
    const SCHEMA: Schema;
}

/// A payload that passed [`validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Validated<T>(T);

impl<T> Validated<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

pub fn validate<T: RequestSchema>(raw: &Value) -> Result<Validated<T>, DomainError> {
    let normalized = normalize(raw, &T::SCHEMA).map_err(rejection)?;

    let typed: T = serde_json::from_value(Value::Object(normalized))
        .map_err(|e| rejection(vec![Issue::new("", e.to_string())]))?;

    typed
        .validate()
        .map_err(|errors| rejection(bound_issues(&errors)))?;

    Ok(Validated(typed))
}

/// Reads a string field under either spelling without validating anything else.
pub fn raw_str<'a>(raw: &'a Value, canonical: &str) -> Option<&'a str> {
    let object = raw.as_object()?;
    object
        .get(canonical)
        .filter(|v| !v.is_null())
        .or_else(|| object.get(&to_snake_case(canonical)).filter(|v| !v.is_null()))
        .and_then(Value::as_str)
}

fn rejection(mut issues: Vec<Issue>) -> DomainError {
    issues.sort_by(|a, b| a.path.cmp(&b.path));
    DomainError::Validation(issues)
}

/// Shape, type and normalization pass. Collects every issue.
pub fn normalize(raw: &Value, schema: &Schema) -> Result<Map<String, Value>, Vec<Issue>> {
    let object = match raw.as_object() {
        Some(object) => object,
        None => return Err(vec![Issue::new("", "expected a JSON object")]),
    };

    let mut issues = Vec::new();
    let mut normalized = Map::new();

    for field in schema.fields {
        let alias = to_snake_case(field.name);
        let canonical_value = object.get(field.name).filter(|v| !v.is_null());
        let alias_value = if alias != field.name {
            object.get(&alias).filter(|v| !v.is_null())
        } else {
            None
        };

        if let (Some(a), Some(b)) = (canonical_value, alias_value) {
            if a != b {
                issues.push(Issue::new(
                    field.name,
                    format!("supplied as both {} and {} with different values", field.name, alias),
                ));
                continue;
            }
        }

        match canonical_value.or(alias_value) {
            Some(value) => match normalize_value(field, value, &mut issues) {
                Some(clean) => {
                    normalized.insert(field.name.to_string(), clean);
                }
                None => continue,
            },
            None => {
                if let FieldKind::Boolean { default: Some(default) } = field.kind {
                    normalized.insert(field.name.to_string(), Value::Bool(default));
                } else if field.required {
                    issues.push(Issue::new(field.name, "is required"));
                }
            }
        }
    }

    for rule in schema.rules {
        match rule {
            Rule::AtLeastOneOf(names) => {
                if !names.iter().any(|name| normalized.contains_key(*name)) {
                    issues.push(Issue::new(
                        "",
                        format!("at least one of {} must be provided", names.join(", ")),
                    ));
                }
            }
        }
    }

    if issues.is_empty() {
        Ok(normalized)
    } else {
        Err(issues)
    }
}

fn normalize_value(field: &FieldSpec, value: &Value, issues: &mut Vec<Issue>) -> Option<Value> {
    let path = field.name;
    let outcome = match field.kind {
        FieldKind::Text => match value.as_str() {
            Some(s) => Ok(Value::String(s.trim().to_string())),
            None => Err("must be a string"),
        },
        FieldKind::TenantId => match value.as_str().map(resolve_tenant) {
            Some(Ok(id)) => Ok(Value::String(id.to_string())),
            _ => Err("must be a canonical UUID"),
        },
        FieldKind::Uuid => match value.as_str().map(Uuid::parse_str) {
            Some(Ok(id)) => Ok(Value::String(id.to_string())),
            _ => Err("must be a UUID"),
        },
        FieldKind::Money => match value {
            Value::Number(n) if n.is_i64() => Ok(value.clone()),
            Value::Number(_) => Err("must be an integer amount in minor currency units (e.g. 1999 for 19.99)"),
            _ => Err("must be an integer amount in minor currency units"),
        },
        FieldKind::Integer { min, max } => match value.as_i64() {
            Some(n) if (min..=max).contains(&n) => Ok(value.clone()),
            Some(_) => Err("is out of range"),
            None if value.is_u64() => Err("is out of range"),
            None => Err("must be an integer"),
        },
        FieldKind::Boolean { .. } => match value {
            Value::Bool(_) => Ok(value.clone()),
            _ => Err("must be a boolean"),
        },
        FieldKind::Currency => match value.as_str().map(|s| s.trim().to_ascii_uppercase()) {
            Some(code) if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) => {
                Ok(Value::String(code))
            }
            _ => Err("must be a 3-letter ISO currency code"),
        },
        FieldKind::Tags { max_item_len } => return normalize_tags(path, value, max_item_len, issues),
    };

    match outcome {
        Ok(clean) => Some(clean),
        Err(message) => {
            issues.push(Issue::new(path, message));
            None
        }
    }
}

fn normalize_tags(
    path: &str,
    value: &Value,
    max_item_len: usize,
    issues: &mut Vec<Issue>,
) -> Option<Value> {
    let entries = match value.as_array() {
        Some(entries) => entries,
        None => {
            issues.push(Issue::new(path, "must be an array of strings"));
            return None;
        }
    };

    let before = issues.len();
    let mut seen = HashSet::new();
    let mut tags = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let item_path = format!("{}[{}]", path, index);
        let tag = match entry.as_str() {
            Some(tag) => tag.trim().to_lowercase(),
            None => {
                issues.push(Issue::new(item_path, "must be a string"));
                continue;
            }
        };
        if tag.is_empty() {
            continue;
        }
        if tag.chars().count() > max_item_len {
            issues.push(Issue::new(
                item_path,
                format!("must be at most {} characters", max_item_len),
            ));
            continue;
        }
        if seen.insert(tag.clone()) {
            tags.push(Value::String(tag));
        }
    }

    if issues.len() > before {
        None
    } else {
        Some(Value::Array(tags))
    }
}

/// Maps `validator` bound failures onto canonical field paths.
fn bound_issues(errors: &ValidationErrors) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        let field: &str = &field;
        let path = to_camel_case(field);
        for error in field_errors.iter() {
            let message = match &error.message {
                Some(message) => message.to_string(),
                None => format!("failed {} check", error.code),
            };
            issues.push(Issue::new(path.clone(), message));
        }
    }
    issues
}
