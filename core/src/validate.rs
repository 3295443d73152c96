//! Construction-time schema validation.
//!
//! A [`Schema`](crate::Schema) can only be built from fields that pass these
//! checks, so the parser never has to deal with ambiguous names or a
//! malformed positional layout.
//!
//! # Examples
//!
//! ```
//! use argbind_core::*;
//!
//! let fields = vec![
//!     FieldSchema::flag(Some('f'), Some("foo")),
//!     FieldSchema::counter(Some('f'), Some("force")),
//! ];
//! let errors = validate_fields(&fields);
//! assert_eq!(errors, vec![SchemaError::DuplicateShortOption('f')]);
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::{FieldKind, FieldSchema, Value, ValueType};

static SHORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]$").expect("static regex must compile"));
static LONG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9]*(-[A-Za-z0-9]+)*$").expect("static regex must compile")
});
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static regex must compile"));

/// Schema construction errors.
///
/// These are distinct from parse errors: a `SchemaError` means the schema
/// itself is inconsistent, independent of any input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Schema name is empty or whitespace-only.
    #[error("schema name cannot be empty")]
    EmptySchemaName,
    /// Field name is not a valid identifier.
    #[error("invalid field name: {0:?}")]
    InvalidFieldName(String),
    /// Two fields share the same name.
    #[error("duplicate field name: {0}")]
    DuplicateFieldName(String),
    /// An option field has neither short nor long form.
    #[error("option `{0}` must define a short or long form")]
    MissingOptionName(String),
    /// A positional field declares a short or long form.
    #[error("positional `{0}` cannot have a short or long form")]
    PositionalWithOptionName(String),
    /// Short form is not a single ASCII letter or digit.
    #[error("invalid short option: -{0}")]
    InvalidShortOption(char),
    /// Long form is not dash-separated alphanumeric words starting with a letter.
    #[error("invalid long option: --{0}")]
    InvalidLongOption(String),
    /// Two fields share a short character.
    #[error("duplicate short option: -{0}")]
    DuplicateShortOption(char),
    /// Two fields share a long name.
    #[error("duplicate long option: --{0}")]
    DuplicateLongOption(String),
    /// More than one single positional was declared.
    #[error("only one single positional is allowed, found another: {0}")]
    MultiplePositionalSingle(String),
    /// More than one positional list was declared.
    #[error("only one positional list is allowed, found another: {0}")]
    MultiplePositionalList(String),
    /// A single positional was declared after the positional list.
    #[error("single positional `{0}` must be declared before the positional list")]
    PositionalOrder(String),
    /// A default was declared on a flag or counter.
    #[error("field `{0}` cannot declare a default")]
    DefaultNotAllowed(String),
    /// A default does not match the field's type.
    #[error("default for `{field}` must be of type {expected}, got {found}")]
    DefaultTypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    /// A required field also declares a default.
    #[error("required field `{0}` cannot declare a default")]
    RequiredWithDefault(String),
}

/// Validates a list of fields, returning every problem found in
/// declaration order.
///
/// [`Schema::new`](crate::Schema::new) fails with the first of these.
pub fn validate_fields(fields: &[FieldSchema]) -> Vec<SchemaError> {
    let mut errors = Vec::new();
    let mut names = HashSet::new();
    let mut shorts = HashSet::new();
    let mut longs = HashSet::new();
    let mut single: Option<&str> = None;
    let mut list: Option<&str> = None;

    for field in fields {
        if !NAME_RE.is_match(&field.name) {
            errors.push(SchemaError::InvalidFieldName(field.name.clone()));
        } else if !names.insert(field.name.as_str()) {
            errors.push(SchemaError::DuplicateFieldName(field.name.clone()));
        }

        if field.kind.is_positional() {
            if field.short.is_some() || field.long.is_some() {
                errors.push(SchemaError::PositionalWithOptionName(field.name.clone()));
            }
        } else if field.short.is_none() && field.long.is_none() {
            errors.push(SchemaError::MissingOptionName(field.name.clone()));
        }

        if let Some(short) = field.short {
            if !SHORT_RE.is_match(short.encode_utf8(&mut [0; 4])) {
                errors.push(SchemaError::InvalidShortOption(short));
            } else if !shorts.insert(short) {
                errors.push(SchemaError::DuplicateShortOption(short));
            }
        }

        if let Some(long) = &field.long {
            if !LONG_RE.is_match(long) {
                errors.push(SchemaError::InvalidLongOption(long.clone()));
            } else if !longs.insert(long.as_str()) {
                errors.push(SchemaError::DuplicateLongOption(long.clone()));
            }
        }

        match field.kind {
            FieldKind::PositionalSingle(_) => {
                if single.is_some() {
                    errors.push(SchemaError::MultiplePositionalSingle(field.name.clone()));
                } else if list.is_some() {
                    errors.push(SchemaError::PositionalOrder(field.name.clone()));
                }
                single = single.or(Some(field.name.as_str()));
            }
            FieldKind::PositionalList => {
                if list.is_some() {
                    errors.push(SchemaError::MultiplePositionalList(field.name.clone()));
                }
                list = list.or(Some(field.name.as_str()));
            }
            FieldKind::Flag | FieldKind::Counter | FieldKind::Valued(_) => {}
        }

        errors.extend(validate_default(field));
    }

    errors
}

fn validate_default(field: &FieldSchema) -> Option<SchemaError> {
    let default = field.default.as_ref()?;
    if field.required {
        return Some(SchemaError::RequiredWithDefault(field.name.clone()));
    }
    let expected = match field.kind {
        FieldKind::Flag | FieldKind::Counter => {
            return Some(SchemaError::DefaultNotAllowed(field.name.clone()));
        }
        FieldKind::Valued(ty) | FieldKind::PositionalSingle(ty) => ty.as_str(),
        FieldKind::PositionalList => "list",
    };
    let matches = matches!(
        (field.kind, default),
        (FieldKind::Valued(ValueType::Int), Value::Int(_))
            | (FieldKind::PositionalSingle(ValueType::Int), Value::Int(_))
            | (FieldKind::Valued(ValueType::String), Value::Str(_))
            | (FieldKind::PositionalSingle(ValueType::String), Value::Str(_))
            | (FieldKind::PositionalList, Value::List(_))
    );
    if matches {
        None
    } else {
        Some(SchemaError::DefaultTypeMismatch {
            field: field.name.clone(),
            expected,
            found: default.type_name(),
        })
    }
}
