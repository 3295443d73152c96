//! Schema definition files.
//!
//! Defines the YAML/JSON format schemas are declared in and its conversion to
//! validated [`Schema`] values.
//!
//! # Example YAML
//!
//! ```yaml
//! schemas:
//!   - name: my-option
//!     fields:
//!       - kind: flag
//!         options: ["--foo", "-f"]
//!       - kind: count
//!         options: ["--verbose", "-v"]
//!       - kind: arg
//!         options: ["--bar", "-b"]
//!         type: int
//!         default: 123
//!       - kind: arg
//!         options: ["--qwer"]
//!       - kind: arg
//!         options: ["haha"]
//!         name: hahaha
//!       - kind: rest
//!         options: ["asdf"]
//! ```
//!
//! An `options` list holding a single bare identifier declares a positional
//! field; anything else is a list of `-x` / `--long-name` spellings.

use std::sync::LazyLock;

use argbind_core::{FieldSchema, Schema, Value, ValueType};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};

static POSITIONAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("static regex must compile"));

/// Top-level contents of a definition file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefinitionFile {
    pub schemas: Vec<SchemaDefinition>,
}

/// One named schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

/// How a defined field behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionKind {
    /// Boolean flag.
    Flag,
    /// Occurrence counter.
    Count,
    /// Valued option, or the single positional when spelled as a bare name.
    Arg,
    /// Trailing positional list.
    Rest,
}

/// One field as written in a definition file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDefinition {
    pub kind: DefinitionKind,
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SchemaDefinition {
    /// Converts every field and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::InvalidDefinition`] for a malformed field and
    /// [`GenError::InvalidSchema`] when the fields conflict with each other.
    pub fn to_schema(&self) -> Result<Schema> {
        let fields = self
            .fields
            .iter()
            .map(|field| field.to_field(&self.name))
            .collect::<Result<Vec<_>>>()?;

        let mut builder = Schema::builder(self.name.as_str()).fields(fields);
        if let Some(desc) = &self.description {
            builder = builder.description(desc);
        }
        builder.build().map_err(|source| GenError::InvalidSchema {
            schema: self.name.clone(),
            source,
        })
    }
}

impl FieldDefinition {
    /// Label used in error messages: the explicit name or the first spelling.
    fn label(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.options.first().cloned())
            .unwrap_or_else(|| "<unnamed>".to_string())
    }

    fn invalid(&self, schema: &str, message: impl Into<String>) -> GenError {
        GenError::InvalidDefinition {
            schema: schema.to_string(),
            field: self.label(),
            message: message.into(),
        }
    }

    /// Returns the positional identifier if `options` is a single bare name.
    fn positional_name(&self) -> Option<&str> {
        match self.options.as_slice() {
            [only] if POSITIONAL_RE.is_match(only) => Some(only),
            _ => None,
        }
    }

    /// Splits option spellings into at most one short and one long form.
    fn spellings(&self, schema: &str) -> Result<(Option<char>, Option<String>)> {
        let mut short = None;
        let mut long: Option<String> = None;

        for option in &self.options {
            if let Some(name) = option.strip_prefix("--") {
                if name.is_empty() {
                    return Err(self.invalid(schema, format!("bad long option {option:?}")));
                }
                if long.is_some() {
                    return Err(self.invalid(schema, "multiple long options"));
                }
                long = Some(name.to_string());
            } else if let Some(rest) = option.strip_prefix('-') {
                let mut chars = rest.chars();
                let (Some(c), None) = (chars.next(), chars.next()) else {
                    return Err(self.invalid(schema, format!("bad short option {option:?}")));
                };
                if short.is_some() {
                    return Err(self.invalid(schema, "multiple short options"));
                }
                short = Some(c);
            } else {
                return Err(self.invalid(schema, format!("bad option {option:?}")));
            }
        }
        Ok((short, long))
    }

    /// Converts this definition into a [`FieldSchema`].
    ///
    /// # Errors
    ///
    /// Returns [`GenError::InvalidDefinition`] when the options are malformed
    /// or the field declares a parameter its kind does not accept.
    pub fn to_field(&self, schema: &str) -> Result<FieldSchema> {
        if self.options.is_empty() {
            return Err(self.invalid(schema, "at least one option is required"));
        }
        match self.kind {
            DefinitionKind::Flag | DefinitionKind::Count | DefinitionKind::Rest
                if self.default.is_some() =>
            {
                return Err(self.invalid(schema, "\"default\" is not allowed here"));
            }
            _ => {}
        }
        match self.kind {
            DefinitionKind::Flag | DefinitionKind::Count | DefinitionKind::Rest
                if self.value_type.is_some() =>
            {
                return Err(self.invalid(schema, "\"type\" is not allowed here"));
            }
            DefinitionKind::Flag | DefinitionKind::Count if self.required.is_some() => {
                return Err(self.invalid(schema, "\"required\" is not allowed here"));
            }
            _ => {}
        }

        let ty = self.value_type.unwrap_or_default();
        let mut field = match (self.kind, self.positional_name()) {
            (DefinitionKind::Flag | DefinitionKind::Count, Some(_)) => {
                return Err(self.invalid(schema, "flags need an option spelling"));
            }
            (DefinitionKind::Rest, None) => {
                return Err(self.invalid(schema, "rest takes a single bare name"));
            }
            (DefinitionKind::Flag, None) => {
                let (short, long) = self.spellings(schema)?;
                FieldSchema::flag(short, long.as_deref())
            }
            (DefinitionKind::Count, None) => {
                let (short, long) = self.spellings(schema)?;
                FieldSchema::counter(short, long.as_deref())
            }
            (DefinitionKind::Arg, None) => {
                let (short, long) = self.spellings(schema)?;
                FieldSchema::valued(short, long.as_deref(), ty)
            }
            (DefinitionKind::Arg, Some(name)) => FieldSchema::positional(name, ty),
            (DefinitionKind::Rest, Some(name)) => FieldSchema::positional_list(name),
        };

        if let Some(name) = &self.name {
            field = field.with_name(name);
        }
        if let Some(default) = &self.default {
            field = field.with_default(default.clone());
        }
        match self.required {
            Some(true) => field = field.required(),
            Some(false) => field = field.optional(),
            None => {}
        }
        if let Some(desc) = &self.description {
            field = field.with_description(desc);
        }
        Ok(field)
    }
}
