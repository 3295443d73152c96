//! Validated schema with name resolution.
//!
//! A [`Schema`] is built once, never mutated, and only hands out shared
//! references, so one instance can back any number of concurrent parses.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::validate::{SchemaError, validate_fields};
use crate::{FieldKind, FieldSchema};

/// Position of a field within its schema, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(usize);

impl FieldId {
    /// Returns the declaration index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A validated, immutable set of fields.
///
/// # Examples
///
/// ```
/// use argbind_core::*;
///
/// let schema = Schema::builder("my-option")
///     .field(FieldSchema::flag(Some('f'), Some("foo")))
///     .field(FieldSchema::valued(Some('b'), Some("bar"), ValueType::Int).with_default(Value::Int(123)))
///     .field(FieldSchema::positional("hahaha", ValueType::String))
///     .field(FieldSchema::positional_list("asdf"))
///     .build()
///     .unwrap();
///
/// let (_, bar) = schema.resolve_short('b').unwrap();
/// assert_eq!(bar.name, "bar");
/// assert!(schema.resolve_long("ba").is_none());
///
/// let positional: Vec<_> = schema.positional_entries().into_iter().map(|(_, f)| f.name.as_str()).collect();
/// assert_eq!(positional, vec!["hahaha", "asdf"]);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    fields: Vec<FieldSchema>,
    #[serde(skip)]
    shorts: HashMap<char, FieldId>,
    #[serde(skip)]
    longs: HashMap<String, FieldId>,
}

impl Schema {
    /// Builds a schema from fields in declaration order.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found by
    /// [`validate_fields`](crate::validate_fields), or
    /// [`SchemaError::EmptySchemaName`] for a blank name.
    pub fn new(name: impl Into<String>, fields: Vec<FieldSchema>) -> Result<Self, SchemaError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SchemaError::EmptySchemaName);
        }
        if let Some(err) = validate_fields(&fields).into_iter().next() {
            return Err(err);
        }

        let mut shorts = HashMap::new();
        let mut longs = HashMap::new();
        for (idx, field) in fields.iter().enumerate() {
            if let Some(short) = field.short {
                shorts.insert(short, FieldId(idx));
            }
            if let Some(long) = &field.long {
                longs.insert(long.clone(), FieldId(idx));
            }
        }

        debug!(schema = %name, fields = fields.len(), "built schema");
        Ok(Self {
            name,
            description: None,
            fields,
            shorts,
            longs,
        })
    }

    /// Returns a new [`SchemaBuilder`].
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// All fields in declaration order.
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Iterates fields together with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &FieldSchema)> {
        self.fields
            .iter()
            .enumerate()
            .map(|(idx, field)| (FieldId(idx), field))
    }

    /// Returns the field with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this schema.
    pub fn get(&self, id: FieldId) -> &FieldSchema {
        &self.fields[id.0]
    }

    /// Finds a field by its name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Resolves a short option character. Exact match only.
    pub fn resolve_short(&self, short: char) -> Option<(FieldId, &FieldSchema)> {
        let id = *self.shorts.get(&short)?;
        Some((id, self.get(id)))
    }

    /// Resolves a long option name given without the leading `--`. Exact
    /// match only, abbreviations are not accepted.
    pub fn resolve_long(&self, long: &str) -> Option<(FieldId, &FieldSchema)> {
        let id = *self.longs.get(long)?;
        Some((id, self.get(id)))
    }

    /// Returns the single positional (if any) followed by the positional
    /// list (if any).
    pub fn positional_entries(&self) -> Vec<(FieldId, &FieldSchema)> {
        let single = self
            .iter()
            .find(|(_, f)| matches!(f.kind, FieldKind::PositionalSingle(_)));
        let list = self
            .iter()
            .find(|(_, f)| f.kind == FieldKind::PositionalList);
        single.into_iter().chain(list).collect()
    }
}

/// Incremental [`Schema`] construction.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    description: Option<String>,
    fields: Vec<FieldSchema>,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    /// Adds a description.
    pub fn description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Appends a field.
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends several fields.
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldSchema>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Validates the fields and builds the schema.
    ///
    /// # Errors
    ///
    /// Same as [`Schema::new`].
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut schema = Schema::new(self.name, self.fields)?;
        schema.description = self.description;
        Ok(schema)
    }
}
