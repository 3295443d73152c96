//! The result of a successful parse.

use std::fmt;

use argbind_core::Value;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One field of a [`ParsedArgs`].
#[derive(Debug, Clone)]
pub struct BoundField {
    pub name: String,
    pub value: Value,
    /// `true` if the value came from the input rather than a default.
    pub explicit: bool,
}

/// Every field of a schema, each bound to exactly one value.
///
/// Fields keep the schema's declaration order. Two results compare equal when
/// they come from schemas of the same name and hold the same value for every
/// field, whether a value was typed or defaulted does not matter.
///
/// # Examples
///
/// ```
/// use argbind_core::{FieldSchema, Schema};
///
/// let schema = Schema::builder("ls")
///     .field(FieldSchema::flag(Some('a'), Some("all")))
///     .field(FieldSchema::positional_list("paths"))
///     .build()
///     .unwrap();
///
/// let args = argbind_parser::parse(&["-a", "src"], &schema).unwrap();
/// assert!(args.flag("all"));
/// assert_eq!(args.list("paths"), Some(&["src".to_string()][..]));
/// assert_eq!(args.to_string(), "<ls all=true paths=[\"src\"]>");
/// ```
#[derive(Debug, Clone)]
pub struct ParsedArgs {
    schema: String,
    fields: Vec<BoundField>,
}

impl ParsedArgs {
    pub(crate) fn new(schema: &str, fields: Vec<BoundField>) -> Self {
        Self {
            schema: schema.to_string(),
            fields,
        }
    }

    /// Name of the schema these values were bound against.
    pub fn schema_name(&self) -> &str {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoundField> {
        self.fields.iter()
    }

    fn bound(&self, name: &str) -> Option<&BoundField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the value of a field, or `None` if the schema has no such field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bound(name).map(|f| &f.value)
    }

    /// Returns `true` if the field was set by the input.
    pub fn is_present(&self, name: &str) -> bool {
        self.bound(name).is_some_and(|f| f.explicit)
    }

    /// Value of a flag. Unknown names and non-flag fields read as `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Value of a counter. Unknown names and non-counter fields read as `0`.
    pub fn count(&self, name: &str) -> u32 {
        self.get(name).and_then(Value::as_count).unwrap_or(0)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn list(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(Value::as_list)
    }
}

impl PartialEq for ParsedArgs {
    fn eq(&self, other: &Self) -> bool {
        self.schema == other.schema
            && self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(&other.fields)
                .all(|(a, b)| a.name == b.name && a.value == b.value)
    }
}

impl Eq for ParsedArgs {}

impl fmt::Display for ParsedArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.schema)?;
        for field in &self.fields {
            write!(f, " {}={}", field.name, field.value)?;
        }
        f.write_str(">")
    }
}

impl Serialize for ParsedArgs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            map.serialize_entry(&field.name, &field.value)?;
        }
        map.end()
    }
}
