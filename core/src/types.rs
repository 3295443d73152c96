//! Field schema type definitions.
//!
//! This module defines the data model used to describe the fields a command
//! line accepts. Every field has a [`FieldKind`] drawn from a closed set, an
//! optional short character and/or long name, and a default [`Value`] used
//! when the field is not supplied.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Primitive type of a value-carrying field.
///
/// Only [`FieldKind::Valued`] and [`FieldKind::PositionalSingle`] carry a
/// value type; flags, counters and positional lists have a fixed shape.
///
/// # Examples
///
/// ```
/// use argbind_core::{Value, ValueType};
///
/// assert_eq!(ValueType::Int.convert("456"), Ok(Value::Int(456)));
/// assert!(ValueType::Int.convert("abc").is_err());
/// assert_eq!(ValueType::String.convert("abc"), Ok(Value::Str("abc".into())));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Signed integer.
    Int,
    /// Verbatim string (the default).
    #[default]
    String,
}

impl ValueType {
    /// Converts a raw token into a value of this type.
    ///
    /// The error is the conversion failure message, without any reference to
    /// the option it came from.
    pub fn convert(self, raw: &str) -> Result<Value, String> {
        match self {
            ValueType::Int => raw
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|err| err.to_string()),
            ValueType::String => Ok(Value::Str(raw.to_string())),
        }
    }

    /// Value used when an optional field declares no default.
    pub fn zero(self) -> Value {
        match self {
            ValueType::Int => Value::Int(0),
            ValueType::String => Value::Str(String::new()),
        }
    }

    /// Returns the lowercase name of the type (`"int"` or `"string"`).
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Int => "int",
            ValueType::String => "string",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a field.
///
/// The set is closed: every place where parsing behavior differs matches on
/// this enum exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "type")]
pub enum FieldKind {
    /// Boolean option without a value, set to `true` by presence.
    Flag,
    /// Option without a value that counts its occurrences.
    Counter,
    /// Option taking exactly one value.
    Valued(ValueType),
    /// First positional token.
    PositionalSingle(ValueType),
    /// All positional tokens after the single positional.
    PositionalList,
}

impl FieldKind {
    /// Returns `true` for the two positional kinds.
    pub fn is_positional(self) -> bool {
        matches!(self, FieldKind::PositionalSingle(_) | FieldKind::PositionalList)
    }

    /// Returns `true` if an option of this kind consumes a value.
    pub fn takes_value(self) -> bool {
        matches!(self, FieldKind::Valued(_))
    }
}

/// A bound field value.
///
/// # Examples
///
/// ```
/// use argbind_core::Value;
///
/// assert_eq!(Value::Count(2).to_string(), "2");
/// assert_eq!(Value::Str("abc".into()).to_string(), "\"abc\"");
/// assert_eq!(
///     Value::List(vec!["A1".into(), "A2".into()]).to_string(),
///     "[\"A1\", \"A2\"]",
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<String>),
    Count(u32),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(it) => Some(*it),
            _ => None,
        }
    }

    pub fn as_count(&self) -> Option<u32> {
        match self {
            Value::Count(it) => Some(*it),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(it) => Some(*it),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(it) => Some(it),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(it) => Some(it),
            _ => None,
        }
    }

    /// Short name of the variant, used in validation messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Count(_) => "count",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(it) => write!(f, "{it}"),
            Value::Int(it) => write!(f, "{it}"),
            Value::Count(it) => write!(f, "{it}"),
            Value::Str(it) => write!(f, "{it:?}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item:?}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Schema for a single field.
///
/// Use the constructors [`flag`](FieldSchema::flag),
/// [`counter`](FieldSchema::counter), [`valued`](FieldSchema::valued),
/// [`positional`](FieldSchema::positional) and
/// [`positional_list`](FieldSchema::positional_list), then chain builder
/// methods such as [`with_default`](FieldSchema::with_default).
///
/// Option fields derive their name from the long form (`--dry-run` becomes
/// `dry_run`), falling back to the short character.
///
/// # Examples
///
/// ```
/// use argbind_core::{FieldKind, FieldSchema, Value, ValueType};
///
/// let bar = FieldSchema::valued(Some('b'), Some("bar"), ValueType::Int)
///     .with_default(Value::Int(123));
/// assert_eq!(bar.name, "bar");
/// assert!(!bar.required);
/// assert_eq!(bar.default_value(), Value::Int(123));
///
/// let verbose = FieldSchema::counter(Some('v'), Some("verbose"));
/// assert_eq!(verbose.kind, FieldKind::Counter);
/// assert_eq!(verbose.display_name(), "--verbose");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Identifier used by result accessors and generated code.
    pub name: String,
    /// Kind of the field.
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Short form character (e.g. `'v'` for `-v`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    /// Long form without the leading dashes (e.g. `"verbose"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    /// Whether the field must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Value used when the field is not supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldSchema {
    fn option(kind: FieldKind, short: Option<char>, long: Option<&str>) -> Self {
        Self {
            name: derive_name(short, long),
            kind,
            short,
            long: long.map(String::from),
            required: false,
            default: None,
            description: None,
        }
    }

    /// Creates a boolean flag.
    pub fn flag(short: Option<char>, long: Option<&str>) -> Self {
        Self::option(FieldKind::Flag, short, long)
    }

    /// Creates an occurrence counter.
    pub fn counter(short: Option<char>, long: Option<&str>) -> Self {
        Self::option(FieldKind::Counter, short, long)
    }

    /// Creates a required option taking one value.
    ///
    /// # Examples
    ///
    /// ```
    /// use argbind_core::{FieldSchema, ValueType};
    ///
    /// let qwer = FieldSchema::valued(None, Some("qwer"), ValueType::String);
    /// assert!(qwer.required);
    /// assert!(qwer.kind.takes_value());
    /// ```
    pub fn valued(short: Option<char>, long: Option<&str>, value_type: ValueType) -> Self {
        Self {
            required: true,
            ..Self::option(FieldKind::Valued(value_type), short, long)
        }
    }

    /// Creates the required single positional field.
    pub fn positional(name: &str, value_type: ValueType) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::PositionalSingle(value_type),
            short: None,
            long: None,
            required: true,
            default: None,
            description: None,
        }
    }

    /// Creates the trailing positional list, which accepts zero or more tokens.
    pub fn positional_list(name: &str) -> Self {
        Self {
            kind: FieldKind::PositionalList,
            required: false,
            ..Self::positional(name, ValueType::String)
        }
    }

    /// Overrides the derived field name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Sets the default value and makes the field optional.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self.required = false;
        self
    }

    /// Makes the field optional without declaring a default.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Makes the field required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Returns the value bound when the field is absent from the input.
    pub fn default_value(&self) -> Value {
        match self.kind {
            FieldKind::Flag => Value::Bool(false),
            FieldKind::Counter => Value::Count(0),
            FieldKind::Valued(ty) | FieldKind::PositionalSingle(ty) => {
                self.default.clone().unwrap_or_else(|| ty.zero())
            }
            FieldKind::PositionalList => self
                .default
                .clone()
                .unwrap_or_else(|| Value::List(Vec::new())),
        }
    }

    /// Returns the name a user would type: `--long`, `-s`, or the bare field
    /// name for positionals.
    pub fn display_name(&self) -> String {
        match (&self.long, self.short) {
            (Some(long), _) => format!("--{long}"),
            (None, Some(short)) => format!("-{short}"),
            (None, None) => self.name.clone(),
        }
    }

    /// Checks if this field answers to the given short character.
    pub fn matches_short(&self, short: char) -> bool {
        self.short == Some(short)
    }

    /// Checks if this field answers to the given long name (without dashes).
    pub fn matches_long(&self, long: &str) -> bool {
        self.long.as_deref() == Some(long)
    }
}

fn derive_name(short: Option<char>, long: Option<&str>) -> String {
    match (long, short) {
        (Some(long), _) => long.replace('-', "_"),
        (None, Some(short)) => short.to_string(),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_derived_from_long_form() {
        let flag = FieldSchema::flag(Some('n'), Some("dry-run"));
        assert_eq!(flag.name, "dry_run");

        let short_only = FieldSchema::counter(Some('v'), None);
        assert_eq!(short_only.name, "v");
        assert_eq!(short_only.display_name(), "-v");
    }

    #[test]
    fn test_default_values_per_kind() {
        assert_eq!(FieldSchema::flag(Some('f'), None).default_value(), Value::Bool(false));
        assert_eq!(FieldSchema::counter(Some('v'), None).default_value(), Value::Count(0));
        assert_eq!(
            FieldSchema::valued(None, Some("bar"), ValueType::Int)
                .optional()
                .default_value(),
            Value::Int(0)
        );
        assert_eq!(
            FieldSchema::positional("file", ValueType::String)
                .with_default(Value::Str("-".into()))
                .default_value(),
            Value::Str("-".into())
        );
        assert_eq!(FieldSchema::positional_list("rest").default_value(), Value::List(vec![]));
    }

    #[test]
    fn test_with_default_makes_optional() {
        let field = FieldSchema::valued(Some('b'), Some("bar"), ValueType::Int);
        assert!(field.required);
        let field = field.with_default(Value::Int(123));
        assert!(!field.required);
    }

    #[test]
    fn test_int_conversion_reports_reason() {
        let err = ValueType::Int.convert("12x").unwrap_err();
        assert_eq!(err, "invalid digit found in string");
    }

    #[test]
    fn test_field_schema_serializes_kind_inline() {
        let field = FieldSchema::valued(Some('b'), Some("bar"), ValueType::Int)
            .with_default(Value::Int(123));
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["kind"], "valued");
        assert_eq!(json["type"], "int");
        assert_eq!(json["short"], "b");
        assert_eq!(json["default"], 123);
    }
}
