//! Error types for definition loading and code generation.
//!
//! Covers I/O, the two definition file formats, malformed field definitions,
//! schema validation failures and lookups of unknown schemas.

use argbind_core::SchemaError;
use thiserror::Error;

/// Errors that can occur while loading definitions or emitting code.
#[derive(Debug, Error)]
pub enum GenError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A definition file whose extension is neither YAML nor JSON.
    #[error("unsupported definition file `{0}` (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),

    /// A field definition that cannot be turned into a field schema.
    #[error("schema `{schema}`, field `{field}`: {message}")]
    InvalidDefinition {
        schema: String,
        field: String,
        message: String,
    },

    /// The fields were well-formed but do not make a consistent schema.
    #[error("schema `{schema}`: {source}")]
    InvalidSchema {
        schema: String,
        #[source]
        source: SchemaError,
    },

    /// Two definitions share a schema name.
    #[error("duplicate schema `{0}`")]
    DuplicateSchema(String),

    /// Lookup of a schema name that was never loaded.
    #[error("unknown schema `{0}`")]
    UnknownSchema(String),

    /// A schema or struct name that is not a usable Rust identifier.
    #[error("`{0}` cannot be used as a Rust identifier")]
    InvalidIdentifier(String),
}

/// Convenience alias for results with [`GenError`].
pub type Result<T> = std::result::Result<T, GenError>;
