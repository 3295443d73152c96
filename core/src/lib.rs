//! Field schema types for command-line argument binding.
//!
//! This crate defines the description of what a command line accepts:
//!
//! - [`FieldSchema`]: a single declared field with its [`FieldKind`], short and long
//!   names, whether it is required, and its default [`Value`].
//! - [`Schema`]: a validated, immutable collection of fields with lookup by
//!   short character and long name.
//!
//! Validation ([`validate_fields`]) runs when a schema is constructed and
//! rejects duplicate names, malformed option spellings and an ill-formed
//! positional layout, so parsing never sees an inconsistent schema.
//!
//! # Example
//!
//! ```
//! use argbind_core::*;
//!
//! let schema = Schema::builder("greet")
//!     .field(FieldSchema::flag(Some('e'), Some("emoji")))
//!     .field(FieldSchema::positional("name", ValueType::String))
//!     .build()
//!     .unwrap();
//!
//! assert!(schema.resolve_long("emoji").is_some());
//! assert_eq!(schema.positional_entries().len(), 1);
//! ```

mod schema;
mod types;
mod validate;

pub use schema::{FieldId, Schema, SchemaBuilder};
pub use types::*;
pub use validate::{SchemaError, validate_fields};
