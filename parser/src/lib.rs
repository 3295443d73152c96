//! GNU-style command line parsing against an [`argbind_core::Schema`].
//!
//! [`parse`] scans the tokens left to right, resolving short clusters
//! (`-vfb456`), long options (`--bar 456`, `--bar=456`) and the `--`
//! terminator, then binds positionals and defaults so that every schema
//! field ends up with exactly one value.
//!
//! ```
//! use argbind_core::{FieldSchema, Schema, Value, ValueType};
//!
//! let schema = Schema::builder("my-option")
//!     .field(FieldSchema::counter(Some('v'), Some("verbose")))
//!     .field(FieldSchema::valued(Some('b'), Some("bar"), ValueType::Int).with_default(Value::Int(123)))
//!     .field(FieldSchema::positional_list("rest"))
//!     .build()
//!     .unwrap();
//!
//! let args = argbind_parser::parse(&["-vv", "--bar=7", "x"], &schema).unwrap();
//! assert_eq!(args.count("verbose"), 2);
//! assert_eq!(args.int("bar"), Some(7));
//! ```

mod bind;
mod cursor;
mod error;
mod matches;
mod scan;

use argbind_core::Schema;
use tracing::debug;

pub use error::{ArgError, ArgErrorKind};
pub use matches::{BoundField, ParsedArgs};

/// Parses `tokens` (excluding the program name) against `schema`.
///
/// # Errors
///
/// Returns the first [`ArgError`] encountered. Scanning errors take priority
/// over positional errors, which take priority over missing required options.
pub fn parse<S: AsRef<str>>(tokens: &[S], schema: &Schema) -> Result<ParsedArgs, ArgError> {
    let mut cursor = cursor::Cursor::new(tokens, schema.len());
    let result = scan::scan(&mut cursor, schema).and_then(|()| {
        let (positional, slots) = cursor.into_parts();
        bind::bind(schema, positional, slots)
    });
    if let Err(err) = &result {
        debug!(schema = schema.name(), error = %err, "parse failed");
    }
    result
}
