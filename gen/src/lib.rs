//! Schema definition loading and Rust code generation for argbind.
//!
//! Schemas are declared in YAML or JSON definition files, loaded into a
//! [`SchemaSet`], and either used directly with `argbind_parser::parse` or
//! turned into a typed struct with [`emit`].
//!
//! # Quick start
//!
//! ```no_run
//! use argbind_gen::{SchemaSet, emit, fingerprint};
//!
//! let set = SchemaSet::from_file("args.yaml").unwrap();
//! let schema = set.require("my-option").unwrap();
//!
//! let source = emit(schema).unwrap();
//! std::fs::write("src/args.rs", &source).unwrap();
//! println!("fingerprint {}", fingerprint(schema, "MyOption").unwrap());
//! ```
//!
//! # Feature flags
//!
//! - **`clap`** (default): derives `clap::ValueEnum` for [`OutputFormat`].

mod definition;
mod emit;
mod error;
mod fingerprint;
mod loader;
mod output;

pub use definition::{DefinitionFile, DefinitionKind, FieldDefinition, SchemaDefinition};
pub use emit::{emit, emit_as, struct_name};
pub use error::{GenError, Result};
pub use fingerprint::{FINGERPRINT_PREFIX, embedded_fingerprint, fingerprint, is_stale};
pub use loader::{DefinitionFormat, SchemaSet, SchemaSource};
pub use output::{OutputFormat, format_args, format_schema};
