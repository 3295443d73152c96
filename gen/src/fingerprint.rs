//! Content fingerprints for generated code.
//!
//! A fingerprint is the SHA-256 hex digest of the generated struct name and
//! the schema's JSON serialization. Generated files carry it in their header
//! so stale output can be detected without regenerating.

use argbind_core::Schema;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Header line prefix that carries the fingerprint.
pub const FINGERPRINT_PREFIX: &str = "// fingerprint: ";

/// Computes the fingerprint of `schema` generated as `struct_name`.
///
/// # Errors
///
/// Returns [`JsonError`](crate::GenError::JsonError) if the schema cannot be
/// serialized.
pub fn fingerprint(schema: &Schema, struct_name: &str) -> Result<String> {
    let bytes = serde_json::to_vec(&(struct_name, schema))?;
    let hash = Sha256::digest(&bytes);
    Ok(format!("{:x}", hash))
}

/// Extracts the fingerprint recorded in a generated file, if any.
pub fn embedded_fingerprint(source: &str) -> Option<&str> {
    source
        .lines()
        .take_while(|line| line.starts_with("//"))
        .find_map(|line| line.strip_prefix(FINGERPRINT_PREFIX))
        .map(str::trim)
}

/// Returns `true` if `source` was not generated from the current `schema`
/// under `struct_name`.
pub fn is_stale(source: &str, schema: &Schema, struct_name: &str) -> Result<bool> {
    let current = fingerprint(schema, struct_name)?;
    Ok(embedded_fingerprint(source) != Some(current.as_str()))
}
