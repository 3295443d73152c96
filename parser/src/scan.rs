//! Left-to-right token scanning.
//!
//! Tokens are classified by their leading characters:
//!
//! - `--` alone switches every later token to positional.
//! - `--name` / `--name=value` is a long option.
//! - `-abc` is a cluster of short options; a valued character takes the rest
//!   of the token (or the next token) as its value and ends the cluster.
//! - anything else, including a lone `-`, is buffered as positional.
//!
//! Scanning stops at the first error.

use argbind_core::{FieldId, FieldKind, Schema, Value, ValueType};
use tracing::trace;

use crate::cursor::Cursor;
use crate::error::ArgError;

pub(crate) fn scan<'t, S: AsRef<str>>(
    cursor: &mut Cursor<'t, S>,
    schema: &Schema,
) -> Result<(), ArgError> {
    while let Some(token) = cursor.next_token() {
        trace!(token, "scanning token");
        if cursor.after_terminator() {
            cursor.push_positional(token);
        } else if token == "--" {
            cursor.terminate();
        } else if let Some(body) = token.strip_prefix("--") {
            long_option(cursor, schema, body)?;
        } else if let Some(cluster) = token.strip_prefix('-').filter(|it| !it.is_empty()) {
            short_cluster(cursor, schema, cluster)?;
        } else {
            cursor.push_positional(token);
        }
    }
    Ok(())
}

fn long_option<'t, S: AsRef<str>>(
    cursor: &mut Cursor<'t, S>,
    schema: &Schema,
    body: &'t str,
) -> Result<(), ArgError> {
    let (name, inline) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };
    let option = format!("--{name}");
    let Some((id, field)) = schema.resolve_long(name) else {
        return Err(ArgError::UnknownOption { option });
    };

    match field.kind {
        FieldKind::Flag | FieldKind::Counter => {
            if let Some(value) = inline {
                return Err(ArgError::UnexpectedValue {
                    option,
                    value: value.to_string(),
                });
            }
            switch(cursor, id, field.kind);
        }
        FieldKind::Valued(ty) => {
            let raw = match inline {
                Some(value) => value,
                None => cursor.take_value(&option)?,
            };
            cursor.bind(id, convert(ty, &option, raw)?);
        }
        FieldKind::PositionalSingle(_) | FieldKind::PositionalList => {
            return Err(ArgError::UnknownOption { option });
        }
    }
    Ok(())
}

fn short_cluster<'t, S: AsRef<str>>(
    cursor: &mut Cursor<'t, S>,
    schema: &Schema,
    cluster: &'t str,
) -> Result<(), ArgError> {
    for (idx, short) in cluster.char_indices() {
        let Some((id, field)) = schema.resolve_short(short) else {
            return Err(ArgError::UnknownOption {
                option: format!("-{short}"),
            });
        };

        match field.kind {
            FieldKind::Flag | FieldKind::Counter => switch(cursor, id, field.kind),
            FieldKind::Valued(ty) => {
                let option = format!("-{short}");
                let rest = &cluster[idx + short.len_utf8()..];
                let raw = if rest.is_empty() {
                    cursor.take_value(&option)?
                } else {
                    rest
                };
                cursor.bind(id, convert(ty, &option, raw)?);
                return Ok(());
            }
            FieldKind::PositionalSingle(_) | FieldKind::PositionalList => {
                return Err(ArgError::UnknownOption {
                    option: format!("-{short}"),
                });
            }
        }
    }
    Ok(())
}

fn switch<S: AsRef<str>>(cursor: &mut Cursor<'_, S>, id: FieldId, kind: FieldKind) {
    match kind {
        FieldKind::Counter => cursor.increment(id),
        _ => cursor.bind(id, Value::Bool(true)),
    }
}

pub(crate) fn convert(ty: ValueType, option: &str, raw: &str) -> Result<Value, ArgError> {
    ty.convert(raw).map_err(|reason| ArgError::InvalidValue {
        option: option.to_string(),
        value: raw.to_string(),
        reason,
    })
}
