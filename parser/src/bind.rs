//! Binding buffered positionals and filling defaults.

use argbind_core::{FieldKind, Schema, Value};

use crate::error::ArgError;
use crate::matches::{BoundField, ParsedArgs};
use crate::scan::convert;

/// Turns the scan output into a [`ParsedArgs`].
///
/// Positionals are checked first, then required options, so a command line
/// with both problems reports the positional one.
pub(crate) fn bind(
    schema: &Schema,
    positional: Vec<&str>,
    mut slots: Vec<Option<Value>>,
) -> Result<ParsedArgs, ArgError> {
    let mut tokens = positional.into_iter();

    for (id, field) in schema.positional_entries() {
        match field.kind {
            FieldKind::PositionalSingle(ty) => match tokens.next() {
                Some(token) => slots[id.index()] = Some(convert(ty, &field.name, token)?),
                None if field.required => {
                    return Err(ArgError::MissingPositional {
                        name: field.name.clone(),
                    });
                }
                None => {}
            },
            FieldKind::PositionalList => {
                let rest: Vec<String> = tokens.by_ref().map(String::from).collect();
                if rest.is_empty() {
                    if field.required {
                        return Err(ArgError::MissingPositional {
                            name: field.name.clone(),
                        });
                    }
                } else {
                    slots[id.index()] = Some(Value::List(rest));
                }
            }
            FieldKind::Flag | FieldKind::Counter | FieldKind::Valued(_) => {}
        }
    }

    if let Some(token) = tokens.next() {
        return Err(ArgError::UnexpectedPositional {
            token: token.to_string(),
        });
    }

    for (id, field) in schema.iter() {
        if field.required && field.kind.takes_value() && slots[id.index()].is_none() {
            return Err(ArgError::MissingRequiredOption {
                option: field.display_name(),
            });
        }
    }

    let fields = schema
        .iter()
        .zip(slots)
        .map(|((_, field), slot)| BoundField {
            name: field.name.clone(),
            explicit: slot.is_some(),
            value: slot.unwrap_or_else(|| field.default_value()),
        })
        .collect();
    Ok(ParsedArgs::new(schema.name(), fields))
}

#[cfg(test)]
mod tests {
    use argbind_core::{FieldSchema, ValueType};

    use super::*;

    #[test]
    fn test_leftover_reports_first_extra_token() {
        let schema = Schema::new("one", vec![FieldSchema::positional("file", ValueType::String)])
            .unwrap();
        let err = bind(&schema, vec!["a", "b", "c"], vec![None]).unwrap_err();
        assert_eq!(
            err,
            ArgError::UnexpectedPositional {
                token: "b".into()
            }
        );
    }

    #[test]
    fn test_required_list_needs_one_token() {
        let schema = Schema::new("files", vec![FieldSchema::positional_list("files").required()])
            .unwrap();
        assert_eq!(
            bind(&schema, vec![], vec![None]).unwrap_err(),
            ArgError::MissingPositional {
                name: "files".into()
            }
        );
    }

    #[test]
    fn test_positional_conversion_names_field() {
        let schema =
            Schema::new("n", vec![FieldSchema::positional("count", ValueType::Int)]).unwrap();
        let err = bind(&schema, vec!["ten"], vec![None]).unwrap_err();
        assert_eq!(
            err,
            ArgError::InvalidValue {
                option: "count".into(),
                value: "ten".into(),
                reason: "invalid digit found in string".into(),
            }
        );
    }

    #[test]
    fn test_defaults_are_not_explicit() {
        let schema = Schema::new(
            "d",
            vec![FieldSchema::valued(Some('b'), Some("bar"), ValueType::Int)
                .with_default(Value::Int(123))],
        )
        .unwrap();
        let args = bind(&schema, vec![], vec![None]).unwrap();
        assert_eq!(args.int("bar"), Some(123));
        assert!(!args.is_present("bar"));
    }
}
