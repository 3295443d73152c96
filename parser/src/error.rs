//! Parse error types.

use thiserror::Error;

/// Errors produced while parsing a token stream.
///
/// Every variant carries the option as the user spelled it (`-b`, `--bar`),
/// the offending token, or the field name, so callers can build a diagnostic
/// without consulting the schema again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgError {
    /// An option name or character does not resolve against the schema.
    #[error("unknown option `{option}`")]
    UnknownOption { option: String },
    /// A value was attached to a flag or counter.
    #[error("option `{option}` does not take a value, got {value:?}")]
    UnexpectedValue { option: String, value: String },
    /// A valued option has no value available.
    #[error("expected a value for `{option}`")]
    MissingValue { option: String },
    /// A value could not be converted to the field's type.
    #[error("invalid value {value:?} for `{option}`: {reason}")]
    InvalidValue {
        option: String,
        value: String,
        reason: String,
    },
    /// A required positional field received no token.
    #[error("missing positional argument `{name}`")]
    MissingPositional { name: String },
    /// More positional tokens than the schema accepts.
    #[error("unexpected positional argument {token:?}")]
    UnexpectedPositional { token: String },
    /// A required valued option was never supplied.
    #[error("option `{option}` is required")]
    MissingRequiredOption { option: String },
}

/// Payload-free discriminant of [`ArgError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgErrorKind {
    UnknownOption,
    UnexpectedValue,
    MissingValue,
    InvalidValue,
    MissingPositional,
    UnexpectedPositional,
    MissingRequiredOption,
}

impl ArgError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ArgErrorKind {
        match self {
            ArgError::UnknownOption { .. } => ArgErrorKind::UnknownOption,
            ArgError::UnexpectedValue { .. } => ArgErrorKind::UnexpectedValue,
            ArgError::MissingValue { .. } => ArgErrorKind::MissingValue,
            ArgError::InvalidValue { .. } => ArgErrorKind::InvalidValue,
            ArgError::MissingPositional { .. } => ArgErrorKind::MissingPositional,
            ArgError::UnexpectedPositional { .. } => ArgErrorKind::UnexpectedPositional,
            ArgError::MissingRequiredOption { .. } => ArgErrorKind::MissingRequiredOption,
        }
    }
}
