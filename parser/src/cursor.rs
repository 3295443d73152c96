//! Per-call scanning state.

use argbind_core::{FieldId, Value};

use crate::error::ArgError;

/// Mutable state of one parse call.
///
/// Owns nothing but borrows the token slice; a fresh cursor is created for
/// every call so concurrent parses never share state.
pub(crate) struct Cursor<'t, S> {
    tokens: &'t [S],
    pos: usize,
    after_terminator: bool,
    positional: Vec<&'t str>,
    /// One slot per schema field; `Some` once the input has set it.
    slots: Vec<Option<Value>>,
}

impl<'t, S: AsRef<str>> Cursor<'t, S> {
    pub(crate) fn new(tokens: &'t [S], field_count: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            after_terminator: false,
            positional: Vec::new(),
            slots: vec![None; field_count],
        }
    }

    pub(crate) fn next_token(&mut self) -> Option<&'t str> {
        let tokens = self.tokens;
        let token = tokens.get(self.pos)?.as_ref();
        self.pos += 1;
        Some(token)
    }

    /// Consumes the next token as the value of `option`.
    ///
    /// A token starting with `-` is never taken as a value.
    pub(crate) fn take_value(&mut self, option: &str) -> Result<&'t str, ArgError> {
        let tokens = self.tokens;
        match tokens.get(self.pos).map(AsRef::as_ref) {
            Some(value) if !value.starts_with('-') => {
                self.pos += 1;
                Ok(value)
            }
            _ => Err(ArgError::MissingValue {
                option: option.to_string(),
            }),
        }
    }

    pub(crate) fn after_terminator(&self) -> bool {
        self.after_terminator
    }

    pub(crate) fn terminate(&mut self) {
        self.after_terminator = true;
    }

    pub(crate) fn push_positional(&mut self, token: &'t str) {
        self.positional.push(token);
    }

    /// Binds a value, replacing any earlier occurrence.
    pub(crate) fn bind(&mut self, id: FieldId, value: Value) {
        self.slots[id.index()] = Some(value);
    }

    pub(crate) fn increment(&mut self, id: FieldId) {
        let slot = &mut self.slots[id.index()];
        let count = slot.as_ref().and_then(Value::as_count).unwrap_or(0);
        *slot = Some(Value::Count(count.saturating_add(1)));
    }

    pub(crate) fn into_parts(self) -> (Vec<&'t str>, Vec<Option<Value>>) {
        (self.positional, self.slots)
    }
}
