//! Column descriptor for stream schemas.

use super::DataKind;
use crate::error::SchemaError;
use crate::stored::{OwnedStoredValue, StoredValue};

/// One output column: name, target type, and the value substituted when a
/// document lacks the field.
///
/// The default is built once, when the descriptor is created, and reused
/// for every missing field in every batch.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Column name, also the document field looked up for it
    pub name: String,

    /// Target type
    pub kind: DataKind,

    /// Pre-built default value, always of `kind`
    pub default: OwnedStoredValue,
}

impl FieldDescriptor {
    /// Create a column whose default is the type's empty value.
    pub fn new(name: impl Into<String>, kind: DataKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: StoredValue::empty(kind),
        }
    }

    /// Builder: use an explicit default value.
    ///
    /// Fails if the value's type differs from the column's.
    pub fn with_default(mut self, default: OwnedStoredValue) -> Result<Self, SchemaError> {
        if default.kind() != self.kind {
            return Err(SchemaError::InvalidDefault {
                kind: self.kind,
                literal: default.to_string(),
            });
        }
        self.default = default;
        Ok(self)
    }

    /// Builder: parse a default literal with the column type's grammar.
    pub fn with_default_literal(self, literal: &str) -> Result<Self, SchemaError> {
        let value = StoredValue::parse_literal(self.kind, literal)?;
        self.with_default(value)
    }

    /// Parse a `name:Type` or `name:Type=default` column spec.
    pub fn parse_spec(spec: &str) -> Result<Self, SchemaError> {
        let invalid = |reason: &str| SchemaError::InvalidColumnSpec {
            spec: spec.to_string(),
            reason: reason.to_string(),
        };

        let (name, rest) = spec
            .split_once(':')
            .ok_or_else(|| invalid("expected name:Type"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid("empty column name"));
        }

        let (type_name, default) = match rest.split_once('=') {
            Some((t, d)) => (t.trim(), Some(d)),
            None => (rest.trim(), None),
        };
        let field = Self::new(name, type_name.parse()?);
        match default {
            Some(literal) => field.with_default_literal(literal),
            None => Ok(field),
        }
    }
}
