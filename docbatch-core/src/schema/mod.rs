//! Schema description: the ordered column list of a stream.
//!
//! # Example
//!
//! ```rust
//! use docbatch_core::schema::{DataKind, FieldDescriptor, SchemaDescription};
//!
//! let schema = SchemaDescription::new(vec![
//!     FieldDescriptor::new("id", DataKind::UInt32),
//!     FieldDescriptor::new("name", DataKind::String),
//! ]);
//! assert_eq!(schema.len(), 2);
//! ```

mod field;
mod kind;

pub use field::FieldDescriptor;
pub use kind::DataKind;

use crate::error::SchemaError;

/// Ordered, immutable list of column descriptors.
///
/// Built once per stream; column count and order match every batch the
/// stream produces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaDescription {
    fields: Vec<FieldDescriptor>,
}

impl SchemaDescription {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    /// Parse a comma-separated list of `name:Type[=default]` specs.
    pub fn parse(specs: &str) -> Result<Self, SchemaError> {
        let fields = specs
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(FieldDescriptor::parse_spec)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(fields))
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, idx: usize) -> Option<&FieldDescriptor> {
        self.fields.get(idx)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

impl<'a> IntoIterator for &'a SchemaDescription {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
