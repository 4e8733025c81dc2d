//! Schemaless documents.

use compact_str::CompactString;

use crate::value::WireValue;

/// A field-named record with no fixed schema.
///
/// The only thing the batch producer needs from a document is lookup by
/// field name. `None` means the field is absent, which is distinct from a
/// field that is present and holds [`WireValue::Null`].
pub trait Document {
    fn get(&self, name: &str) -> Option<&WireValue>;
}

/// Document that owns its fields, in insertion order.
///
/// Lookup is a linear scan, like the store's own element lists; documents
/// are expected to be small.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OwnedDocument {
    fields: Vec<(CompactString, WireValue)>,
}

impl OwnedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Builder: append a field.
    pub fn with(mut self, name: &str, value: impl Into<WireValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a field, replacing an existing field of the same name in place.
    pub fn insert(&mut self, name: &str, value: impl Into<WireValue>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| k.as_str() == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((CompactString::new(name), value)),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &WireValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Document for OwnedDocument {
    fn get(&self, name: &str) -> Option<&WireValue> {
        self.fields.iter().find(|(k, _)| k.as_str() == name).map(|(_, v)| v)
    }
}

impl<D: Document + ?Sized> Document for &D {
    fn get(&self, name: &str) -> Option<&WireValue> {
        (**self).get(name)
    }
}

impl<D: Document + ?Sized> Document for Box<D> {
    fn get(&self, name: &str) -> Option<&WireValue> {
        (**self).get(name)
    }
}

impl<K: AsRef<str>> FromIterator<(K, WireValue)> for OwnedDocument {
    fn from_iter<I: IntoIterator<Item = (K, WireValue)>>(iter: I) -> Self {
        let mut doc = OwnedDocument::new();
        for (k, v) in iter {
            doc.insert(k.as_ref(), v);
        }
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_vs_null() {
        let doc = OwnedDocument::new().with("a", WireValue::Null);

        assert_eq!(doc.get("a"), Some(&WireValue::Null));
        assert_eq!(doc.get("b"), None);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut doc = OwnedDocument::new().with("id", 1i32).with("name", "a");
        doc.insert("id", 2i32);

        let names: Vec<_> = doc.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["id", "name"]);
        assert_eq!(doc.get("id"), Some(&WireValue::Int32(2)));
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_from_iterator() {
        let doc: OwnedDocument = [("x", WireValue::Bool(true))].into_iter().collect();
        assert_eq!(doc.get("x"), Some(&WireValue::Bool(true)));
        assert!(!doc.is_empty());
    }
}
