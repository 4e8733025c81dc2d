//! Error types for docbatch-core.
//!
//! This module provides structured error types for all docbatch-core operations:
//!
//! - [`enum@Error`] - Main error enum that wraps all error types
//! - [`TypeMismatch`] - A wire value incompatible with its column's type
//! - [`SchemaError`] - A malformed schema or template
//! - [`DocumentError`] - A document that could not be decoded
//! - [`ConfigError`] - An invalid stream setting
//!
//! Transport failures from a cursor are carried opaquely in
//! [`Error::Transport`]. None of these are recovered from inside the stream.

use thiserror::Error;

use crate::schema::DataKind;
use crate::value::WireTag;

/// Main error type for docbatch-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A field's wire value cannot be stored in its column
    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatch),

    /// Schema description could not be built
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Document could not be decoded
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Invalid configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Failure in the cursor's underlying network call
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap an error raised by a cursor's session or network layer.
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Transport(err.into())
    }

    /// Whether this is a coercion type mismatch.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Error::TypeMismatch(_))
    }
}

/// A wire value whose tag (or content) is incompatible with its column.
#[derive(Error, Debug, Clone, PartialEq)]
#[error(
    "Type mismatch, expected {}, got {} for column {}{}",
    .expected,
    .observed,
    .field,
    .text.as_ref().map(|t| format!(" (cannot parse {t:?})")).unwrap_or_default()
)]
pub struct TypeMismatch {
    /// Column (and document field) name
    pub field: String,
    /// What the column accepts: "a number", "String" or "Timestamp"
    pub expected: &'static str,
    /// Tag of the value found in the document
    pub observed: WireTag,
    /// The offending text, when a string failed to parse as a number
    pub text: Option<String>,
}

/// Errors related to schema construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// Type name not in the target type vocabulary
    #[error("Unknown column type: {name}")]
    UnknownType { name: String },

    /// Template column type with no DataKind counterpart
    #[error("Unsupported type {data_type} for column {column}")]
    UnsupportedType { column: String, data_type: String },

    /// Default literal that does not parse as the column type
    #[error("Invalid default {literal:?} for {kind} column")]
    InvalidDefault { kind: DataKind, literal: String },

    /// Malformed column specification
    #[error("Invalid column spec {spec:?}: {reason}")]
    InvalidColumnSpec { spec: String, reason: String },
}

/// Errors related to document decoding.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Input is not valid JSON
    #[error("Invalid JSON at line {line}: {source}")]
    Json {
        line: u64,
        #[source]
        source: serde_json::Error,
    },

    /// Top-level JSON value is not an object
    #[error("Document at line {line} is not an object")]
    NotAnObject { line: u64 },

    /// Extended JSON wrapper with an invalid payload
    #[error("Invalid {wrapper} value: {value}")]
    InvalidExtended { wrapper: &'static str, value: String },
}

/// Errors related to stream configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Time zone string not understood
    #[error("Invalid time zone {value:?} (expected UTC, local, or +HH:MM)")]
    InvalidTimeZone { value: String },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_message() {
        let err = TypeMismatch {
            field: "name".into(),
            expected: "String",
            observed: WireTag::Null,
            text: None,
        };
        assert_eq!(
            err.to_string(),
            "Type mismatch, expected String, got Null for column name"
        );
    }

    #[test]
    fn test_unparsable_number_message() {
        let err = TypeMismatch {
            field: "age".into(),
            expected: "a number",
            observed: WireTag::String,
            text: Some("old".into()),
        };
        assert_eq!(
            err.to_string(),
            "Type mismatch, expected a number, got String for column age (cannot parse \"old\")"
        );
    }

    #[test]
    fn test_transport_wraps_opaque_error() {
        let err = Error::transport(std::io::Error::other("connection reset"));
        assert!(matches!(err, Error::Transport(_)));
        assert!(!err.is_type_mismatch());
        assert_eq!(err.to_string(), "Transport error: connection reset");
    }
}
