//! Error types for docbatch-arrow.
//!
//! This module provides error types specific to the Arrow batch producer,
//! while re-exporting core error types from docbatch-core.

use thiserror::Error;

// Re-export core error types
pub use docbatch_core::error::{SchemaError, TypeMismatch};
pub use docbatch_core::Error as CoreError;
use docbatch_core::DataKind;

/// Main error type for docbatch-arrow operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from docbatch-core (coercion, cursor transport, schema)
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Error assembling Arrow arrays or batches
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// A stored value reached a column of another type
    #[error("Column {column} stores {expected}, got a {actual} value")]
    ColumnType {
        column: String,
        expected: DataKind,
        actual: DataKind,
    },

    /// A previous call failed; the stream cannot be resumed
    #[error("Stream {stream} failed earlier and cannot be resumed")]
    StreamFailed { stream: String },
}

impl Error {
    /// Whether this is a coercion type mismatch.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Error::Core(e) if e.is_type_mismatch())
    }

    /// The type mismatch details, if this is one.
    pub fn as_type_mismatch(&self) -> Option<&TypeMismatch> {
        match self {
            Error::Core(CoreError::TypeMismatch(m)) => Some(m),
            _ => None,
        }
    }
}

impl From<TypeMismatch> for Error {
    fn from(err: TypeMismatch) -> Self {
        Error::Core(CoreError::TypeMismatch(err))
    }
}

impl From<SchemaError> for Error {
    fn from(err: SchemaError) -> Self {
        Error::Core(CoreError::Schema(err))
    }
}

impl From<Error> for datafusion::error::DataFusionError {
    fn from(err: Error) -> Self {
        datafusion::error::DataFusionError::External(Box::new(err))
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use docbatch_core::WireTag;

    #[test]
    fn test_type_mismatch_passthrough() {
        let err: Error = TypeMismatch {
            field: "name".into(),
            expected: "String",
            observed: WireTag::Null,
            text: None,
        }
        .into();

        assert!(err.is_type_mismatch());
        assert_eq!(err.as_type_mismatch().map(|m| m.observed), Some(WireTag::Null));
        assert_eq!(
            err.to_string(),
            "Type mismatch, expected String, got Null for column name"
        );
    }

    #[test]
    fn test_datafusion_conversion() {
        let err = Error::StreamFailed {
            stream: "DocumentStream(@x)".into(),
        };
        let df: datafusion::error::DataFusionError = err.into();
        assert!(matches!(df, datafusion::error::DataFusionError::External(_)));
    }
}
