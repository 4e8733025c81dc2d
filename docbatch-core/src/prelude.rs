//! Convenient re-exports for common usage.
//!
//! # Example
//!
//! ```rust
//! use docbatch_core::prelude::*;
//!
//! let field = FieldDescriptor::new("id", DataKind::UInt32);
//! let stored = coerce(&WireValue::Int32(1), &field, &DayNumbering::default()).unwrap();
//! assert_eq!(stored, StoredValue::UInt32(1));
//! ```

// Schema types
pub use crate::schema::{DataKind, FieldDescriptor, SchemaDescription};

// Values
pub use crate::stored::StoredValue;
pub use crate::value::{WireTag, WireTimestamp, WireValue};

// Documents and cursors
pub use crate::cursor::{CursorId, DocumentCursor, JsonLinesCursor, Page, PagedCursor};
pub use crate::document::{Document, OwnedDocument};

// Coercion
pub use crate::coerce::coerce;
pub use crate::config::StreamConfig;
pub use crate::time::{DayNumbering, TimeZoneSetting};

// Error types
pub use crate::error::{Error, Result, TypeMismatch};
