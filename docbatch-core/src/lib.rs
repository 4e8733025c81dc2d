//! # docbatch-core
//!
//! Engine-agnostic building blocks for turning paginated document-store
//! query results into fixed-schema columnar batches.
//!
//! This crate has no columnar-engine dependency. It defines what a stream
//! reads (documents behind a [`DocumentCursor`]), what it produces (values
//! typed by a [`SchemaDescription`]), and the rules in between
//! ([`coerce`](coerce::coerce)). The Arrow batch producer lives in
//! `docbatch-arrow`.
//!
//! ## Quick Start
//!
//! ```rust
//! use docbatch_core::prelude::*;
//!
//! let schema = SchemaDescription::parse("id:UInt32,name:String").unwrap();
//! let doc = OwnedDocument::new().with("id", 7i32).with("name", "a");
//! let days = DayNumbering::default();
//!
//! for field in &schema {
//!     let stored = match doc.get(&field.name) {
//!         Some(value) => coerce(value, field, &days).unwrap(),
//!         None => field.default.clone(),
//!     };
//!     println!("{} = {}", field.name, stored);
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                        docbatch-core                                |
//! +---------------------------------------------------------------------+
//! |  schema/     - DataKind, FieldDescriptor, SchemaDescription         |
//! |  value/      - WireValue, WireTag, WireTimestamp                    |
//! |  document/   - Document trait, OwnedDocument                        |
//! |  json/       - Extended-JSON decoding into documents                |
//! |  cursor/     - DocumentCursor, Page, PagedCursor, JsonLinesCursor   |
//! |  coerce/     - (target kind, wire tag) conversion rules             |
//! |  stored/     - StoredValue (column-typed values)                    |
//! |  time/       - DayNumbering, TimeZoneSetting                        |
//! |  config/     - StreamConfig                                         |
//! |  error/      - Error types                                          |
//! +---------------------------------------------------------------------+
//! ```

pub mod coerce;
pub mod config;
pub mod cursor;
pub mod document;
pub mod error;
pub mod json;
pub mod prelude;
pub mod schema;
pub mod stored;
pub mod time;
pub mod value;

// Re-export commonly used types at crate root for convenience
pub use coerce::{coerce, rule, Rule};
pub use config::{StreamConfig, DEFAULT_BATCH_SIZE};
pub use cursor::{CursorId, DocumentCursor, JsonLinesCursor, Page, PagedCursor};
pub use document::{Document, OwnedDocument};
pub use error::{ConfigError, DocumentError, Error, Result, SchemaError, TypeMismatch};
pub use schema::{DataKind, FieldDescriptor, SchemaDescription};
pub use stored::{OwnedStoredValue, StoredValue};
pub use time::{DayNumbering, TimeZoneSetting};
pub use value::{WireTag, WireTimestamp, WireValue};
