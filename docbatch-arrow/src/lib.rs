//! # docbatch-arrow
//!
//! Arrow RecordBatch producer for docbatch document cursors.
//!
//! This crate drives a [`DocumentCursor`](docbatch_core::DocumentCursor)
//! page by page and assembles the documents into batches with a fixed
//! schema. The schema comes from an empty template batch or from a
//! [`SchemaDescription`](docbatch_core::SchemaDescription).
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use docbatch_arrow::DocumentBatchStream;
//! use docbatch_core::{OwnedDocument, PagedCursor, SchemaDescription, StreamConfig};
//!
//! let docs = vec![
//!     OwnedDocument::new().with("id", 1i32).with("name", "a"),
//!     OwnedDocument::new().with("id", 2i32),
//! ];
//! let mut stream = DocumentBatchStream::from_description(
//!     Arc::new(()),
//!     PagedCursor::from_documents(docs, 100),
//!     SchemaDescription::parse("id:UInt32,name:String").unwrap(),
//!     StreamConfig::default(),
//! )
//! .unwrap();
//!
//! let batch = stream.next_batch().unwrap();
//! assert_eq!(batch.num_rows(), 2);
//! assert_eq!(stream.next_batch().unwrap().num_rows(), 0);
//! ```

pub mod arrow_schema;
pub mod builder;
pub mod error;
pub mod stream;

pub use arrow_schema::{
    description_from_schema, description_to_arrow_schema, from_arrow_type, to_arrow_field,
    to_arrow_type, SchemaTemplate, DEFAULT_METADATA_KEY,
};
pub use builder::DocumentBatchBuilder;
pub use error::{Error, Result};
pub use stream::DocumentBatchStream;
