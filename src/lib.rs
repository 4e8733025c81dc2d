//! docbatch - Stream paginated document-store query results as typed
//! Arrow record batches.
//!
//! This library adapts a query cursor over schemaless documents into a
//! stream of columnar batches with a fixed, caller-declared schema. Each
//! document field is coerced to its column type; missing fields take the
//! column default.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use docbatch::{DocumentBatchStream, JsonLinesCursor, SchemaDescription, StreamConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let cursor = JsonLinesCursor::open("users.jsonl", 101)?;
//!     let schema = SchemaDescription::parse("id:UInt32,name:String,born:Date")?;
//!     let mut stream =
//!         DocumentBatchStream::from_description(Arc::new(()), cursor, schema, StreamConfig::default())?;
//!
//!     loop {
//!         let batch = stream.next_batch()?;
//!         if batch.num_rows() == 0 {
//!             break;
//!         }
//!         // Process batch...
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;

pub use docbatch_arrow::{DocumentBatchBuilder, DocumentBatchStream, SchemaTemplate};
pub use docbatch_core::{
    CursorId, DataKind, Document, DocumentCursor, FieldDescriptor, JsonLinesCursor,
    OwnedDocument, Page, PagedCursor, SchemaDescription, StreamConfig, TimeZoneSetting,
    WireValue,
};

pub use docbatch_arrow::{Error, Result};
