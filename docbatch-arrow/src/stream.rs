//! Stream that turns a document cursor into fixed-schema RecordBatches.

use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use tracing::{debug, trace};

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;

use datafusion::error::DataFusionError;
use datafusion::physical_plan::RecordBatchStream;
use futures::Stream;

use docbatch_core::{DayNumbering, DocumentCursor, SchemaDescription, StreamConfig};

use crate::arrow_schema::SchemaTemplate;
use crate::builder::DocumentBatchBuilder;
use crate::error::{Error, Result};

/// Global sequence counter for tracking batch order across all streams.
static BATCH_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Lifecycle of a [`DocumentBatchStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    /// More pages may be available.
    Reading,
    /// The cursor reported exhaustion. Terminal.
    Exhausted,
    /// A call failed; the cursor position is unknown. Terminal.
    Failed,
}

/// Pulls pages from a [`DocumentCursor`] and emits RecordBatches.
///
/// Generic over the cursor type for zero-vtable hot path.
///
/// # How It Works
///
/// 1. Fetches whole pages from the cursor, one round trip each
/// 2. Appends every document of a page as a row, coercing fields by column
/// 3. Stops once at least `batch_size` rows are buffered or the cursor is
///    exhausted; pages are never split, so a batch can overshoot
/// 4. Returns an empty batch (zero rows, same schema) once the cursor is
///    exhausted, on that call and every later one
///
/// A coercion or transport error aborts the current call and discards the
/// rows gathered so far. The stream is unusable afterwards: later calls
/// return [`Error::StreamFailed`] without touching the cursor.
///
/// # Session
///
/// The session handle is shared with the caller and kept alive for as long
/// as the stream exists.
pub struct DocumentBatchStream<C: DocumentCursor> {
    session: Arc<C::Session>,
    cursor: C,
    builder: DocumentBatchBuilder,
    days: DayNumbering,
    batch_size: usize,
    state: StreamState,
    /// Number of rows already emitted
    rows_emitted: usize,
}

impl<C: DocumentCursor> DocumentBatchStream<C> {
    /// Create a stream shaped like `template`, an empty batch supplying the
    /// output column names and types.
    pub fn new(
        session: Arc<C::Session>,
        cursor: C,
        template: &RecordBatch,
        config: StreamConfig,
    ) -> Result<Self> {
        let template = SchemaTemplate::from_batch(template)?;
        Self::with_template(session, cursor, template, config)
    }

    /// Create a stream from a schema description built in code.
    pub fn from_description(
        session: Arc<C::Session>,
        cursor: C,
        description: SchemaDescription,
        config: StreamConfig,
    ) -> Result<Self> {
        Self::with_template(
            session,
            cursor,
            SchemaTemplate::from_description(description),
            config,
        )
    }

    pub fn with_template(
        session: Arc<C::Session>,
        cursor: C,
        template: SchemaTemplate,
        config: StreamConfig,
    ) -> Result<Self> {
        let batch_size = config.effective_batch_size();
        let builder = DocumentBatchBuilder::new(template, batch_size)?;
        Ok(Self {
            session,
            cursor,
            builder,
            days: config.day_numbering(),
            batch_size,
            state: StreamState::Reading,
            rows_emitted: 0,
        })
    }

    /// Produce the next batch.
    ///
    /// A batch with zero rows means the stream is exhausted.
    pub fn next_batch(&mut self) -> Result<RecordBatch> {
        match self.state {
            StreamState::Exhausted => return Ok(self.empty_batch()),
            StreamState::Failed => {
                return Err(Error::StreamFailed {
                    stream: self.stream_identity(),
                })
            }
            StreamState::Reading => {}
        }

        match self.read_next_batch() {
            Ok(batch) => Ok(batch),
            Err(e) => {
                self.state = StreamState::Failed;
                self.builder.reset();
                debug!(stream = %self.stream_identity(), error = %e, "stream_failed");
                Err(e)
            }
        }
    }

    fn read_next_batch(&mut self) -> Result<RecordBatch> {
        let mut pages = 0usize;

        while self.builder.row_count() < self.batch_size && self.state == StreamState::Reading {
            let page = self.cursor.fetch_next_page(&*self.session)?;
            pages += 1;
            trace!(
                cursor = %self.cursor.identity(),
                documents = page.len(),
                continuation = %page.continuation,
                "page_fetched"
            );

            for doc in &page.documents {
                self.builder.append_document(doc, &self.days)?;
            }

            if page.is_last() {
                self.state = StreamState::Exhausted;
                debug!(
                    stream = %self.stream_identity(),
                    rows_emitted = self.rows_emitted + self.builder.row_count(),
                    "cursor_exhausted"
                );
            }
        }

        let rows = self.builder.row_count();
        if rows == 0 {
            return Ok(self.empty_batch());
        }

        let batch = self.builder.finish()?;
        self.rows_emitted += rows;

        let seq = BATCH_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        debug!(
            seq = seq,
            stream = %self.stream_identity(),
            pages = pages,
            rows = rows,
            "batch_read"
        );

        Ok(batch)
    }

    fn empty_batch(&self) -> RecordBatch {
        RecordBatch::new_empty(self.schema())
    }

    /// Diagnostic identity, derived from the cursor's.
    pub fn stream_identity(&self) -> String {
        format!("DocumentStream(@{})", self.cursor.identity())
    }

    /// Get the output schema.
    pub fn schema(&self) -> SchemaRef {
        self.builder.template().schema.clone()
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn cursor(&self) -> &C {
        &self.cursor
    }

    /// Whether the cursor has been exhausted.
    pub fn is_finished(&self) -> bool {
        self.state == StreamState::Exhausted
    }

    /// Whether an earlier call failed.
    pub fn is_failed(&self) -> bool {
        self.state == StreamState::Failed
    }

    pub fn rows_emitted(&self) -> usize {
        self.rows_emitted
    }
}

/// Yields non-empty batches and ends at exhaustion or after the first error.
impl<C: DocumentCursor> Iterator for DocumentBatchStream<C> {
    type Item = Result<RecordBatch>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == StreamState::Failed {
            return None;
        }
        match self.next_batch() {
            Ok(batch) if batch.num_rows() == 0 => None,
            Ok(batch) => Some(Ok(batch)),
            Err(e) => Some(Err(e)),
        }
    }
}

impl<C: DocumentCursor + Unpin> Stream for DocumentBatchStream<C> {
    type Item = std::result::Result<RecordBatch, DataFusionError>;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        // Cursor round trips are blocking; each poll performs them inline.
        let this = self.get_mut();
        Poll::Ready(Iterator::next(this).map(|r| r.map_err(DataFusionError::from)))
    }
}

impl<C: DocumentCursor + Unpin> RecordBatchStream for DocumentBatchStream<C> {
    fn schema(&self) -> SchemaRef {
        DocumentBatchStream::schema(self)
    }
}
