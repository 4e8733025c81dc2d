//! Cursor abstractions over paginated query results.
//!
//! ## Design Principles
//!
//! - One blocking round trip per [`DocumentCursor::fetch_next_page`]
//! - Generic traits with associated types (no `Box<dyn>` in the hot path)
//! - The session is opaque and owned by the caller; cursors only borrow it
//! - No retry, reconnect or backoff at this layer

mod jsonl;
mod memory;

pub use jsonl::{JsonLinesCursor, DEFAULT_PAGE_SIZE};
pub use memory::PagedCursor;

use crate::document::Document;
use crate::error::Error;

/// Server-side cursor id returned with every page.
///
/// Zero means the server holds no further pages for this query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CursorId(pub i64);

impl CursorId {
    /// The "no more pages" sentinel.
    pub const EXHAUSTED: Self = Self(0);

    pub fn is_exhausted(&self) -> bool {
        *self == Self::EXHAUSTED
    }
}

impl std::fmt::Display for CursorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One network response: documents in server order plus the continuation.
#[derive(Clone, Debug)]
pub struct Page<D> {
    pub documents: Vec<D>,
    pub continuation: CursorId,
}

impl<D> Page<D> {
    pub fn new(documents: Vec<D>, continuation: CursorId) -> Self {
        Self {
            documents,
            continuation,
        }
    }

    /// A page after which the cursor is exhausted.
    pub fn last(documents: Vec<D>) -> Self {
        Self::new(documents, CursorId::EXHAUSTED)
    }

    pub fn is_last(&self) -> bool {
        self.continuation.is_exhausted()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Sequential reader of pages from a query cursor.
///
/// The cursor is created by the network layer before the stream starts.
/// Callers must not call `fetch_next_page` again after a page whose
/// continuation is [`CursorId::EXHAUSTED`].
pub trait DocumentCursor {
    /// Connection the cursor issues its requests over.
    type Session: ?Sized;

    /// Document type of the pages this cursor returns.
    type Document: Document;

    /// Perform one round trip and return the next page.
    ///
    /// Transport failures are returned as [`Error::Transport`].
    fn fetch_next_page(&mut self, session: &Self::Session) -> Result<Page<Self::Document>, Error>;

    /// Stable identity of the underlying cursor, for diagnostics.
    fn identity(&self) -> String;
}

impl<C: DocumentCursor + ?Sized> DocumentCursor for Box<C> {
    type Session = C::Session;
    type Document = C::Document;

    fn fetch_next_page(&mut self, session: &Self::Session) -> Result<Page<Self::Document>, Error> {
        (**self).fetch_next_page(session)
    }

    fn identity(&self) -> String {
        (**self).identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_id_sentinel() {
        assert!(CursorId::EXHAUSTED.is_exhausted());
        assert!(CursorId::default().is_exhausted());
        assert!(!CursorId(42).is_exhausted());
    }

    #[test]
    fn test_page_helpers() {
        let page: Page<u8> = Page::last(vec![1, 2]);
        assert!(page.is_last());
        assert_eq!(page.len(), 2);

        let page: Page<u8> = Page::new(vec![], CursorId(9));
        assert!(!page.is_last());
        assert!(page.is_empty());
    }
}
