//! Cursor over pages held in memory.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{CursorId, DocumentCursor, Page};
use crate::document::OwnedDocument;
use crate::error::Error;

static NEXT_CURSOR_ID: AtomicU64 = AtomicU64::new(1);

/// Cursor that replays a fixed sequence of pages.
///
/// Every page but the last carries a non-zero continuation; the last page
/// carries [`CursorId::EXHAUSTED`]. Fetching past the end is a transport
/// error, matching a server that has already closed the cursor. The number
/// of fetches is recorded so callers can verify round-trip counts.
#[derive(Debug)]
pub struct PagedCursor {
    id: u64,
    pages: VecDeque<Vec<OwnedDocument>>,
    fetches: usize,
    failure: Option<(usize, String)>,
}

impl PagedCursor {
    /// Cursor over the given pages. An empty list yields a single empty
    /// final page.
    pub fn new(pages: Vec<Vec<OwnedDocument>>) -> Self {
        Self {
            id: NEXT_CURSOR_ID.fetch_add(1, Ordering::Relaxed),
            pages: pages.into(),
            fetches: 0,
            failure: None,
        }
    }

    /// Split `documents` into pages of `page_size` documents.
    pub fn from_documents(documents: Vec<OwnedDocument>, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let mut pages = Vec::new();
        let mut iter = documents.into_iter().peekable();
        while iter.peek().is_some() {
            pages.push(iter.by_ref().take(page_size).collect());
        }
        Self::new(pages)
    }

    /// Builder: make fetch number `fetch` (1-based) fail with a transport
    /// error carrying `message`.
    pub fn failing_at(mut self, fetch: usize, message: impl Into<String>) -> Self {
        self.failure = Some((fetch, message.into()));
        self
    }

    /// Number of `fetch_next_page` calls made so far.
    pub fn fetches(&self) -> usize {
        self.fetches
    }

    pub fn remaining_pages(&self) -> usize {
        self.pages.len()
    }
}

impl DocumentCursor for PagedCursor {
    type Session = ();
    type Document = OwnedDocument;

    fn fetch_next_page(&mut self, _session: &()) -> Result<Page<OwnedDocument>, Error> {
        self.fetches += 1;

        if let Some((at, message)) = &self.failure {
            if *at == self.fetches {
                return Err(Error::transport(message.clone()));
            }
        }

        if self.fetches > 1 && self.pages.is_empty() {
            return Err(Error::transport(format!(
                "cursor {} not found: already exhausted",
                self.id
            )));
        }

        let documents = self.pages.pop_front().unwrap_or_default();
        let continuation = if self.pages.is_empty() {
            CursorId::EXHAUSTED
        } else {
            CursorId(self.id as i64)
        };
        Ok(Page::new(documents, continuation))
    }

    fn identity(&self) -> String {
        format!("paged({})", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(n: i32) -> Vec<OwnedDocument> {
        (0..n).map(|i| OwnedDocument::new().with("i", i)).collect()
    }

    #[test]
    fn test_pages_in_order_then_exhausted() {
        let mut cursor = PagedCursor::new(vec![docs(2), docs(3)]);

        let first = cursor.fetch_next_page(&()).unwrap();
        assert_eq!(first.len(), 2);
        assert!(!first.is_last());

        let second = cursor.fetch_next_page(&()).unwrap();
        assert_eq!(second.len(), 3);
        assert!(second.is_last());
        assert_eq!(cursor.fetches(), 2);
        assert_eq!(cursor.remaining_pages(), 0);

        assert!(matches!(cursor.fetch_next_page(&()), Err(Error::Transport(_))));
    }

    #[test]
    fn test_empty_cursor_yields_one_empty_final_page() {
        let mut cursor = PagedCursor::new(vec![]);
        let page = cursor.fetch_next_page(&()).unwrap();
        assert!(page.is_empty());
        assert!(page.is_last());
    }

    #[test]
    fn test_from_documents_splits_pages() {
        let cursor = PagedCursor::from_documents(docs(7), 3);
        assert_eq!(cursor.remaining_pages(), 3);
    }

    #[test]
    fn test_injected_failure() {
        let mut cursor = PagedCursor::new(vec![docs(1), docs(1)]).failing_at(2, "connection reset");
        assert!(cursor.fetch_next_page(&()).is_ok());
        let err = cursor.fetch_next_page(&()).unwrap_err();
        assert_eq!(err.to_string(), "Transport error: connection reset");
    }

    #[test]
    fn test_identity_is_stable_and_distinct() {
        let a = PagedCursor::new(vec![]);
        let b = PagedCursor::new(vec![]);
        assert_eq!(a.identity(), a.identity());
        assert_ne!(a.identity(), b.identity());
        assert!(a.identity().starts_with("paged("));
    }
}
