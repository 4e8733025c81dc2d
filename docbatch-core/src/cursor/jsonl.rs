//! Cursor over a JSON-lines document export.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::trace;

use super::{CursorId, DocumentCursor, Page};
use crate::document::OwnedDocument;
use crate::error::Error;
use crate::json::parse_document;

/// Default documents per page, matching the store's first-batch size.
pub const DEFAULT_PAGE_SIZE: usize = 101;

/// Cursor that serves one JSON object per line, `page_size` at a time.
///
/// Blank lines are skipped. The continuation is [`CursorId::EXHAUSTED`] on
/// the page that drains the input; otherwise it is the 1-based number of the
/// next line to read, which is never zero.
pub struct JsonLinesCursor<R: BufRead> {
    reader: R,
    label: String,
    page_size: usize,
    line: u64,
    exhausted: bool,
}

impl JsonLinesCursor<BufReader<File>> {
    /// Open a JSON-lines file.
    pub fn open<P: AsRef<Path>>(path: P, page_size: usize) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Ok(Self::new(
            BufReader::new(file),
            path.display().to_string(),
            page_size,
        ))
    }
}

impl<R: BufRead> JsonLinesCursor<R> {
    pub fn new(reader: R, label: impl Into<String>, page_size: usize) -> Self {
        Self {
            reader,
            label: label.into(),
            page_size: page_size.max(1),
            line: 0,
            exhausted: false,
        }
    }

    /// Lines consumed so far.
    pub fn lines_read(&self) -> u64 {
        self.line
    }

    fn at_eof(&mut self) -> Result<bool, Error> {
        Ok(self.reader.fill_buf()?.is_empty())
    }
}

impl<R: BufRead> DocumentCursor for JsonLinesCursor<R> {
    type Session = ();
    type Document = OwnedDocument;

    fn fetch_next_page(&mut self, _session: &()) -> Result<Page<OwnedDocument>, Error> {
        if self.exhausted {
            return Err(Error::transport(format!(
                "cursor {} already exhausted",
                self.identity()
            )));
        }

        let mut documents = Vec::with_capacity(self.page_size);
        let mut buf = String::new();
        while documents.len() < self.page_size {
            buf.clear();
            if self.reader.read_line(&mut buf)? == 0 {
                break;
            }
            self.line += 1;
            let text = buf.trim();
            if text.is_empty() {
                continue;
            }
            documents.push(parse_document(text, self.line)?);
        }

        self.exhausted = self.at_eof()?;
        let continuation = if self.exhausted {
            CursorId::EXHAUSTED
        } else {
            CursorId(self.line as i64 + 1)
        };
        trace!(
            cursor = %self.label,
            documents = documents.len(),
            continuation = %continuation,
            "jsonl_page"
        );
        Ok(Page::new(documents, continuation))
    }

    fn identity(&self) -> String {
        format!("jsonl({})", self.label)
    }
}
