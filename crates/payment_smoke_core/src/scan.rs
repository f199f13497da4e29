//! Full-collection reads over a paginated store.
//!
//! A store hands back one page per call together with an opaque cursor.
//! `PagedScan` walks those cursors lazily: a page is fetched only once the
//! rows of the previous one have been consumed, and iteration ends when the
//! store stops returning a cursor.

use std::mem;

use thiserror::Error;

use crate::contract::StoredRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordPage<C> {
    pub records: Vec<StoredRecord>,
    pub next: Option<C>,
}

impl<C> RecordPage<C> {
    pub fn last(records: Vec<StoredRecord>) -> Self {
        Self {
            records,
            next: None,
        }
    }
}

pub trait RecordStore {
    type Cursor;

    fn scan_page(
        &self,
        collection: &str,
        cursor: Option<Self::Cursor>,
        page_size: Option<u32>,
    ) -> Result<RecordPage<Self::Cursor>, String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("scan of page {page} failed: {message}")]
pub struct ScanFailure {
    pub page: usize,
    pub message: String,
}

enum CursorState<C> {
    Start,
    Next(C),
    Exhausted,
}

pub struct PagedScan<'a, S: RecordStore> {
    store: &'a S,
    collection: &'a str,
    page_size: Option<u32>,
    buffered: std::vec::IntoIter<StoredRecord>,
    state: CursorState<S::Cursor>,
    pages_fetched: usize,
}

impl<'a, S: RecordStore> PagedScan<'a, S> {
    pub fn new(store: &'a S, collection: &'a str, page_size: Option<u32>) -> Self {
        Self {
            store,
            collection,
            page_size,
            buffered: Vec::new().into_iter(),
            state: CursorState::Start,
            pages_fetched: 0,
        }
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }
}

impl<S: RecordStore> Iterator for PagedScan<'_, S> {
    type Item = Result<StoredRecord, ScanFailure>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.buffered.next() {
                return Some(Ok(record));
            }

            // Left as Exhausted on error so the iterator is fused.
            let cursor = match mem::replace(&mut self.state, CursorState::Exhausted) {
                CursorState::Exhausted => return None,
                CursorState::Start => None,
                CursorState::Next(cursor) => Some(cursor),
            };

            let page_number = self.pages_fetched + 1;
            let page = match self.store.scan_page(self.collection, cursor, self.page_size) {
                Ok(page) => page,
                Err(message) => {
                    return Some(Err(ScanFailure {
                        page: page_number,
                        message,
                    }));
                }
            };

            self.pages_fetched = page_number;
            tracing::debug!(
                collection = self.collection,
                page = page_number,
                records = page.records.len(),
                has_more = page.next.is_some(),
                "scan_page_fetched"
            );

            if let Some(next) = page.next {
                self.state = CursorState::Next(next);
            }
            self.buffered = page.records.into_iter();
        }
    }
}
