pub mod catalog;
pub mod mock;

use crate::config::ListConfig;
use crate::error::FetchError;
use crate::record::Record;
use std::future::Future;
use std::ops::Range;

pub use mock::MockSource;

/// One fetched page of records
#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice {
    /// Records on the page, in collection order
    pub items: Vec<Record>,
    /// Whether this page reaches the end of the collection
    pub is_end: bool,
}

impl PageSlice {
    /// Slice `page` (1-based) out of `records`
    pub fn from_records(records: &[Record], page: u32, page_size: usize) -> Self {
        let bounds = page_bounds(page, page_size);
        let is_end = bounds.end >= records.len();
        let start = bounds.start.min(records.len());
        let end = bounds.end.min(records.len());

        Self {
            items: records[start..end].to_vec(),
            is_end,
        }
    }
}

/// Index range covered by a 1-based page number
///
/// Page 0 is treated as page 1.
pub fn page_bounds(page: u32, page_size: usize) -> Range<usize> {
    let page = page.max(1) as usize;
    (page - 1) * page_size..page * page_size
}

/// Number of fetches needed to exhaust a collection of `len` records
pub fn pages_to_exhaust(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// A paged collection of records
///
/// Implementations are shared with the fetch task spawned for every page
/// load, so the returned future must be `Send`.
pub trait DataSource: Send + Sync + 'static {
    /// Fetch page `page` (1-based) containing up to `page_size` records
    fn fetch_page(
        &self,
        page: u32,
        page_size: usize,
    ) -> impl Future<Output = Result<PageSlice, FetchError>> + Send;

    /// Total number of records, if known
    fn len_hint(&self) -> Option<usize> {
        None
    }

    /// Adjust the source to the list it is about to be mounted in
    fn configure(&mut self, _config: &ListConfig) {}
}
