use crate::config::ListConfig;
use crate::error::FetchError;
use crate::record::Record;
use crate::source::{DataSource, PageSlice};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory data source that answers after a simulated network delay
///
/// Clones share the same collection, counters and failure queue.
#[derive(Debug, Clone)]
pub struct MockSource {
    records: Arc<Vec<Record>>,
    latency: Duration,
    failures: Arc<Mutex<Failures>>,
    stats: Arc<FetchStats>,
}

/// Failures waiting to be returned by upcoming fetches
#[derive(Debug, Default)]
struct Failures {
    any_page: VecDeque<FetchError>,
    by_page: HashMap<u32, VecDeque<FetchError>>,
}

impl Failures {
    fn take(&mut self, page: u32) -> Option<FetchError> {
        if let Some(queued) = self.by_page.get_mut(&page) {
            let error = queued.pop_front();
            if queued.is_empty() {
                self.by_page.remove(&page);
            }
            if error.is_some() {
                return error;
            }
        }
        self.any_page.pop_front()
    }
}

#[derive(Debug, Default)]
struct FetchStats {
    started: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

/// Counts a fetch as in flight until dropped, including when the fetch task is aborted
struct InFlightGuard<'a>(&'a FetchStats);

impl<'a> InFlightGuard<'a> {
    fn enter(stats: &'a FetchStats) -> Self {
        stats.started.fetch_add(1, Ordering::SeqCst);
        let now = stats.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        stats.max_in_flight.fetch_max(now, Ordering::SeqCst);
        Self(stats)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MockSource {
    /// Create a source over `records` with a 1.5s simulated latency
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: Arc::new(records),
            latency: Duration::from_millis(1500),
            failures: Arc::new(Mutex::new(Failures::default())),
            stats: Arc::new(FetchStats::default()),
        }
    }

    /// Set the simulated latency
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make the next fetch fail with `error` after the simulated delay
    ///
    /// Queued failures are consumed in order, one per fetch.
    pub fn inject_failure(&self, error: FetchError) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.any_page.push_back(error);
        }
    }

    /// Make the next fetch of `page` fail with `error`
    ///
    /// Page-specific failures take precedence over `inject_failure`.
    pub fn inject_failure_at(&self, page: u32, error: FetchError) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.by_page.entry(page).or_default().push_back(error);
        }
    }

    /// Records backing this source
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Simulated latency per fetch
    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Number of fetches started so far
    pub fn fetch_count(&self) -> usize {
        self.stats.started.load(Ordering::SeqCst)
    }

    /// Number of fetches currently in flight
    pub fn in_flight(&self) -> usize {
        self.stats.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of fetches that were in flight at the same time
    pub fn max_in_flight(&self) -> usize {
        self.stats.max_in_flight.load(Ordering::SeqCst)
    }

    fn next_failure(&self, page: u32) -> Option<FetchError> {
        self.failures.lock().ok().and_then(|mut f| f.take(page))
    }
}

impl DataSource for MockSource {
    async fn fetch_page(&self, page: u32, page_size: usize) -> Result<PageSlice, FetchError> {
        let _guard = InFlightGuard::enter(&self.stats);

        ::log::debug!(
            "Fetching page {} (size {}) with {}ms latency",
            page,
            page_size,
            self.latency.as_millis()
        );
        tokio::time::sleep(self.latency).await;

        match self.next_failure(page) {
            Some(error) => {
                ::log::warn!("Simulated failure for page {}: {}", page, error);
                Err(error)
            }
            None => Ok(PageSlice::from_records(&self.records, page, page_size)),
        }
    }

    fn len_hint(&self) -> Option<usize> {
        Some(self.records.len())
    }

    fn configure(&mut self, config: &ListConfig) {
        if let Some(latency) = config.latency() {
            self.latency = latency;
        }
    }
}
