use crate::error::FetchError;
use crate::record::Record;
use crate::source::PageSlice;
use std::sync::Arc;

/// Observable state of a paginated list
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    /// Records loaded so far, append-only; shared with rendered frames
    pub items: Arc<[Record]>,
    /// Last page that was loaded (1 before the first load completes)
    pub current_page: u32,
    /// Whether a fetch is in flight
    pub is_loading: bool,
    /// False once a fetch reached the end of the collection
    pub has_more: bool,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            items: Arc::new([]),
            current_page: 1,
            is_loading: false,
            has_more: true,
        }
    }
}

/// Token for the single fetch a pager allows in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    page: u32,
    generation: u64,
}

impl FetchTicket {
    /// Page this fetch is for
    pub fn page(&self) -> u32 {
        self.page
    }
}

/// A fetch that failed, kept until the next retry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub page: u32,
    pub error: FetchError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerPhase {
    Idle,
    Loading,
    /// Idle with a failed fetch waiting for `retry`
    Failed,
    /// Terminal: the collection is exhausted
    Exhausted,
}

/// Outcome of handing a fetch result to the pager
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Items were appended
    Applied { appended: usize, has_more: bool },
    /// The fetch failed; state is unchanged apart from the loading flag
    Failed(PageFailure),
    /// The ticket does not belong to the current request and was dropped
    Stale,
}

/// Page-advancing state machine: Idle -> Loading -> Idle ... -> Exhausted
#[derive(Debug)]
pub struct Pager {
    page_size: usize,
    state: PageState,
    pages_loaded: u32,
    in_flight: Option<FetchTicket>,
    last_failure: Option<PageFailure>,
    generation: u64,
    torn_down: bool,
}

impl Pager {
    /// Create a pager in its mounted state: empty, page 1, more to load
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            state: PageState::default(),
            pages_loaded: 0,
            in_flight: None,
            last_failure: None,
            generation: 0,
            torn_down: false,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn last_failure(&self) -> Option<&PageFailure> {
        self.last_failure.as_ref()
    }

    pub fn in_flight(&self) -> Option<FetchTicket> {
        self.in_flight
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn phase(&self) -> PagerPhase {
        if self.in_flight.is_some() {
            PagerPhase::Loading
        } else if !self.state.has_more {
            PagerPhase::Exhausted
        } else if self.last_failure.is_some() {
            PagerPhase::Failed
        } else {
            PagerPhase::Idle
        }
    }

    /// Page the next successful request will load
    pub fn next_page(&self) -> u32 {
        self.pages_loaded + 1
    }

    /// Start loading the next page
    ///
    /// Returns `None` while a fetch is in flight, after exhaustion, after a
    /// failure that has not been retried, and after teardown.
    pub fn request_next(&mut self) -> Option<FetchTicket> {
        match self.phase() {
            PagerPhase::Idle if !self.torn_down => Some(self.begin()),
            phase => {
                ::log::trace!(
                    "Ignoring load request in phase {:?} (torn down: {})",
                    phase,
                    self.torn_down
                );
                None
            }
        }
    }

    /// Clear a recorded failure and request the same page again
    pub fn retry(&mut self) -> Option<FetchTicket> {
        if self.torn_down || self.phase() != PagerPhase::Failed {
            return None;
        }
        if let Some(failure) = self.last_failure.take() {
            ::log::info!("Retrying page {} after: {}", failure.page, failure.error);
        }
        Some(self.begin())
    }

    fn begin(&mut self) -> FetchTicket {
        let ticket = FetchTicket {
            page: self.next_page(),
            generation: self.generation,
        };
        self.in_flight = Some(ticket);
        self.state.is_loading = true;
        ::log::debug!("Loading page {}", ticket.page);
        ticket
    }

    /// Apply the result of the fetch identified by `ticket`
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<PageSlice, FetchError>,
    ) -> Completion {
        if self.torn_down || self.in_flight != Some(ticket) {
            ::log::debug!("Dropping stale result for page {}", ticket.page);
            return Completion::Stale;
        }

        self.in_flight = None;
        self.state.is_loading = false;

        match result {
            Ok(slice) => {
                let appended = slice.items.len();
                if appended > 0 {
                    let mut items = Vec::with_capacity(self.state.items.len() + appended);
                    items.extend_from_slice(&self.state.items);
                    items.extend(slice.items);
                    self.state.items = items.into();
                }
                self.state.current_page = ticket.page;
                self.state.has_more = !slice.is_end;
                self.pages_loaded = ticket.page;
                self.last_failure = None;

                ::log::debug!(
                    "Page {} loaded: {} items, {} total, has_more={}",
                    ticket.page,
                    appended,
                    self.state.items.len(),
                    self.state.has_more
                );
                Completion::Applied {
                    appended,
                    has_more: self.state.has_more,
                }
            }
            Err(error) => {
                ::log::warn!("Page {} failed: {}", ticket.page, error);
                let failure = PageFailure {
                    page: ticket.page,
                    error,
                };
                self.last_failure = Some(failure.clone());
                Completion::Failed(failure)
            }
        }
    }

    /// Stop accepting requests and results
    ///
    /// Any ticket issued before teardown completes as `Completion::Stale`.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.generation += 1;
        self.in_flight = None;
        self.state.is_loading = false;
        ::log::debug!("Pager torn down with {} items", self.state.items.len());
    }
}
