pub mod html;
pub mod text;

#[cfg(test)]
mod tests;

use crate::pager::{PageFailure, Pager, PagerPhase};
use crate::record::Record;
use crate::trigger::{ObservationId, Sentinel};
use std::sync::Arc;

/// Column headings of the product table
pub const COLUMNS: [&str; 4] = ["Product ID", "Product Name", "Price", "Bought Date"];

/// Status line shown below the table
#[derive(Debug, Clone, PartialEq)]
pub enum ListStatus {
    /// Nothing to show below the table
    Idle,
    /// A page is being fetched
    Loading,
    /// The collection is exhausted
    EndOfList,
    /// The last fetch failed and can be retried
    Failed(PageFailure),
}

impl ListStatus {
    fn from_pager(pager: &Pager) -> Self {
        match pager.phase() {
            PagerPhase::Idle => ListStatus::Idle,
            PagerPhase::Loading => ListStatus::Loading,
            PagerPhase::Exhausted => ListStatus::EndOfList,
            PagerPhase::Failed => match pager.last_failure() {
                Some(failure) => ListStatus::Failed(failure.clone()),
                None => ListStatus::Idle,
            },
        }
    }

    /// Text of the status line, if any
    pub fn message(&self) -> Option<String> {
        match self {
            ListStatus::Idle => None,
            ListStatus::Loading => Some("Loading...".to_string()),
            ListStatus::EndOfList => Some("End of List".to_string()),
            ListStatus::Failed(failure) => Some(format!(
                "Failed to load page {}: {}",
                failure.page, failure.error
            )),
        }
    }
}

/// Snapshot of everything one render of the list shows
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Monotonic render counter
    pub revision: u64,
    pub title: String,
    /// Rows shown, shared with the pager until the next page is appended
    pub rows: Arc<[Record]>,
    pub status: ListStatus,
    /// Last rendered row, the load trigger target
    pub sentinel: Option<Sentinel>,
    /// Observation bound to the sentinel for this render
    pub observation: Option<ObservationId>,
}

impl Frame {
    /// Capture the current pager state
    pub fn capture(revision: u64, title: &str, pager: &Pager) -> Self {
        let rows = Arc::clone(&pager.state().items);
        let sentinel = rows.last().map(|record| Sentinel {
            index: rows.len() - 1,
            key: record.id.clone(),
        });

        Self {
            revision,
            title: title.to_string(),
            rows,
            status: ListStatus::from_pager(pager),
            sentinel,
            observation: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == ListStatus::Loading
    }

    pub fn is_end_of_list(&self) -> bool {
        self.status == ListStatus::EndOfList
    }

    /// Whether the frame offers a retry action
    pub fn can_retry(&self) -> bool {
        matches!(self.status, ListStatus::Failed(_))
    }
}

/// Output formats for a rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    Html,
    Text,
}

/// Renders frames in a chosen format
pub struct Renderer;

impl Renderer {
    pub fn render(frame: &Frame, format: RenderFormat) -> String {
        match format {
            RenderFormat::Html => html::render(frame),
            RenderFormat::Text => text::render(frame),
        }
    }
}
