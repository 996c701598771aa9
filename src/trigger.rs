//! Visibility-driven load trigger.
//!
//! The trigger observes a single sentinel, the last rendered row, and turns
//! visibility reports for it into load requests. It behaves like an
//! intersection observer: every rebind starts a fresh observation, and
//! reports carrying an older observation id are ignored.

/// Identifier of one observation; a new one is issued on every rebind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObservationId(u64);

/// The row currently used as the load trigger target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentinel {
    /// Position of the row in the rendered list
    pub index: usize,
    /// Key of the record rendered in that row
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub id: ObservationId,
    pub sentinel: Sentinel,
}

/// A visibility report for an observed sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityEntry {
    pub observation: ObservationId,
    pub is_intersecting: bool,
}

/// Vertical viewport over a list of fixed-height rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Distance scrolled from the top of the list, in pixels
    pub scroll_offset: u32,
    /// Visible height in pixels
    pub height: u32,
    /// Height of every row in pixels
    pub row_height: u32,
}

impl Viewport {
    /// A viewport at the top of the list showing `rows` rows
    ///
    /// Always shows at least one row; heights saturate at `u32::MAX` pixels.
    pub fn with_rows(rows: usize, row_height: u32) -> Self {
        let row_height = row_height.max(1);
        Self {
            scroll_offset: 0,
            height: span(rows.max(1), row_height),
            row_height,
        }
    }

    /// Total height of `row_count` rows
    pub fn content_height(&self, row_count: usize) -> u32 {
        span(row_count, self.row_height)
    }

    /// Whether row `index` overlaps the visible area
    pub fn is_row_visible(&self, index: usize) -> bool {
        let top = span(index, self.row_height);
        let bottom = top.saturating_add(self.row_height);
        top < self.scroll_offset.saturating_add(self.height) && bottom > self.scroll_offset
    }

    /// Scroll to `offset`, clamped to the scrollable range of `row_count` rows
    pub fn scroll_to(&mut self, offset: u32, row_count: usize) {
        let max_offset = self.content_height(row_count).saturating_sub(self.height);
        self.scroll_offset = offset.min(max_offset);
    }

    /// Scroll so the last of `row_count` rows is at the bottom edge
    pub fn scroll_to_bottom(&mut self, row_count: usize) {
        self.scroll_to(u32::MAX, row_count);
    }
}

/// Pixel height of `rows` rows of `row_height`, saturating
fn span(rows: usize, row_height: u32) -> u32 {
    u32::try_from(rows).unwrap_or(u32::MAX).saturating_mul(row_height)
}

/// Observes the last rendered row and signals when the next page is wanted
#[derive(Debug, Default)]
pub struct ScrollTrigger {
    current: Option<Observation>,
    was_intersecting: bool,
    next_id: u64,
}

impl ScrollTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active observation, if any
    pub fn observation(&self) -> Option<&Observation> {
        self.current.as_ref()
    }

    /// Retarget the trigger at the row that is now last
    ///
    /// The previous observation is disconnected first, so reports for it are
    /// ignored from here on. Called once per render; `None` for an empty list.
    pub fn rebind(&mut self, sentinel: Option<Sentinel>) -> Option<ObservationId> {
        self.disconnect();

        let sentinel = sentinel?;
        self.next_id += 1;
        let id = ObservationId(self.next_id);
        ::log::trace!(
            "Observing sentinel {} at row {} ({:?})",
            sentinel.key,
            sentinel.index,
            id
        );
        self.current = Some(Observation { id, sentinel });
        Some(id)
    }

    /// Drop the active observation
    pub fn disconnect(&mut self) {
        if let Some(previous) = self.current.take() {
            ::log::trace!("Disconnected observation {:?}", previous.id);
        }
        self.was_intersecting = false;
    }

    /// Build the report an observer would deliver for `viewport`
    pub fn evaluate(&self, viewport: &Viewport) -> Option<VisibilityEntry> {
        self.current.as_ref().map(|observation| VisibilityEntry {
            observation: observation.id,
            is_intersecting: viewport.is_row_visible(observation.sentinel.index),
        })
    }

    /// Handle a visibility report; returns true when the next page should load
    ///
    /// Only a transition into view of the current observation counts, and
    /// only while there is more to load.
    pub fn on_visibility(&mut self, entry: VisibilityEntry, has_more: bool) -> bool {
        let Some(observation) = &self.current else {
            return false;
        };
        if observation.id != entry.observation {
            ::log::trace!("Ignoring report for stale {:?}", entry.observation);
            return false;
        }

        let entered = entry.is_intersecting && !self.was_intersecting;
        self.was_intersecting = entry.is_intersecting;

        if entered && has_more {
            ::log::debug!("Sentinel {} is visible", observation.sentinel.key);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentinel(index: usize) -> Sentinel {
        Sentinel {
            index,
            key: format!("P{:05}", index + 1),
        }
    }

    #[test]
    fn test_viewport_visibility() {
        let mut viewport = Viewport::with_rows(8, 20);
        assert!(viewport.is_row_visible(0));
        assert!(viewport.is_row_visible(7));
        assert!(!viewport.is_row_visible(8));

        viewport.scroll_to_bottom(10);
        assert_eq!(viewport.scroll_offset, 40);
        assert!(!viewport.is_row_visible(1));
        assert!(viewport.is_row_visible(2));
        assert!(viewport.is_row_visible(9));
    }

    #[test]
    fn test_scroll_is_clamped_for_short_lists() {
        let mut viewport = Viewport::with_rows(8, 20);
        viewport.scroll_to_bottom(3);
        assert_eq!(viewport.scroll_offset, 0);

        viewport.scroll_to(1_000, 20);
        assert_eq!(viewport.scroll_offset, 240);
    }

    #[test]
    fn test_visible_sentinel_signals_once() {
        let mut trigger = ScrollTrigger::new();
        let id = trigger.rebind(Some(sentinel(9))).unwrap();
        let visible = VisibilityEntry {
            observation: id,
            is_intersecting: true,
        };

        assert!(trigger.on_visibility(visible, true));
        assert!(!trigger.on_visibility(visible, true));

        let hidden = VisibilityEntry {
            observation: id,
            is_intersecting: false,
        };
        assert!(!trigger.on_visibility(hidden, true));
        assert!(trigger.on_visibility(visible, true));
    }

    #[test]
    fn test_no_signal_without_more_pages() {
        let mut trigger = ScrollTrigger::new();
        let id = trigger.rebind(Some(sentinel(4))).unwrap();
        let entry = VisibilityEntry {
            observation: id,
            is_intersecting: true,
        };
        assert!(!trigger.on_visibility(entry, false));
    }

    #[test]
    fn test_rebind_discards_previous_observation() {
        let mut trigger = ScrollTrigger::new();
        let old = trigger.rebind(Some(sentinel(9))).unwrap();
        let new = trigger.rebind(Some(sentinel(19))).unwrap();
        assert_ne!(old, new);
        assert_eq!(trigger.observation().unwrap().sentinel.index, 19);

        let stale = VisibilityEntry {
            observation: old,
            is_intersecting: true,
        };
        assert!(!trigger.on_visibility(stale, true));

        let fresh = VisibilityEntry {
            observation: new,
            is_intersecting: true,
        };
        assert!(trigger.on_visibility(fresh, true));
    }

    #[test]
    fn test_rebind_to_same_row_observes_again() {
        let mut trigger = ScrollTrigger::new();
        let first = trigger.rebind(Some(sentinel(9))).unwrap();
        let visible = |observation| VisibilityEntry {
            observation,
            is_intersecting: true,
        };
        assert!(trigger.on_visibility(visible(first), true));

        let second = trigger.rebind(Some(sentinel(9))).unwrap();
        assert!(trigger.on_visibility(visible(second), true));
    }

    #[test]
    fn test_empty_list_has_no_observation() {
        let mut trigger = ScrollTrigger::new();
        trigger.rebind(Some(sentinel(0)));
        assert_eq!(trigger.rebind(None), None);
        assert!(trigger.observation().is_none());
        assert_eq!(trigger.evaluate(&Viewport::with_rows(8, 20)), None);
    }

    #[test]
    fn test_evaluate_uses_sentinel_row() {
        let mut trigger = ScrollTrigger::new();
        let id = trigger.rebind(Some(sentinel(9))).unwrap();
        let mut viewport = Viewport::with_rows(8, 20);

        let entry = trigger.evaluate(&viewport).unwrap();
        assert_eq!(entry.observation, id);
        assert!(!entry.is_intersecting);

        viewport.scroll_to_bottom(10);
        assert!(trigger.evaluate(&viewport).unwrap().is_intersecting);
    }

    #[test]
    fn test_huge_viewport_saturates() {
        let mut viewport = Viewport::with_rows(200_000_000, 32);
        assert_eq!(viewport.height, u32::MAX);
        assert_eq!(viewport.content_height(usize::MAX), u32::MAX);
        assert!(viewport.is_row_visible(0));
        assert!(viewport.is_row_visible(1_000_000));

        viewport.scroll_to_bottom(usize::MAX);
        assert_eq!(viewport.scroll_offset, 0);
        assert!(!viewport.is_row_visible(usize::MAX));
    }

    #[test]
    fn test_zero_rows_still_shows_one_row() {
        let mut viewport = Viewport::with_rows(0, 20);
        assert_eq!(viewport.height, 20);
        assert!(viewport.is_row_visible(0));

        viewport.scroll_to_bottom(10);
        assert!(viewport.is_row_visible(9));
        assert!(!viewport.is_row_visible(8));
    }

    #[test]
    fn test_disconnect() {
        let mut trigger = ScrollTrigger::new();
        let id = trigger.rebind(Some(sentinel(3))).unwrap();
        trigger.disconnect();
        let entry = VisibilityEntry {
            observation: id,
            is_intersecting: true,
        };
        assert!(!trigger.on_visibility(entry, true));
    }
}
