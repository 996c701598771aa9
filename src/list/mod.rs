//! The mounted product list component.
//!
//! A single task owns the pager, the scroll trigger and the viewport, and
//! handles one event at a time. Page fetches run on their own task and report
//! back over a channel, so the loop never waits on the network itself.

#[cfg(test)]
mod tests;

use crate::config::ListConfig;
use crate::error::{FetchError, ListError};
use crate::pager::{Completion, FetchTicket, PageState, Pager};
use crate::render::Frame;
use crate::source::{DataSource, PageSlice};
use crate::trigger::{ScrollTrigger, Viewport, VisibilityEntry};
use std::ops::ControlFlow;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Height of one rendered row, in pixels
pub const ROW_HEIGHT: u32 = 32;

const EVENT_BUFFER: usize = 64;
const FRAME_BUFFER: usize = 256;

/// Input to the component loop
#[derive(Debug)]
enum ListEvent {
    /// Report from an external visibility observer
    Visibility(VisibilityEntry),
    /// Scroll the component's own viewport
    ScrollTo(u32),
    ScrollToBottom,
    Retry,
    Snapshot(oneshot::Sender<PageState>),
    Unmount(oneshot::Sender<PageState>),
}

/// A fetch result on its way back to the loop
struct Fetched {
    ticket: FetchTicket,
    result: Result<PageSlice, FetchError>,
}

/// Handle to a mounted list
///
/// Frames are produced after every state change and must be drained with
/// `next_frame`; the loop waits when the frame buffer is full. Dropping the
/// handle unmounts the list.
pub struct MountedList {
    events: mpsc::Sender<ListEvent>,
    frames: mpsc::Receiver<Frame>,
    task: JoinHandle<()>,
    unmounted: bool,
}

impl MountedList {
    /// Mount a list over `source`: starts the loop and the first page load
    pub fn mount<S: DataSource>(source: S, config: ListConfig) -> Self {
        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
        let (frame_tx, frame_rx) = mpsc::channel(FRAME_BUFFER);
        let (fetch_tx, fetch_rx) = mpsc::channel(EVENT_BUFFER);

        ::log::info!(
            "Mounting product list over {:?} records (page size {}, viewport {} rows)",
            source.len_hint(),
            config.page_size,
            config.viewport_rows
        );

        let component = Component {
            source: Arc::new(source),
            pager: Pager::new(config.page_size),
            trigger: ScrollTrigger::new(),
            viewport: Viewport::with_rows(config.viewport_rows, ROW_HEIGHT),
            title: config.title,
            revision: 0,
            fetch_task: None,
            fetch_tx,
            frames: frame_tx,
        };
        let task = tokio::spawn(component.run(event_rx, fetch_rx));

        Self {
            events: event_tx,
            frames: frame_rx,
            task,
            unmounted: false,
        }
    }

    /// Next rendered frame; `None` once the list is unmounted and drained
    pub async fn next_frame(&mut self) -> Option<Frame> {
        self.frames.recv().await
    }

    /// Next frame that satisfies `predicate`, skipping the others
    pub async fn wait_for<F>(&mut self, mut predicate: F) -> Option<Frame>
    where
        F: FnMut(&Frame) -> bool,
    {
        while let Some(frame) = self.frames.recv().await {
            if predicate(&frame) {
                return Some(frame);
            }
        }
        None
    }

    /// Deliver a visibility report for an observation from a rendered frame
    pub async fn report_visibility(&self, entry: VisibilityEntry) -> Result<(), ListError> {
        self.send(ListEvent::Visibility(entry)).await
    }

    /// Scroll the viewport to `offset` pixels from the top
    pub async fn scroll_to(&self, offset: u32) -> Result<(), ListError> {
        self.send(ListEvent::ScrollTo(offset)).await
    }

    /// Scroll the viewport so the last row is in view
    pub async fn scroll_to_bottom(&self) -> Result<(), ListError> {
        self.send(ListEvent::ScrollToBottom).await
    }

    /// Retry the page whose fetch failed
    pub async fn retry(&self) -> Result<(), ListError> {
        self.send(ListEvent::Retry).await
    }

    /// Current pager state
    pub async fn snapshot(&self) -> Result<PageState, ListError> {
        let (tx, rx) = oneshot::channel();
        self.send(ListEvent::Snapshot(tx)).await?;
        rx.await.map_err(|_| ListError::LoopClosed)
    }

    /// Tear the list down and return its final state
    ///
    /// The observation is disconnected and an in-flight fetch is abandoned;
    /// its result is never applied.
    pub async fn unmount(&mut self) -> Result<PageState, ListError> {
        let (tx, rx) = oneshot::channel();
        self.send(ListEvent::Unmount(tx)).await?;
        self.unmounted = true;
        rx.await.map_err(|_| ListError::LoopClosed)
    }

    /// Whether the component loop has finished
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    async fn send(&self, event: ListEvent) -> Result<(), ListError> {
        if self.unmounted {
            return Err(ListError::Unmounted);
        }
        self.events
            .send(event)
            .await
            .map_err(|_| ListError::LoopClosed)
    }
}

/// State owned by the component loop
struct Component<S> {
    source: Arc<S>,
    pager: Pager,
    trigger: ScrollTrigger,
    viewport: Viewport,
    title: String,
    revision: u64,
    fetch_task: Option<JoinHandle<()>>,
    fetch_tx: mpsc::Sender<Fetched>,
    frames: mpsc::Sender<Frame>,
}

impl<S: DataSource> Component<S> {
    async fn run(
        mut self,
        mut events: mpsc::Receiver<ListEvent>,
        mut fetched: mpsc::Receiver<Fetched>,
    ) {
        // Mounting loads the first page without waiting for a trigger
        if let Some(ticket) = self.pager.request_next() {
            self.spawn_fetch(ticket);
        }
        self.render().await;

        loop {
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else {
                        ::log::debug!("List handle dropped");
                        self.teardown();
                        break;
                    };
                    if self.handle_event(event).await.is_break() {
                        break;
                    }
                }
                Some(Fetched { ticket, result }) = fetched.recv() => {
                    self.fetch_task = None;
                    match self.pager.complete(ticket, result) {
                        Completion::Stale => {}
                        _ => self.render().await,
                    }
                }
            }
        }

        ::log::info!("Product list unmounted after {} renders", self.revision);
    }

    async fn handle_event(&mut self, event: ListEvent) -> ControlFlow<()> {
        match event {
            ListEvent::Visibility(entry) => {
                if self.on_visibility(entry) {
                    self.render().await;
                }
            }
            ListEvent::ScrollTo(offset) => {
                let rows = self.pager.state().items.len();
                self.viewport.scroll_to(offset, rows);
                self.observe_viewport().await;
            }
            ListEvent::ScrollToBottom => {
                let rows = self.pager.state().items.len();
                self.viewport.scroll_to_bottom(rows);
                self.observe_viewport().await;
            }
            ListEvent::Retry => {
                if let Some(ticket) = self.pager.retry() {
                    self.spawn_fetch(ticket);
                    self.render().await;
                }
            }
            ListEvent::Snapshot(reply) => {
                let _ = reply.send(self.pager.state().clone());
            }
            ListEvent::Unmount(reply) => {
                self.teardown();
                let _ = reply.send(self.pager.state().clone());
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Feed a report to the trigger; true when it started a page load
    fn on_visibility(&mut self, entry: VisibilityEntry) -> bool {
        let has_more = self.pager.state().has_more;
        if !self.trigger.on_visibility(entry, has_more) {
            return false;
        }

        match self.pager.request_next() {
            Some(ticket) => {
                self.spawn_fetch(ticket);
                true
            }
            None => false,
        }
    }

    async fn observe_viewport(&mut self) {
        if let Some(entry) = self.trigger.evaluate(&self.viewport) {
            if self.on_visibility(entry) {
                self.render().await;
            }
        }
    }

    /// Emit a frame and re-bind the trigger to the new last row
    ///
    /// A freshly bound observation reports the sentinel's current visibility
    /// at once, which may start the next load and require another render.
    async fn render(&mut self) {
        loop {
            self.revision += 1;
            let mut frame = Frame::capture(self.revision, &self.title, &self.pager);
            frame.observation = self.trigger.rebind(frame.sentinel.clone());

            let rows = frame.rows.len();
            self.viewport.scroll_to(self.viewport.scroll_offset, rows);

            ::log::trace!(
                "Render {}: {} rows, status {:?}",
                self.revision,
                rows,
                frame.status
            );
            if self.frames.send(frame).await.is_err() {
                ::log::trace!("No frame receiver for render {}", self.revision);
            }

            let Some(entry) = self.trigger.evaluate(&self.viewport) else {
                return;
            };
            if !self.on_visibility(entry) {
                return;
            }
        }
    }

    fn spawn_fetch(&mut self, ticket: FetchTicket) {
        let source = Arc::clone(&self.source);
        let fetch_tx = self.fetch_tx.clone();
        let page_size = self.pager.page_size();

        self.fetch_task = Some(tokio::spawn(async move {
            let result = source.fetch_page(ticket.page(), page_size).await;
            if fetch_tx.send(Fetched { ticket, result }).await.is_err() {
                ::log::debug!("List gone before page {} arrived", ticket.page());
            }
        }));
    }

    fn teardown(&mut self) {
        self.pager.teardown();
        self.trigger.disconnect();
        if let Some(task) = self.fetch_task.take() {
            ::log::debug!("Abandoning in-flight fetch");
            task.abort();
        }
    }
}
