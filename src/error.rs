use std::time::Duration;
use thiserror::Error;

/// Failure of a single page fetch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The (simulated) network request failed
    #[error("network error: {0}")]
    Network(String),

    /// The request did not complete in time
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

/// Errors surfaced by a mounted list handle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// The component has already been torn down
    #[error("list is unmounted")]
    Unmounted,

    /// The component loop stopped without a clean unmount
    #[error("list event loop is no longer running")]
    LoopClosed,
}
