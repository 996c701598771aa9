// Re-export modules
pub mod config;
pub mod error;
pub mod list;
pub mod pager;
pub mod record;
pub mod render;
pub mod source;
pub mod trigger;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::ListConfig;
pub use error::{FetchError, ListError};
pub use list::MountedList;
pub use record::Record;
pub use render::{Frame, ListStatus, RenderFormat};
pub use source::{DataSource, MockSource};

use std::path::Path;

/// Main builder for a paginated product list
pub struct ProductList<S> {
    source: S,
    config: ListConfig,
}

impl ProductList<MockSource> {
    /// Create a list over an in-memory collection
    pub fn from_records(records: Vec<Record>) -> Self {
        Self::new(MockSource::new(records))
    }

    /// Create a list over a generated catalog of `count` products
    pub fn generated(count: usize) -> Self {
        Self::from_records(source::catalog::generate(count))
    }

    /// Create a list over a catalog loaded from a JSON file
    pub fn from_catalog_file(
        path: impl AsRef<Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let records = source::catalog::from_json_file(path)?;
        Ok(Self::from_records(records))
    }
}

impl<S: DataSource> ProductList<S> {
    /// Create a new ProductList builder over the given source
    pub fn new(source: S) -> Self {
        Self {
            source,
            config: ListConfig::default(),
        }
    }

    /// Set the number of records per page
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.config.page_size = page_size.max(1);
        self
    }

    /// Override the simulated latency of every page fetch
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.config.latency_ms = Some(latency_ms);
        self
    }

    /// Set how many rows fit in the viewport
    pub fn with_viewport_rows(mut self, rows: usize) -> Self {
        self.config.viewport_rows = rows.max(1);
        self
    }

    /// Set the heading rendered above the table
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: ListConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(
        self,
        path: impl AsRef<Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let config = ListConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(self, config_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config = ListConfig::from_json(config_str)?;
        Ok(self.with_config(config))
    }

    /// The configuration the list will mount with
    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    /// Mount the list: starts its event loop and the first page load
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(self) -> MountedList {
        let mut source = self.source;
        source.configure(&self.config);
        MountedList::mount(source, self.config)
    }
}
