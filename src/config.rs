use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Configuration for a product list instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListConfig {
    /// Number of records fetched per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Simulated network latency for every page fetch; when unset the
    /// source keeps its own
    #[serde(default)]
    pub latency_ms: Option<u64>,

    /// Number of rows that fit in the viewport
    #[serde(default = "default_viewport_rows")]
    pub viewport_rows: usize,

    /// Heading rendered above the table
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            latency_ms: None,
            viewport_rows: default_viewport_rows(),
            title: default_title(),
        }
    }
}

impl ListConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        if config.page_size == 0 {
            return Err("page_size must be at least 1".into());
        }
        if config.viewport_rows == 0 {
            return Err("viewport_rows must be at least 1".into());
        }
        Ok(config)
    }

    /// Simulated latency override as a duration
    pub fn latency(&self) -> Option<Duration> {
        self.latency_ms.map(Duration::from_millis)
    }
}

/// Default records per page
fn default_page_size() -> usize {
    10
}

/// Default viewport height in rows
fn default_viewport_rows() -> usize {
    8
}

fn default_title() -> String {
    "Product List".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = ListConfig::from_json(r#"{"page_size": 25}"#).unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.latency_ms, None);
        assert_eq!(config.viewport_rows, 8);
        assert_eq!(config.title, "Product List");
        assert_eq!(config.latency(), None);
    }

    #[test]
    fn test_latency_override() {
        let config = ListConfig::from_json(r#"{"latency_ms": 250}"#).unwrap();
        assert_eq!(config.latency(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_empty_object_is_default() {
        let config = ListConfig::from_json("{}").unwrap();
        assert_eq!(config, ListConfig::default());
    }

    #[test]
    fn test_rejects_zero_page_size() {
        assert!(ListConfig::from_json(r#"{"page_size": 0}"#).is_err());
    }

    #[test]
    fn test_rejects_zero_viewport_rows() {
        assert!(ListConfig::from_json(r#"{"viewport_rows": 0}"#).is_err());
    }

    #[test]
    fn test_accepts_oversized_viewport() {
        let config = ListConfig::from_json(r#"{"viewport_rows": 200000000}"#).unwrap();
        assert_eq!(config.viewport_rows, 200_000_000);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(ListConfig::from_json("{page_size").is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(ListConfig::from_file("/nonexistent/scroll-page.json").is_err());
    }
}
