use serde::{Deserialize, Serialize};

/// One product row of the static catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique product identifier
    #[serde(rename = "productId")]
    pub id: String,

    /// Product display name
    #[serde(rename = "productName")]
    pub name: String,

    /// Unit price
    pub price: f64,

    /// Purchase date, display-only
    #[serde(rename = "boughtDate")]
    pub date: String,
}

impl Record {
    /// Create a new record instance
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            date: date.into(),
        }
    }
}
