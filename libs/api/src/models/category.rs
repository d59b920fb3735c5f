//! Category payloads for the upload form and search filters

use serde::Deserialize;

use super::ResponseEnvelope;

/// One selectable asset category
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryItem {
    /// Sent as `category_id`
    #[serde(rename = "category_id")]
    pub id: i64,
    /// Sent as `category_name`
    #[serde(rename = "category_name")]
    pub name: String,
    pub icon: Option<String>,
}

/// Envelope for GET /categories
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryResponse {
    pub error: bool,
    pub categories: Vec<CategoryItem>,
}

impl ResponseEnvelope for CategoryResponse {
    fn is_error(&self) -> bool {
        self.error
    }

    fn message(&self) -> Option<&str> {
        None
    }
}
