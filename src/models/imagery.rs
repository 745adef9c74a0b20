//! Illustrative photographs shown next to a location

use serde::{Deserialize, Serialize};

/// Which query produced an image
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImageCategory {
    Location,
    Weather,
    Severity,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ImageResult {
    pub id: u64,
    pub description: String,
    pub photographer_name: String,
    /// Large rendition for the carousel
    pub display_url: String,
    pub thumbnail_url: String,
    /// Photo page on the provider's site, for attribution
    pub source_page_url: String,
    pub category: ImageCategory,
}
