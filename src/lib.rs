//! Pollution Tracker - air quality and weather map dashboard
//!
//! A map click turns into an air quality reading, a place name and current
//! weather, enriched with generated recommendations and illustrative photos.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod imagery;
pub mod logging;
pub mod models;
pub mod narrative;
pub mod orchestrator;
pub mod recommendations;
pub mod services;
pub mod severity;
pub mod web;

// Re-export core types for public API
pub use config::TrackerConfig;
pub use dashboard::{Dashboard, DashboardSnapshot, Selection};
pub use error::{ServiceKind, TrackerError, UpstreamError};
pub use imagery::ImageryFetcher;
pub use models::{Coordinate, ImageResult, LocationRecord, RecommendationLine, WeatherSnapshot};
pub use narrative::NarrativeFetcher;
pub use orchestrator::LocationDataOrchestrator;
pub use recommendations::format_recommendations;
pub use severity::{ImageTheme, Severity};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
