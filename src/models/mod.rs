//! Data models for the pollution tracker
//!
//! This module contains the domain models organized by concern:
//! - Location: coordinates and the assembled per-click record
//! - Weather: current conditions with per-field availability
//! - Imagery: illustrative photographs and their category
//! - Recommendation: display lines of the generated narrative

pub mod imagery;
pub mod location;
pub mod recommendation;
pub mod weather;

// Re-export all public types for convenient access
pub use imagery::{ImageCategory, ImageResult};
pub use location::{AirQualityReport, Coordinate, LocationRecord, Pollutants};
pub use recommendation::RecommendationLine;
pub use weather::{Reading, WeatherSnapshot};
