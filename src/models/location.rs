//! Location model for clicked coordinates and the assembled location record

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::WeatherSnapshot;

/// Pollutant code (e.g. `pm25`) to its latest reading
pub type Pollutants = BTreeMap<String, f64>;

/// Point clicked on the map
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    #[serde(alias = "lat")]
    pub latitude: f64,
    /// Longitude in decimal degrees
    #[serde(alias = "lng", alias = "lon")]
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Air quality reading for one coordinate
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AirQualityReport {
    pub aqi: i64,
    pub pollutants: Pollutants,
    /// Observation time exactly as reported by the feed
    pub observed_at: serde_json::Value,
}

/// Everything known about a clicked location
///
/// A record only exists once both the air quality feed and the reverse
/// geocoder have answered; weather degrades field by field instead.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LocationRecord {
    /// Most specific segment of the reverse-geocoded display name
    pub name: String,
    pub coordinate: Coordinate,
    pub aqi: i64,
    pub pollutants: Pollutants,
    pub observed_at: serde_json::Value,
    pub weather: WeatherSnapshot,
}

impl LocationRecord {
    /// Assemble a record from the individual service answers
    #[must_use]
    pub fn assemble(
        name: String,
        coordinate: Coordinate,
        report: AirQualityReport,
        weather: WeatherSnapshot,
    ) -> Self {
        Self {
            name,
            coordinate,
            aqi: report.aqi,
            pollutants: report.pollutants,
            observed_at: report.observed_at,
            weather,
        }
    }

    /// The score as the floating point value the classifiers take
    #[must_use]
    pub fn score(&self) -> f64 {
        self.aqi as f64
    }
}

/// Take the most specific part of a comma-delimited display name
#[must_use]
pub fn place_name(display_name: &str) -> &str {
    display_name.split(',').next().unwrap_or_default().trim()
}
