//! Location data orchestration
//!
//! Turns a clicked coordinate into a [`LocationRecord`] by querying the air
//! quality feed, the reverse geocoder and the weather service one after the
//! other. The first two are required; weather is best effort.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::error::{ServiceKind, UpstreamError};
use crate::models::location::place_name;
use crate::models::{Coordinate, LocationRecord, WeatherSnapshot};
use crate::services::{AirQualityService, ReverseGeocoder, WeatherService};

pub struct LocationDataOrchestrator {
    air_quality: Arc<dyn AirQualityService>,
    geocoder: Arc<dyn ReverseGeocoder>,
    weather: Arc<dyn WeatherService>,
}

impl LocationDataOrchestrator {
    pub fn new(
        air_quality: Arc<dyn AirQualityService>,
        geocoder: Arc<dyn ReverseGeocoder>,
        weather: Arc<dyn WeatherService>,
    ) -> Self {
        Self {
            air_quality,
            geocoder,
            weather,
        }
    }

    /// Fetch and assemble everything shown for a coordinate
    ///
    /// Fails if the air quality feed or the geocoder fails. A weather failure
    /// only marks the weather fields unavailable.
    #[instrument(skip(self), fields(lat = coordinate.latitude, lon = coordinate.longitude))]
    pub async fn fetch_location_data(
        &self,
        coordinate: Coordinate,
    ) -> Result<LocationRecord, UpstreamError> {
        let report = self.air_quality.report(coordinate).await?;

        let display_name = self.geocoder.display_name(coordinate).await?;
        let name = place_name(&display_name);
        if name.is_empty() {
            return Err(UpstreamError::rejected(
                ServiceKind::Geocoding,
                format!("no place name in '{display_name}'"),
            ));
        }
        let name = name.to_string();

        let weather = match self.weather.current(coordinate).await {
            Ok(weather) => weather,
            Err(e) => {
                warn!("Weather data unavailable for {}: {}", name, e);
                WeatherSnapshot::unavailable()
            }
        };

        info!(
            "Assembled location data for {} (AQI {}, {}, wind {})",
            name,
            report.aqi,
            weather.format_temperature(),
            weather.format_wind()
        );
        Ok(LocationRecord::assemble(name, coordinate, report, weather))
    }
}
