//! World Air Quality Index feed client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{info, instrument};

use super::{AirQualityService, base_url, fetch_json};
use crate::config::TrackerConfig;
use crate::error::{ServiceKind, UpstreamError};
use crate::models::{AirQualityReport, Coordinate, Pollutants};

const SERVICE: ServiceKind = ServiceKind::AirQuality;

pub struct WaqiClient {
    client: Client,
    token: String,
    base_url: String,
}

impl WaqiClient {
    pub fn new(client: Client, config: &TrackerConfig) -> Self {
        Self {
            client,
            token: config.credentials.air_quality_token.clone(),
            base_url: base_url(&config.services.air_quality_url).to_string(),
        }
    }
}

#[async_trait]
impl AirQualityService for WaqiClient {
    #[instrument(skip(self), fields(lat = coordinate.latitude, lon = coordinate.longitude))]
    async fn report(&self, coordinate: Coordinate) -> Result<AirQualityReport, UpstreamError> {
        let url = format!(
            "{}/feed/geo:{};{}/?token={}",
            self.base_url,
            coordinate.latitude,
            coordinate.longitude,
            urlencoding::encode(&self.token)
        );

        let feed: response::Feed = fetch_json(SERVICE, self.client.get(url)).await?;
        let report = feed.into_report()?;

        info!("Air quality index {} at {}", report.aqi, coordinate.format_coordinates());
        Ok(report)
    }
}

/// WAQI response structures
mod response {
    use super::*;

    /// On failure `data` carries an error message instead of a reading
    #[derive(Debug, Deserialize)]
    pub struct Feed {
        pub status: String,
        pub data: serde_json::Value,
    }

    #[derive(Debug, Deserialize)]
    pub struct FeedData {
        pub aqi: i64,
        #[serde(default)]
        pub iaqi: HashMap<String, Measurement>,
        #[serde(default)]
        pub time: serde_json::Value,
    }

    #[derive(Debug, Deserialize)]
    pub struct Measurement {
        pub v: f64,
    }

    impl Feed {
        pub fn into_report(self) -> Result<AirQualityReport, UpstreamError> {
            if self.status != "ok" {
                let reason = self
                    .data
                    .as_str()
                    .map_or_else(|| format!("status {}", self.status), str::to_string);
                return Err(UpstreamError::rejected(SERVICE, reason));
            }

            let data: FeedData = serde_json::from_value(self.data)
                .map_err(|e| UpstreamError::parse(SERVICE, e.to_string()))?;

            let pollutants: Pollutants = data
                .iaqi
                .into_iter()
                .map(|(code, measurement)| (code, measurement.v))
                .collect();

            Ok(AirQualityReport {
                aqi: data.aqi,
                pollutants,
                observed_at: data.time,
            })
        }
    }
}
