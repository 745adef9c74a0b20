//! Nominatim reverse geocoding client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{ReverseGeocoder, base_url, fetch_json};
use crate::config::TrackerConfig;
use crate::error::{ServiceKind, UpstreamError};
use crate::models::Coordinate;

const SERVICE: ServiceKind = ServiceKind::Geocoding;

pub struct NominatimClient {
    client: Client,
    base_url: String,
}

/// Reverse geocoding response; `error` is set for points without an address
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
    error: Option<String>,
}

impl NominatimClient {
    pub fn new(client: Client, config: &TrackerConfig) -> Self {
        Self {
            client,
            base_url: base_url(&config.services.geocoding_url).to_string(),
        }
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimClient {
    #[instrument(skip(self), fields(lat = coordinate.latitude, lon = coordinate.longitude))]
    async fn display_name(&self, coordinate: Coordinate) -> Result<String, UpstreamError> {
        let url = format!(
            "{}/reverse?format=json&lat={}&lon={}",
            self.base_url, coordinate.latitude, coordinate.longitude
        );

        let response: ReverseResponse = fetch_json(SERVICE, self.client.get(url)).await?;

        match response {
            ReverseResponse {
                display_name: Some(name),
                ..
            } => {
                debug!("Reverse geocoded to '{}'", name);
                Ok(name)
            }
            ReverseResponse {
                error: Some(reason),
                ..
            } => Err(UpstreamError::rejected(SERVICE, reason)),
            _ => Err(UpstreamError::rejected(SERVICE, "no display name in response")),
        }
    }
}
