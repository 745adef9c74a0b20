//! Remote service seams
//!
//! Every external collaborator sits behind one async trait so the
//! orchestration logic can be exercised without a network. The HTTP-backed
//! implementations live in the submodules, one per provider.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::TrackerConfig;
use crate::error::{ServiceKind, UpstreamError};
use crate::models::{AirQualityReport, Coordinate, WeatherSnapshot};

pub mod gemini;
#[cfg(test)]
pub(crate) mod mock;
pub mod nominatim;
pub mod openweather;
pub mod pexels;
pub mod waqi;

pub use gemini::GeminiClient;
pub use nominatim::NominatimClient;
pub use openweather::OpenWeatherClient;
pub use pexels::PexelsClient;
pub use waqi::WaqiClient;

/// Air quality feed queried by coordinate
#[async_trait]
pub trait AirQualityService: Send + Sync {
    async fn report(&self, coordinate: Coordinate) -> Result<AirQualityReport, UpstreamError>;
}

/// Coordinate to human-readable place name
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Full comma-delimited display name, most specific segment first
    async fn display_name(&self, coordinate: Coordinate) -> Result<String, UpstreamError>;
}

/// Current weather conditions by coordinate
#[async_trait]
pub trait WeatherService: Send + Sync {
    async fn current(&self, coordinate: Coordinate) -> Result<WeatherSnapshot, UpstreamError>;
}

/// Free-text prompt in, one generated free-text block out
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError>;
}

/// Photo search by free-text query
#[async_trait]
pub trait PhotoSearch: Send + Sync {
    async fn search(&self, query: &PhotoQuery) -> Result<Vec<Photo>, UpstreamError>;
}

/// A single landscape photo search request
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoQuery {
    pub text: String,
    pub per_page: u8,
    pub locale: Option<String>,
}

impl PhotoQuery {
    #[must_use]
    pub fn landscape(text: impl Into<String>, per_page: u8) -> Self {
        Self {
            text: text.into(),
            per_page,
            locale: None,
        }
    }

    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}

/// Provider-neutral photo record
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub id: u64,
    /// Alt text, often empty
    pub alt: Option<String>,
    pub photographer: String,
    pub page_url: String,
    pub large_url: String,
    pub medium_url: String,
}

/// Shared HTTP client for all providers
pub fn http_client(config: &TrackerConfig) -> anyhow::Result<Client> {
    use anyhow::Context;

    Client::builder()
        .user_agent(config.services.user_agent.clone())
        .build()
        .with_context(|| "Failed to create HTTP client")
}

/// Send a request and decode a JSON body, mapping failures per service
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    service: ServiceKind,
    request: RequestBuilder,
) -> Result<T, UpstreamError> {
    let response = request.send().await.map_err(|e| {
        debug!("{service} request failed: {e}");
        UpstreamError::network(service, e.to_string())
    })?;

    let status = response.status();
    debug!("{service} responded with {status}");

    if !status.is_success() {
        return Err(match status.as_u16() {
            401 | 403 => UpstreamError::Unauthorized { service },
            429 => UpstreamError::RateLimited { service },
            code => UpstreamError::Status {
                service,
                status: code,
                body: response.text().await.unwrap_or_default(),
            },
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| UpstreamError::parse(service, e.to_string()))
}

/// Trim a trailing slash so paths can be appended with `format!`
pub(crate) fn base_url(url: &str) -> &str {
    url.trim_end_matches('/')
}
