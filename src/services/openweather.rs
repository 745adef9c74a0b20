//! OpenWeatherMap current conditions client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{WeatherService, base_url, fetch_json};
use crate::config::TrackerConfig;
use crate::error::{ServiceKind, UpstreamError};
use crate::models::{Coordinate, Reading, WeatherSnapshot};

const SERVICE: ServiceKind = ServiceKind::Weather;

pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(client: Client, config: &TrackerConfig) -> Self {
        Self {
            client,
            api_key: config.credentials.weather_key.clone(),
            base_url: base_url(&config.services.weather_url).to_string(),
        }
    }
}

#[async_trait]
impl WeatherService for OpenWeatherClient {
    #[instrument(skip(self), fields(lat = coordinate.latitude, lon = coordinate.longitude))]
    async fn current(&self, coordinate: Coordinate) -> Result<WeatherSnapshot, UpstreamError> {
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            self.base_url,
            coordinate.latitude,
            coordinate.longitude,
            urlencoding::encode(&self.api_key)
        );

        let body: response::CurrentWeatherResponse =
            fetch_json(SERVICE, self.client.get(url)).await?;
        let snapshot = WeatherSnapshot::from(body);

        debug!("Current weather: {}", snapshot.description);
        Ok(snapshot)
    }
}

/// OpenWeatherMap response structures; every field may be absent
mod response {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    pub struct CurrentWeatherResponse {
        #[serde(default)]
        pub main: Option<MainBlock>,
        #[serde(default)]
        pub wind: Option<WindBlock>,
        #[serde(default)]
        pub weather: Vec<Condition>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct MainBlock {
        pub temp: Option<f64>,
        pub feels_like: Option<f64>,
        pub humidity: Option<f64>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct WindBlock {
        pub speed: Option<f64>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Condition {
        pub description: Option<String>,
    }

    impl From<CurrentWeatherResponse> for WeatherSnapshot {
        fn from(response: CurrentWeatherResponse) -> Self {
            let main = response.main.unwrap_or_default();
            let description = response
                .weather
                .into_iter()
                .next()
                .and_then(|condition| condition.description);

            WeatherSnapshot {
                temperature: Reading::from(main.temp),
                feels_like: Reading::from(main.feels_like),
                humidity: Reading::from(main.humidity),
                wind_speed: Reading::from(response.wind.and_then(|wind| wind.speed)),
                description: Reading::from(description),
            }
        }
    }
}
