//! In-memory service doubles for deterministic tests
//!
//! Each mock records the calls it receives and can be told to fail. Mocks
//! that take a [`Gate`] park matching calls until the test releases them,
//! which is how superseded requests are simulated.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::{
    AirQualityService, LanguageModel, Photo, PhotoQuery, PhotoSearch, ReverseGeocoder,
    WeatherService,
};
use crate::error::{ServiceKind, UpstreamError};
use crate::models::{AirQualityReport, Coordinate, Pollutants, Reading, WeatherSnapshot};

/// Holds back calls until released
#[derive(Clone, Default)]
pub struct Gate {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl Gate {
    /// Wait until a gated call has started
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }

    async fn pass(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

#[derive(Clone)]
pub struct MockAirQuality {
    aqi: i64,
    fail: bool,
    gate: Option<(f64, Gate)>,
    calls: Arc<Mutex<Vec<Coordinate>>>,
}

impl MockAirQuality {
    pub fn new(aqi: i64) -> Self {
        Self {
            aqi,
            fail: false,
            gate: None,
            calls: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(0)
        }
    }

    /// Park calls for the given latitude on `gate`
    pub fn gated_at(mut self, latitude: f64, gate: Gate) -> Self {
        self.gate = Some((latitude, gate));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl AirQualityService for MockAirQuality {
    async fn report(&self, coordinate: Coordinate) -> Result<AirQualityReport, UpstreamError> {
        self.calls.lock().unwrap().push(coordinate);
        if let Some((latitude, gate)) = &self.gate {
            if *latitude == coordinate.latitude {
                gate.pass().await;
            }
        }
        if self.fail {
            return Err(UpstreamError::rejected(ServiceKind::AirQuality, "status error"));
        }
        Ok(AirQualityReport {
            aqi: self.aqi,
            pollutants: Pollutants::from([
                ("pm25".to_string(), self.aqi as f64),
                ("o3".to_string(), 12.5),
            ]),
            observed_at: serde_json::json!({"s": "2024-11-02 09:00:00", "tz": "+05:30"}),
        })
    }
}

/// Answers "Point <lat>, District, India"
#[derive(Clone, Default)]
pub struct MockGeocoder {
    fail: bool,
    calls: Arc<Mutex<Vec<Coordinate>>>,
}

impl MockGeocoder {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ReverseGeocoder for MockGeocoder {
    async fn display_name(&self, coordinate: Coordinate) -> Result<String, UpstreamError> {
        self.calls.lock().unwrap().push(coordinate);
        if self.fail {
            return Err(UpstreamError::network(ServiceKind::Geocoding, "connection reset"));
        }
        Ok(format!("Point {}, District, India", coordinate.latitude))
    }
}

#[derive(Clone, Default)]
pub struct MockWeather {
    fail: bool,
    calls: Arc<Mutex<Vec<Coordinate>>>,
}

impl MockWeather {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl WeatherService for MockWeather {
    async fn current(&self, coordinate: Coordinate) -> Result<WeatherSnapshot, UpstreamError> {
        self.calls.lock().unwrap().push(coordinate);
        if self.fail {
            return Err(UpstreamError::network(ServiceKind::Weather, "operation timed out"));
        }
        Ok(WeatherSnapshot {
            temperature: Reading::Available(27.0),
            feels_like: Reading::Available(29.5),
            humidity: Reading::Available(58.0),
            wind_speed: Reading::Available(2.6),
            description: Reading::Available("haze".to_string()),
        })
    }
}

#[derive(Clone)]
pub struct MockLanguageModel {
    response: Option<String>,
    gate: Option<Gate>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockLanguageModel {
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
            gate: None,
            prompts: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            gate: None,
            prompts: Arc::default(),
        }
    }

    /// Park the first call on `gate`; later calls pass straight through
    pub fn gated(mut self, gate: Gate) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        let first = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.to_string());
            prompts.len() == 1
        };
        if let (true, Some(gate)) = (first, &self.gate) {
            gate.pass().await;
        }
        self.response.clone().ok_or_else(|| UpstreamError::Status {
            service: ServiceKind::LanguageModel,
            status: 500,
            body: "internal error".to_string(),
        })
    }
}

/// Returns `per_page` photos whose alt text is produced by `alt`
#[derive(Clone)]
pub struct MockPhotoSearch {
    alt: fn(&PhotoQuery, u64) -> Option<String>,
    fail_matching: Option<&'static str>,
    queries: Arc<Mutex<Vec<PhotoQuery>>>,
}

impl MockPhotoSearch {
    /// Alt text echoes the query, so location photos mention the place
    pub fn echoing() -> Self {
        Self::with_alt(|query, index| Some(format!("{} #{index}", query.text)))
    }

    pub fn with_alt(alt: fn(&PhotoQuery, u64) -> Option<String>) -> Self {
        Self {
            alt,
            fail_matching: None,
            queries: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self::echoing().failing_on("")
    }

    /// Fail every query whose text contains `needle`
    pub fn failing_on(mut self, needle: &'static str) -> Self {
        self.fail_matching = Some(needle);
        self
    }

    pub fn queries(&self) -> Vec<PhotoQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl PhotoSearch for MockPhotoSearch {
    async fn search(&self, query: &PhotoQuery) -> Result<Vec<Photo>, UpstreamError> {
        self.queries.lock().unwrap().push(query.clone());
        if let Some(needle) = self.fail_matching {
            if query.text.contains(needle) {
                return Err(UpstreamError::Unauthorized {
                    service: ServiceKind::PhotoSearch,
                });
            }
        }
        Ok((0..u64::from(query.per_page))
            .map(|index| Photo {
                id: index + 1,
                alt: (self.alt)(query, index),
                photographer: "Asha Rao".to_string(),
                page_url: format!("https://photos.test/{}", index + 1),
                large_url: format!("https://images.test/{}/large2x.jpg", index + 1),
                medium_url: format!("https://images.test/{}/medium.jpg", index + 1),
            })
            .collect())
    }
}
