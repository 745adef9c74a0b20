//! Display state of the map dashboard
//!
//! The dashboard owns everything the browser renders: the selected location,
//! loading flags, the recommendations and images panels, and the dismissible
//! error notice. Every selection bumps a request generation; location data
//! that arrives for an older generation is dropped. Enrichment results are
//! matched against the generation of the record on screen, so a failed click
//! does not strand the panels of the record it left in place.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use crate::config::TrackerConfig;
use crate::error::{LOCATION_ERROR_NOTICE, UpstreamError};
use crate::imagery::ImageryFetcher;
use crate::models::{Coordinate, ImageResult, LocationRecord, RecommendationLine};
use crate::narrative::{NarrativeFetcher, fallback_recommendations};
use crate::orchestrator::LocationDataOrchestrator;
use crate::services::{
    GeminiClient, NominatimClient, OpenWeatherClient, PexelsClient, WaqiClient, http_client,
};
use crate::severity::{Severity, SeverityView};

#[derive(Debug, Clone, Default)]
struct DashboardState {
    generation: u64,
    /// Generation of the selection that produced `record`
    record_generation: u64,
    loading: bool,
    loading_recommendations: bool,
    loading_images: bool,
    record: Option<LocationRecord>,
    recommendations: Vec<RecommendationLine>,
    images: Vec<ImageResult>,
    error: Option<String>,
    updated_at: Option<DateTime<Utc>>,
}

/// Serializable copy of the display state
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub generation: u64,
    pub loading: bool,
    pub loading_recommendations: bool,
    pub loading_images: bool,
    pub record: Option<LocationRecord>,
    pub severity: Option<SeverityView>,
    pub recommendations: Vec<RecommendationLine>,
    pub images: Vec<ImageResult>,
    pub error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&DashboardState> for DashboardSnapshot {
    fn from(state: &DashboardState) -> Self {
        Self {
            generation: state.generation,
            loading: state.loading,
            loading_recommendations: state.loading_recommendations,
            loading_images: state.loading_images,
            record: state.record.clone(),
            severity: state
                .record
                .as_ref()
                .map(|record| SeverityView::from(Severity::classify(record.score()))),
            recommendations: state.recommendations.clone(),
            images: state.images.clone(),
            error: state.error.clone(),
            updated_at: state.updated_at,
        }
    }
}

/// Outcome of a map click
#[derive(Debug)]
pub enum Selection {
    /// The record is on screen and enrichment is running
    Applied {
        record: LocationRecord,
        enrichment: Enrichment,
    },
    /// A newer click started before this one finished
    Superseded,
}

/// Background narrative and imagery tasks of one selection
#[derive(Debug)]
pub struct Enrichment {
    recommendations: JoinHandle<()>,
    images: JoinHandle<()>,
}

impl Enrichment {
    /// Wait for both panels to settle
    pub async fn wait(self) {
        if let Err(e) = self.recommendations.await {
            error!("Recommendations task failed: {}", e);
        }
        if let Err(e) = self.images.await {
            error!("Images task failed: {}", e);
        }
    }
}

#[derive(Clone)]
pub struct Dashboard {
    state: Arc<RwLock<DashboardState>>,
    orchestrator: Arc<LocationDataOrchestrator>,
    narrative: Arc<NarrativeFetcher>,
    imagery: Arc<ImageryFetcher>,
}

impl Dashboard {
    pub fn new(
        orchestrator: LocationDataOrchestrator,
        narrative: NarrativeFetcher,
        imagery: ImageryFetcher,
    ) -> Self {
        Self {
            state: Arc::default(),
            orchestrator: Arc::new(orchestrator),
            narrative: Arc::new(narrative),
            imagery: Arc::new(imagery),
        }
    }

    /// Wire the HTTP-backed services described by the configuration
    pub fn from_config(config: &TrackerConfig) -> anyhow::Result<Self> {
        let client = http_client(config)?;

        let orchestrator = LocationDataOrchestrator::new(
            Arc::new(WaqiClient::new(client.clone(), config)),
            Arc::new(NominatimClient::new(client.clone(), config)),
            Arc::new(OpenWeatherClient::new(client.clone(), config)),
        );
        let narrative = NarrativeFetcher::new(Arc::new(GeminiClient::new(client.clone(), config)));
        let imagery = ImageryFetcher::new(Arc::new(PexelsClient::new(client, config)));

        Ok(Self::new(orchestrator, narrative, imagery))
    }

    /// Handle a click on the map
    ///
    /// Returns the upstream error on a hard failure after posting the error
    /// notice; the previously shown record stays in place.
    #[instrument(skip(self), fields(lat = coordinate.latitude, lon = coordinate.longitude))]
    pub async fn select_location(
        &self,
        coordinate: Coordinate,
    ) -> Result<Selection, UpstreamError> {
        let generation = {
            let mut state = self.state.write().await;
            state.generation += 1;
            state.loading = true;
            state.error = None;
            state.generation
        };

        let outcome = self.orchestrator.fetch_location_data(coordinate).await;

        let mut state = self.state.write().await;
        if state.generation != generation {
            debug!(
                generation,
                current = state.generation,
                "Discarding superseded location data"
            );
            return Ok(Selection::Superseded);
        }
        state.loading = false;
        state.updated_at = Some(Utc::now());

        match outcome {
            Ok(record) => {
                info!("Showing {} (AQI {})", record.name, record.aqi);
                state.record = Some(record.clone());
                state.record_generation = generation;
                state.recommendations.clear();
                state.images.clear();
                state.loading_recommendations = true;
                state.loading_images = true;
                drop(state);

                let enrichment = self.spawn_enrichment(generation, &record);
                Ok(Selection::Applied { record, enrichment })
            }
            Err(e) => {
                error!("Error fetching location data: {}", e);
                state.error = Some(LOCATION_ERROR_NOTICE.to_string());
                Err(e)
            }
        }
    }

    fn spawn_enrichment(&self, generation: u64, record: &LocationRecord) -> Enrichment {
        let recommendations = {
            let dashboard = self.clone();
            let record = record.clone();
            tokio::spawn(async move {
                let lines = dashboard
                    .narrative
                    .fetch_narrative(&record)
                    .await
                    .unwrap_or_else(|e| {
                        warn!("Error fetching environmental solutions: {}", e);
                        fallback_recommendations()
                    });

                let mut state = dashboard.state.write().await;
                if state.record_generation == generation {
                    state.recommendations = lines;
                    state.loading_recommendations = false;
                } else {
                    debug!(generation, "Discarding superseded recommendations");
                }
            })
        };

        let images = {
            let dashboard = self.clone();
            let name = record.name.clone();
            let score = record.score();
            tokio::spawn(async move {
                let images = dashboard
                    .imagery
                    .fetch_images(&name, score)
                    .await
                    .unwrap_or_else(|e| {
                        warn!("Error fetching location images: {}", e);
                        Vec::new()
                    });

                let mut state = dashboard.state.write().await;
                if state.record_generation == generation {
                    state.images = images;
                    state.loading_images = false;
                } else {
                    debug!(generation, "Discarding superseded images");
                }
            })
        };

        Enrichment {
            recommendations,
            images,
        }
    }

    /// Current display state
    pub async fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot::from(&*self.state.read().await)
    }

    /// Close the error notice
    pub async fn dismiss_error(&self) {
        self.state.write().await.error = None;
    }
}
