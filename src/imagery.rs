//! Illustrative photographs for a location
//!
//! Three searches run side by side: landmarks of the place, its weather, and
//! a theme matching the current air quality. Landmark results are kept only
//! when their caption mentions the place or the country; photos without alt
//! text are captioned "{name} - Location View" and therefore kept.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::error::UpstreamError;
use crate::models::{ImageCategory, ImageResult};
use crate::services::{Photo, PhotoQuery, PhotoSearch};
use crate::severity::ImageTheme;

const COUNTRY: &str = "india";
const LOCATION_RESULTS: u8 = 3;
const WEATHER_RESULTS: u8 = 2;
const SEVERITY_RESULTS: u8 = 2;

pub struct ImageryFetcher {
    photos: Arc<dyn PhotoSearch>,
}

impl ImageryFetcher {
    pub fn new(photos: Arc<dyn PhotoSearch>) -> Self {
        Self { photos }
    }

    /// Search photos for a place; fails if any of the three searches fails
    #[instrument(skip(self))]
    pub async fn fetch_images(
        &self,
        name: &str,
        score: f64,
    ) -> Result<Vec<ImageResult>, UpstreamError> {
        let theme = ImageTheme::for_score(score);

        let location_query =
            PhotoQuery::landscape(format!("{name} {COUNTRY} landmark"), LOCATION_RESULTS)
                .with_locale("en-IN");
        let weather_query =
            PhotoQuery::landscape(format!("{name} weather {COUNTRY}"), WEATHER_RESULTS);
        let severity_query = PhotoQuery::landscape(theme.keywords(), SEVERITY_RESULTS);

        let (landmarks, weather, severity) = futures::try_join!(
            self.photos.search(&location_query),
            self.photos.search(&weather_query),
            self.photos.search(&severity_query)
        )?;

        let name_lower = name.to_lowercase();
        let mut images: Vec<ImageResult> = landmarks
            .into_iter()
            .map(|photo| {
                let caption = format!("{name} - {}", alt_or(&photo, "Location View"));
                to_image(photo, caption, ImageCategory::Location)
            })
            .filter(|image| mentions_place(&image.description, &name_lower))
            .collect();

        images.extend(weather.into_iter().map(|photo| {
            let caption = format!("{name} Weather - {}", alt_or(&photo, "Current Weather"));
            to_image(photo, caption, ImageCategory::Weather)
        }));

        images.extend(severity.into_iter().map(|photo| {
            let caption = format!("Air Quality Impact - {}", alt_or(&photo, theme.description()));
            to_image(photo, caption, ImageCategory::Severity)
        }));

        info!("Collected {} images for {}", images.len(), name);
        Ok(images)
    }
}

fn mentions_place(caption: &str, name_lower: &str) -> bool {
    let caption = caption.to_lowercase();
    caption.contains(name_lower) || caption.contains(COUNTRY)
}

fn alt_or<'a>(photo: &'a Photo, default: &'a str) -> &'a str {
    photo.alt.as_deref().unwrap_or(default)
}

fn to_image(photo: Photo, description: String, category: ImageCategory) -> ImageResult {
    ImageResult {
        id: photo.id,
        description,
        photographer_name: photo.photographer,
        display_url: photo.large_url,
        thumbnail_url: photo.medium_url,
        source_page_url: photo.page_url,
        category,
    }
}
