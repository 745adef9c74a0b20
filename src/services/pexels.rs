//! Pexels photo search client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{Photo, PhotoQuery, PhotoSearch, base_url, fetch_json};
use crate::config::TrackerConfig;
use crate::error::{ServiceKind, UpstreamError};

const SERVICE: ServiceKind = ServiceKind::PhotoSearch;

pub struct PexelsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<PexelsPhoto>,
}

#[derive(Debug, Deserialize)]
struct PexelsPhoto {
    id: u64,
    alt: Option<String>,
    #[serde(default)]
    photographer: String,
    url: String,
    src: PhotoSources,
}

#[derive(Debug, Deserialize)]
struct PhotoSources {
    large2x: String,
    medium: String,
}

impl From<PexelsPhoto> for Photo {
    fn from(photo: PexelsPhoto) -> Self {
        Photo {
            id: photo.id,
            alt: photo.alt.filter(|alt| !alt.trim().is_empty()),
            photographer: photo.photographer,
            page_url: photo.url,
            large_url: photo.src.large2x,
            medium_url: photo.src.medium,
        }
    }
}

impl PexelsClient {
    pub fn new(client: Client, config: &TrackerConfig) -> Self {
        Self {
            client,
            api_key: config.credentials.photo_search_key.clone(),
            base_url: base_url(&config.services.photo_search_url).to_string(),
        }
    }

    fn search_url(&self, query: &PhotoQuery) -> String {
        let mut url = format!(
            "{}/search?query={}&per_page={}&orientation=landscape",
            self.base_url,
            urlencoding::encode(&query.text),
            query.per_page
        );
        if let Some(locale) = &query.locale {
            url.push_str("&locale=");
            url.push_str(&urlencoding::encode(locale));
        }
        url
    }
}

#[async_trait]
impl PhotoSearch for PexelsClient {
    #[instrument(skip(self, query), fields(query = %query.text, per_page = query.per_page))]
    async fn search(&self, query: &PhotoQuery) -> Result<Vec<Photo>, UpstreamError> {
        let request = self
            .client
            .get(self.search_url(query))
            .header("Authorization", &self.api_key);

        let response: SearchResponse = fetch_json(SERVICE, request).await?;
        debug!("Photo search returned {} results", response.photos.len());

        Ok(response.photos.into_iter().map(Photo::from).collect())
    }
}
