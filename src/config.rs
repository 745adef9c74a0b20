//! Configuration management for the pollution tracker
//!
//! Handles loading configuration from files and environment variables,
//! and validates the settings before any client is built from them.

use crate::TrackerError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "TRACKER_CONFIG";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Access credentials for the remote services
    #[serde(default)]
    pub credentials: Credentials,
    /// Remote service endpoints
    #[serde(default)]
    pub services: ServiceEndpoints,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Map widget settings handed to the browser
    #[serde(default)]
    pub map: MapConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Static credential strings passed to each remote service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub air_quality_token: String,
    #[serde(default)]
    pub weather_key: String,
    #[serde(default)]
    pub language_model_key: String,
    #[serde(default)]
    pub photo_search_key: String,
}

/// Base URLs of the remote services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceEndpoints {
    #[serde(default = "default_air_quality_url")]
    pub air_quality_url: String,
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    #[serde(default = "default_weather_url")]
    pub weather_url: String,
    #[serde(default = "default_language_model_url")]
    pub language_model_url: String,
    /// Model name used for narrative generation
    #[serde(default = "default_language_model")]
    pub language_model: String,
    #[serde(default = "default_photo_search_url")]
    pub photo_search_url: String,
    /// User agent sent with every request (required by the geocoder's usage policy)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory of the built map frontend
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

/// Map widget settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_center_latitude")]
    pub center_latitude: f64,
    #[serde(default = "default_center_longitude")]
    pub center_longitude: f64,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    #[serde(default = "default_min_zoom")]
    pub min_zoom: u8,
    /// South-west corner of the pannable area as `[latitude, longitude]`
    #[serde(default = "default_south_west")]
    pub south_west: [f64; 2],
    /// North-east corner of the pannable area as `[latitude, longitude]`
    #[serde(default = "default_north_east")]
    pub north_east: [f64; 2],
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_air_quality_url() -> String {
    "https://api.waqi.info".to_string()
}

fn default_geocoding_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_weather_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_language_model_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_language_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_photo_search_url() -> String {
    "https://api.pexels.com/v1".to_string()
}

fn default_user_agent() -> String {
    format!("PollutionTracker/{}", crate::VERSION)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "frontend/dist".to_string()
}

fn default_center_latitude() -> f64 {
    23.5937
}

fn default_center_longitude() -> f64 {
    78.9629
}

fn default_zoom() -> u8 {
    5
}

fn default_min_zoom() -> u8 {
    4
}

fn default_south_west() -> [f64; 2] {
    [8.4, 68.7]
}

fn default_north_east() -> [f64; 2] {
    [37.6, 97.25]
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self {
            air_quality_url: default_air_quality_url(),
            geocoding_url: default_geocoding_url(),
            weather_url: default_weather_url(),
            language_model_url: default_language_model_url(),
            language_model: default_language_model(),
            photo_search_url: default_photo_search_url(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_latitude: default_center_latitude(),
            center_longitude: default_center_longitude(),
            zoom: default_zoom(),
            min_zoom: default_min_zoom(),
            south_west: default_south_west(),
            north_east: default_north_east(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl TrackerConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        let explicit = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::load_from_path(explicit)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // e.g. TRACKER_CREDENTIALS__AIR_QUALITY_TOKEN
        builder = builder.add_source(
            Environment::with_prefix("TRACKER")
                .prefix_separator("_")
                .separator("__"),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TrackerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pollution-tracker").join("config.toml"))
    }

    /// Apply default values to fields that were set but left empty
    pub fn apply_defaults(&mut self) {
        let services = &mut self.services;
        if services.air_quality_url.is_empty() {
            services.air_quality_url = default_air_quality_url();
        }
        if services.geocoding_url.is_empty() {
            services.geocoding_url = default_geocoding_url();
        }
        if services.weather_url.is_empty() {
            services.weather_url = default_weather_url();
        }
        if services.language_model_url.is_empty() {
            services.language_model_url = default_language_model_url();
        }
        if services.language_model.is_empty() {
            services.language_model = default_language_model();
        }
        if services.photo_search_url.is_empty() {
            services.photo_search_url = default_photo_search_url();
        }
        if services.user_agent.is_empty() {
            services.user_agent = default_user_agent();
        }
        if self.server.static_dir.is_empty() {
            self.server.static_dir = default_static_dir();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_credentials()?;
        self.validate_endpoints()?;
        self.validate_map()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate credentials
    ///
    /// Only the air quality token is mandatory: without it no location can be
    /// shown at all. The remaining services degrade softly.
    pub fn validate_credentials(&self) -> Result<()> {
        if self.credentials.air_quality_token.trim().is_empty() {
            return Err(TrackerError::config(
                "Air quality token is required. Set credentials.air_quality_token or TRACKER_CREDENTIALS__AIR_QUALITY_TOKEN.",
            )
            .into());
        }

        let optional = [
            ("weather_key", &self.credentials.weather_key),
            ("language_model_key", &self.credentials.language_model_key),
            ("photo_search_key", &self.credentials.photo_search_key),
        ];
        for (name, value) in optional {
            if value.trim().is_empty() {
                tracing::warn!("credentials.{name} is not set, the related panel will fall back to defaults");
            }
        }

        Ok(())
    }

    fn validate_endpoints(&self) -> Result<()> {
        let endpoints = [
            ("air_quality_url", &self.services.air_quality_url),
            ("geocoding_url", &self.services.geocoding_url),
            ("weather_url", &self.services.weather_url),
            ("language_model_url", &self.services.language_model_url),
            ("photo_search_url", &self.services.photo_search_url),
        ];

        for (name, url) in endpoints {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TrackerError::config(format!(
                    "services.{name} must be a valid HTTP or HTTPS URL, got '{url}'"
                ))
                .into());
            }
        }

        Ok(())
    }

    fn validate_map(&self) -> Result<()> {
        if self.map.zoom > 20 {
            return Err(TrackerError::config("Map zoom cannot exceed 20").into());
        }

        if self.map.min_zoom > self.map.zoom {
            return Err(TrackerError::config("Map min_zoom cannot exceed zoom").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TrackerError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TrackerError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn configured() -> TrackerConfig {
        let mut config = TrackerConfig::default();
        config.credentials.air_quality_token = "demo-token".to_string();
        config
    }

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();
        assert_eq!(config.services.air_quality_url, "https://api.waqi.info");
        assert_eq!(config.services.language_model, "gemini-1.5-flash");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.map.zoom, 5);
        assert_eq!(config.map.south_west, [8.4, 68.7]);
        assert_eq!(config.logging.level, "info");
        assert!(config.credentials.air_quality_token.is_empty());
    }

    #[test]
    fn test_config_validation_missing_air_quality_token() {
        let config = TrackerConfig::default();
        let result = config.validate_credentials();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Air quality token is required")
        );
    }

    #[test]
    fn test_config_validation_optional_keys() {
        let config = configured();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = configured();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_bad_endpoint() {
        let mut config = configured();
        config.services.photo_search_url = "ftp://photos".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("photo_search_url"));
    }

    #[test]
    fn test_config_validation_zoom_range() {
        let mut config = configured();
        config.map.min_zoom = 7;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("min_zoom"));
    }

    #[test]
    fn test_apply_defaults_fills_empty_values() {
        let mut config = configured();
        config.services.weather_url.clear();
        config.logging.format.clear();
        config.apply_defaults();
        assert_eq!(config.services.weather_url, "https://api.openweathermap.org/data/2.5");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!(
            "pollution-tracker-config-{}.toml",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[credentials]\nair_quality_token = \"file-token\"\n\n[server]\nport = 8081\n\n[map]\nzoom = 6"
        )
        .unwrap();

        let config = TrackerConfig::load_from_path(Some(path.clone()));
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.credentials.air_quality_token, "file-token");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.map.zoom, 6);
        assert_eq!(config.map.min_zoom, 4);
        assert_eq!(config.services.geocoding_url, "https://nominatim.openstreetmap.org");
    }

    #[test]
    fn test_config_path_generation() {
        let path = TrackerConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("pollution-tracker"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
