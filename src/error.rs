//! Error types and handling for the pollution tracker

use std::fmt;

use thiserror::Error;

/// Remote service a request was addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    AirQuality,
    Geocoding,
    Weather,
    LanguageModel,
    PhotoSearch,
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServiceKind::AirQuality => "air quality service",
            ServiceKind::Geocoding => "reverse geocoding service",
            ServiceKind::Weather => "weather service",
            ServiceKind::LanguageModel => "language model service",
            ServiceKind::PhotoSearch => "photo search service",
        };
        f.write_str(name)
    }
}

/// Failure of a single call to a remote service
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// The request never produced a response
    #[error("{service} request failed: {message}")]
    Network { service: ServiceKind, message: String },

    #[error("{service} rejected the credentials")]
    Unauthorized { service: ServiceKind },

    #[error("{service} rate limit exceeded")]
    RateLimited { service: ServiceKind },

    /// Any other non-success HTTP status
    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        service: ServiceKind,
        status: u16,
        body: String,
    },

    /// The response body did not have the expected shape
    #[error("{service} response could not be parsed: {message}")]
    Parse { service: ServiceKind, message: String },

    /// A well-formed response that reports failure or lacks required data
    #[error("{service} returned no usable data: {message}")]
    Rejected { service: ServiceKind, message: String },
}

impl UpstreamError {
    pub fn network<S: Into<String>>(service: ServiceKind, message: S) -> Self {
        Self::Network {
            service,
            message: message.into(),
        }
    }

    pub fn parse<S: Into<String>>(service: ServiceKind, message: S) -> Self {
        Self::Parse {
            service,
            message: message.into(),
        }
    }

    pub fn rejected<S: Into<String>>(service: ServiceKind, message: S) -> Self {
        Self::Rejected {
            service,
            message: message.into(),
        }
    }

    /// The service the failed call was addressed to
    #[must_use]
    pub fn service(&self) -> ServiceKind {
        match self {
            UpstreamError::Network { service, .. }
            | UpstreamError::Unauthorized { service }
            | UpstreamError::RateLimited { service }
            | UpstreamError::Status { service, .. }
            | UpstreamError::Parse { service, .. }
            | UpstreamError::Rejected { service, .. } => *service,
        }
    }
}

/// Notice shown when a location cannot be loaded
pub const LOCATION_ERROR_NOTICE: &str =
    "Unable to fetch data for this location. Please try another location.";

/// Main error type for the pollution tracker application
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Remote service failures
    #[error("Upstream error: {source}")]
    Upstream {
        #[from]
        source: UpstreamError,
    },
}

impl TrackerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TrackerError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            TrackerError::Upstream { .. } => LOCATION_ERROR_NOTICE.to_string(),
        }
    }
}
