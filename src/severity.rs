//! Air quality severity bands
//!
//! Two independent lookup tables live here: [`Severity`] drives everything
//! displayed to the user (colors, status labels, the narrative prompt), and
//! [`ImageTheme`] biases the photo search. Their band edges differ
//! (30/60/90/120/250 against 50/100/150/200/300).

use serde::{Deserialize, Serialize};

/// Severity band of an air quality score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Good,
    Satisfactory,
    Moderate,
    Poor,
    VeryPoor,
    Severe,
}

impl Severity {
    /// Classify a score; upper band edges are inclusive
    #[must_use]
    pub fn classify(score: f64) -> Self {
        if score <= 30.0 {
            Severity::Good
        } else if score <= 60.0 {
            Severity::Satisfactory
        } else if score <= 90.0 {
            Severity::Moderate
        } else if score <= 120.0 {
            Severity::Poor
        } else if score <= 250.0 {
            Severity::VeryPoor
        } else {
            Severity::Severe
        }
    }

    #[must_use]
    pub fn status(self) -> &'static str {
        match self {
            Severity::Good => "Good",
            Severity::Satisfactory => "Satisfactory",
            Severity::Moderate => "Moderate",
            Severity::Poor => "Poor",
            Severity::VeryPoor => "Very Poor",
            Severity::Severe => "Severe",
        }
    }

    /// Hex color of the band
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Severity::Good => "#00FF00",
            Severity::Satisfactory => "#90EE90",
            Severity::Moderate => "#FFFF00",
            Severity::Poor => "#FFA500",
            Severity::VeryPoor => "#FF0000",
            Severity::Severe => "#800000",
        }
    }

    /// Text color readable on top of [`Severity::color`]
    #[must_use]
    pub fn text_color(self) -> &'static str {
        if self > Severity::Satisfactory {
            "white"
        } else {
            "black"
        }
    }
}

/// Severity summary as rendered next to a location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeverityView {
    pub level: Severity,
    pub status: &'static str,
    pub color: &'static str,
    pub text_color: &'static str,
}

impl From<Severity> for SeverityView {
    fn from(level: Severity) -> Self {
        Self {
            level,
            status: level.status(),
            color: level.color(),
            text_color: level.text_color(),
        }
    }
}

/// Photo search theme for an air quality score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTheme {
    Clean,
    Moderate,
    Protection,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl ImageTheme {
    #[must_use]
    pub fn for_score(score: f64) -> Self {
        if score <= 50.0 {
            ImageTheme::Clean
        } else if score <= 100.0 {
            ImageTheme::Moderate
        } else if score <= 150.0 {
            ImageTheme::Protection
        } else if score <= 200.0 {
            ImageTheme::Unhealthy
        } else if score <= 300.0 {
            ImageTheme::VeryUnhealthy
        } else {
            ImageTheme::Hazardous
        }
    }

    /// Search keywords for the photo service
    #[must_use]
    pub fn keywords(self) -> &'static str {
        match self {
            ImageTheme::Clean => "clean air blue sky fresh environment india",
            ImageTheme::Moderate => "moderate air quality city environment india",
            ImageTheme::Protection => "air pollution smog mask protection india",
            ImageTheme::Unhealthy => "heavy pollution smog air mask india",
            ImageTheme::VeryUnhealthy => "severe air pollution smog protection india",
            ImageTheme::Hazardous => "hazardous air pollution emergency mask india",
        }
    }

    /// Caption used when a photo comes without alt text
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            ImageTheme::Clean => "Clean Air and Clear Skies",
            ImageTheme::Moderate => "Moderate Air Quality",
            ImageTheme::Protection => "Unhealthy Air Quality - Protection Needed",
            ImageTheme::Unhealthy => "Unhealthy Air Conditions",
            ImageTheme::VeryUnhealthy => "Very Unhealthy Air Quality",
            ImageTheme::Hazardous => "Hazardous Air Quality Conditions",
        }
    }
}
