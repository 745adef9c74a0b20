//! Weather model with per-field availability

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const UNAVAILABLE: &str = "unavailable";

/// A single weather value that may be missing
#[derive(Debug, Clone, PartialEq)]
pub enum Reading<T> {
    Available(T),
    Unavailable,
}

impl<T> Reading<T> {
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Reading::Available(_))
    }
}

impl<T> From<Option<T>> for Reading<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Reading::Unavailable, Reading::Available)
    }
}

impl<T: fmt::Display> fmt::Display for Reading<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Available(value) => value.fmt(f),
            Reading::Unavailable => f.write_str("N/A"),
        }
    }
}

// Serialized as the bare value, or the string "unavailable".
impl<T: Serialize> Serialize for Reading<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Reading::Available(value) => value.serialize(serializer),
            Reading::Unavailable => serializer.serialize_str(UNAVAILABLE),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Reading<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        if raw.as_str() == Some(UNAVAILABLE) {
            return Ok(Reading::Unavailable);
        }
        serde_json::from_value(raw)
            .map(Reading::Available)
            .map_err(serde::de::Error::custom)
    }
}

/// Current conditions at a location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// Temperature in Celsius
    pub temperature: Reading<f64>,
    /// Perceived temperature in Celsius
    pub feels_like: Reading<f64>,
    /// Relative humidity in percent
    pub humidity: Reading<f64>,
    /// Wind speed in m/s
    pub wind_speed: Reading<f64>,
    /// Short human-readable description of conditions
    pub description: Reading<String>,
}

impl WeatherSnapshot {
    /// Snapshot used when the weather service could not be reached
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            temperature: Reading::Unavailable,
            feels_like: Reading::Unavailable,
            humidity: Reading::Unavailable,
            wind_speed: Reading::Unavailable,
            description: Reading::Unavailable,
        }
    }

    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        !self.temperature.is_available()
            && !self.feels_like.is_available()
            && !self.humidity.is_available()
            && !self.wind_speed.is_available()
            && !self.description.is_available()
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{}°C", self.temperature)
    }

    /// Format wind information
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{} m/s", self.wind_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_serializes_as_sentinel() {
        let json = serde_json::to_value(WeatherSnapshot::unavailable()).unwrap();
        assert_eq!(json["temperature"], "unavailable");
        assert_eq!(json["description"], "unavailable");
    }

    #[test]
    fn test_partial_snapshot_round_trips() {
        let snapshot = WeatherSnapshot {
            temperature: Reading::Available(31.5),
            feels_like: Reading::Unavailable,
            humidity: Reading::Available(40.0),
            wind_speed: Reading::Available(2.1),
            description: Reading::Available("haze".to_string()),
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: WeatherSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
        assert!(!parsed.is_unavailable());
    }

    #[test]
    fn test_display_formats() {
        let mut snapshot = WeatherSnapshot::unavailable();
        assert!(snapshot.is_unavailable());
        assert_eq!(snapshot.format_temperature(), "N/A°C");

        snapshot.wind_speed = Reading::Available(3.6);
        assert_eq!(snapshot.format_wind(), "3.6 m/s");
    }
}
