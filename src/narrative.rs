//! Generated environmental recommendations for a location

use std::fmt::Write;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::error::UpstreamError;
use crate::models::{LocationRecord, RecommendationLine};
use crate::recommendations::format_recommendations;
use crate::services::LanguageModel;
use crate::severity::Severity;

/// Shown whenever the language model cannot be used
pub const FALLBACK_ADVISORIES: [&str; 6] = [
    "• Use masks when going outside",
    "• Keep windows closed during high pollution hours",
    "• Use air purifiers indoors",
    "• Avoid outdoor exercise when AQI is high",
    "• Consider carpooling or public transport",
    "• Plant air-purifying plants in your home",
];

/// Generic advisories used in place of a failed narrative
#[must_use]
pub fn fallback_recommendations() -> Vec<RecommendationLine> {
    FALLBACK_ADVISORIES
        .iter()
        .map(|line| RecommendationLine::Item((*line).to_string()))
        .collect()
}

pub struct NarrativeFetcher {
    model: Arc<dyn LanguageModel>,
}

impl NarrativeFetcher {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Ask the language model for recommendations and format them for display
    #[instrument(skip(self, record), fields(location = %record.name, aqi = record.aqi))]
    pub async fn fetch_narrative(
        &self,
        record: &LocationRecord,
    ) -> Result<Vec<RecommendationLine>, UpstreamError> {
        let prompt = build_prompt(record);
        let text = self.model.generate(&prompt).await?;
        let lines = format_recommendations(&text);

        info!("Formatted {} recommendation lines", lines.len());
        Ok(lines)
    }
}

/// Natural-language request for the five recommendation sections
#[must_use]
pub fn build_prompt(record: &LocationRecord) -> String {
    let status = Severity::classify(record.score()).status();

    let mut prompt = format!(
        "As an environmental expert, provide specific solutions and recommendations for improving air quality in {}, India.\n\
         Current conditions:\n\
         - AQI (Air Quality Index): {}\n\
         - Status: {}\n",
        record.name, record.aqi, status
    );

    if !record.pollutants.is_empty() {
        prompt.push_str("Additional measurements:\n");
        for (code, value) in &record.pollutants {
            let _ = writeln!(prompt, "- {}: {}", code.to_uppercase(), value);
        }
    }

    prompt.push_str(
        "\nPlease provide:\n\
         1. Immediate actions for individuals\n\
         2. Community-level initiatives\n\
         3. Long-term policy recommendations\n\
         4. Health precautions\n\
         5. Environmental impact reduction strategies\n\n\
         Format the response in clear, concise bullet points. Do not use asterisks (*) or other special formatting characters. Use simple bullet points (•) only.",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, Pollutants, WeatherSnapshot};
    use crate::services::mock::MockLanguageModel;

    fn record(aqi: i64, pollutants: Pollutants) -> LocationRecord {
        LocationRecord {
            name: "Kanpur".to_string(),
            coordinate: Coordinate::new(26.45, 80.33),
            aqi,
            pollutants,
            observed_at: serde_json::Value::Null,
            weather: WeatherSnapshot::unavailable(),
        }
    }

    #[test]
    fn test_prompt_embeds_conditions() {
        let pollutants = Pollutants::from([("pm25".to_string(), 212.0), ("no2".to_string(), 18.3)]);
        let prompt = build_prompt(&record(212, pollutants));

        assert!(prompt.contains("air quality in Kanpur, India."));
        assert!(prompt.contains("- AQI (Air Quality Index): 212"));
        assert!(prompt.contains("- Status: Very Poor"));
        assert!(prompt.contains("- PM25: 212\n"));
        assert!(prompt.contains("- NO2: 18.3\n"));
        assert!(prompt.contains("4. Health precautions"));
    }

    #[test]
    fn test_prompt_without_pollutants() {
        let prompt = build_prompt(&record(25, Pollutants::new()));
        assert!(prompt.contains("- Status: Good"));
        assert!(!prompt.contains("Additional measurements"));
    }

    #[tokio::test]
    async fn test_formats_generated_text() {
        let model = MockLanguageModel::with_response(
            "Immediate Actions:\n*Stay indoors*\n\n• Run an air purifier",
        );
        let fetcher = NarrativeFetcher::new(Arc::new(model.clone()));

        let lines = fetcher
            .fetch_narrative(&record(180, Pollutants::new()))
            .await
            .unwrap();

        assert_eq!(
            lines,
            vec![
                RecommendationLine::Header("Immediate Actions:".to_string()),
                RecommendationLine::Item("• Stay indoors".to_string()),
                RecommendationLine::Item("• Run an air purifier".to_string()),
            ]
        );
        assert!(model.prompts()[0].contains("Kanpur"));
    }

    #[tokio::test]
    async fn test_failure_maps_to_fallback() {
        let fetcher = NarrativeFetcher::new(Arc::new(MockLanguageModel::failing()));

        let result = fetcher.fetch_narrative(&record(300, Pollutants::new())).await;
        assert!(matches!(result, Err(UpstreamError::Status { status: 500, .. })));

        let lines = result.unwrap_or_else(|_| fallback_recommendations());
        assert_eq!(lines.len(), 6);
        let texts: Vec<&str> = lines.iter().map(RecommendationLine::text).collect();
        assert_eq!(texts, FALLBACK_ADVISORIES);
    }
}
