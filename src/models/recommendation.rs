//! Display lines of the generated environmental narrative

use serde::{Deserialize, Serialize};

/// One line of the recommendations panel
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum RecommendationLine {
    /// Section title, rendered emphasized
    Header(String),
    /// Bulleted or numbered entry
    Item(String),
}

impl RecommendationLine {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            RecommendationLine::Header(text) | RecommendationLine::Item(text) => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(RecommendationLine::Header("Health Precautions:".into()))
            .unwrap();
        assert_eq!(json, serde_json::json!({"kind": "header", "text": "Health Precautions:"}));
    }
}
