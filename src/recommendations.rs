//! Normalizes generated narrative text into display lines

use std::sync::LazyLock;

use regex::Regex;

use crate::models::RecommendationLine;

const BULLET: &str = "•";

static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z\s]+:").expect("section header pattern is valid"));

static NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.").expect("numbered item pattern is valid"));

/// Split generated text into headers and bulleted items
///
/// Asterisks are stripped, blank lines dropped, and plain lines gain a
/// leading bullet unless they are already bulleted or numbered.
#[must_use]
pub fn format_recommendations(text: &str) -> Vec<RecommendationLine> {
    text.split('\n').filter_map(format_line).collect()
}

fn format_line(raw: &str) -> Option<RecommendationLine> {
    let cleaned = raw.replace('*', "");
    let line = cleaned.trim();

    if line.is_empty() {
        return None;
    }

    if SECTION_HEADER.is_match(line) {
        return Some(RecommendationLine::Header(line.to_string()));
    }

    if line.starts_with(BULLET) || NUMBERED.is_match(line) {
        Some(RecommendationLine::Item(line.to_string()))
    } else {
        Some(RecommendationLine::Item(format!("{BULLET} {line}")))
    }
}
