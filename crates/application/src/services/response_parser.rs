//! Provider reply parsing
//!
//! Extracts the `recommendations` array from model text that may wrap the
//! JSON in prose or code fences. Parsing never fails: when nothing usable is
//! found a single generic recommendation is returned and the result is
//! marked degraded.

use domain::ActivityRecommendation;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{error::ApplicationError, ports::ProviderMessage};

const RECOMMENDATIONS_KEY: &str = "recommendations";

/// Recommendations recovered from a provider reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecommendations {
    /// At least one recommendation
    pub recommendations: Vec<ActivityRecommendation>,
    /// True when the fallback item was substituted
    pub degraded: bool,
}

/// Parses provider replies into recommendations
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseParser;

impl ResponseParser {
    /// Parse `message`, falling back to a generic item on any failure
    pub fn parse(message: &ProviderMessage) -> ParsedRecommendations {
        match Self::extract(message) {
            Ok(recommendations) => {
                debug!(
                    recommendation_count = recommendations.len(),
                    "Parsed provider recommendations"
                );
                ParsedRecommendations {
                    recommendations,
                    degraded: false,
                }
            },
            Err(e) => {
                warn!(error = %e, "Using fallback recommendation");
                ParsedRecommendations {
                    recommendations: vec![Self::fallback()],
                    degraded: true,
                }
            },
        }
    }

    /// Extract well-formed recommendations from the first text segment that
    /// holds a `recommendations` array
    ///
    /// Items missing a title or description are dropped.
    pub fn extract(message: &ProviderMessage) -> Result<Vec<ActivityRecommendation>, ApplicationError> {
        let mut saw_text = false;

        for text in message.texts() {
            saw_text = true;
            let Some(items) = find_recommendations(text) else {
                continue;
            };

            let total = items.len();
            let valid: Vec<ActivityRecommendation> = items.iter().filter_map(decode_item).collect();
            if valid.len() < total {
                debug!(
                    dropped = total - valid.len(),
                    kept = valid.len(),
                    "Dropped malformed recommendation items"
                );
            }

            if valid.is_empty() {
                return Err(ApplicationError::Parse(
                    "recommendations array has no usable items".to_string(),
                ));
            }
            return Ok(valid);
        }

        let reason = if saw_text {
            "no JSON object with a recommendations array"
        } else {
            "reply has no text content"
        };
        Err(ApplicationError::Parse(reason.to_string()))
    }

    /// Generic recommendation used when a reply cannot be parsed
    pub fn fallback() -> ActivityRecommendation {
        ActivityRecommendation::new(
            "**Local Family Activity**",
            "🎉",
            "We found some great family activities in your area! \
             Please try your search again for more specific recommendations.",
            "https://example.com",
            "Various",
            "All ages",
            "Check availability",
        )
    }
}

/// First balanced JSON object in `text` carrying a `recommendations` array
fn find_recommendations(text: &str) -> Option<Vec<Value>> {
    balanced_objects(text).find_map(|candidate| {
        match serde_json::from_str::<Value>(candidate) {
            Ok(Value::Object(mut map)) => match map.remove(RECOMMENDATIONS_KEY) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            },
            _ => None,
        }
    })
}

fn decode_item(item: &Value) -> Option<ActivityRecommendation> {
    if !item.is_object() {
        return None;
    }
    serde_json::from_value::<ActivityRecommendation>(item.clone())
        .ok()
        .filter(ActivityRecommendation::is_displayable)
}

/// Candidate JSON objects in `text`, one per opening brace, in order
///
/// Each candidate runs from a `{` to the brace that closes it. Braces inside
/// string literals are ignored. Opening braces that are never closed yield
/// nothing.
fn balanced_objects(text: &str) -> impl Iterator<Item = &str> {
    text.char_indices()
        .filter(|(_, c)| *c == '{')
        .filter_map(move |(start, _)| closing_brace(&text[start..]).map(|end| &text[start..=start + end]))
}

/// Byte offset of the brace closing the object that opens at `text[0]`
fn closing_brace(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {},
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            },
            _ => {},
        }
    }
    None
}
