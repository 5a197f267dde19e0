//! A single recommended activity
//!
//! Every field is display text produced by the generation provider (or by a
//! fallback). Nothing here is guaranteed to be numeric or reachable.

use serde::{Deserialize, Serialize};

/// One activity suggestion, serialized with the provider schema names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecommendation {
    /// Display title, conventionally wrapped in `**...**`
    pub title: String,

    /// A single emoji glyph
    #[serde(default)]
    pub emoji: String,

    /// Two to four sentences on why the activity fits the family
    pub description: String,

    /// Link for more information, not verified
    #[serde(default)]
    pub url: String,

    /// Free-form distance, e.g. "3.2 miles"
    #[serde(rename = "distance", default)]
    pub distance_label: String,

    /// Free-form age suitability, e.g. "Ages 4-12"
    #[serde(rename = "ageRange", default)]
    pub age_range_label: String,

    /// Free-form timing, e.g. "Open Saturday 10am-5pm"
    #[serde(rename = "timeInfo", default)]
    pub availability_label: String,
}

impl ActivityRecommendation {
    /// Create a recommendation from its display parts
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: impl Into<String>,
        emoji: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
        distance_label: impl Into<String>,
        age_range_label: impl Into<String>,
        availability_label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            emoji: emoji.into(),
            description: description.into(),
            url: url.into(),
            distance_label: distance_label.into(),
            age_range_label: age_range_label.into(),
            availability_label: availability_label.into(),
        }
    }

    /// Title with the `**bold**` markers removed
    pub fn plain_title(&self) -> &str {
        let title = self.title.trim();
        title
            .strip_prefix("**")
            .and_then(|t| t.strip_suffix("**"))
            .unwrap_or(title)
    }

    /// Whether the fields needed to render a card are present
    pub fn is_displayable(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }
}
