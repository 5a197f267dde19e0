//! Prompt rendering for activity searches
//!
//! The prompt is a pure function of the query: identical queries always
//! render byte-identical prompts.

use domain::ActivityQuery;

use crate::ports::GenerationRequest;

/// Number of recommendations the provider is asked for
pub const RECOMMENDATION_COUNT: usize = 5;

const SYSTEM_PROMPT: &str = "You are a helpful assistant that finds family-friendly activities. \
Use the web search tool to find current, relevant activities in the specified location. \
Always return exactly 5 recommendations in the specified JSON format.";

const OUTPUT_INSTRUCTIONS: &str = r#"Use web search to find current, relevant activities. For each activity, provide:
- A bold title (use **title** format)
- An appropriate emoji
- 2-4 sentence description explaining why it's perfect for the family
- A relevant URL
- Distance from the city
- Age range suitability
- Time availability information

Return the results in this exact JSON format:
{
  "recommendations": [
    {
      "title": "**Activity Name**",
      "emoji": "🎯",
      "description": "2-4 sentences describing the activity, why it's perfect for the family's ages and interests, what makes it special, and practical details like timing or location highlights.",
      "url": "https://example.com/activity-link",
      "distance": "X.X miles",
      "ageRange": "Ages X-X",
      "timeInfo": "Available [time details]"
    }
  ]
}

Search for current activities, events, and places that match these criteria."#;

/// Renders generation prompts from validated queries
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    /// Fixed system instruction sent with every prompt
    pub const fn system_prompt() -> &'static str {
        SYSTEM_PROMPT
    }

    /// Render the user prompt for `query`
    ///
    /// A preferences line is added only when the query has preferences;
    /// everything else is identical either way.
    pub fn build(query: &ActivityQuery) -> String {
        let mut prompt = String::with_capacity(1024);

        prompt.push_str(&format!(
            "Find {RECOMMENDATION_COUNT} family-friendly activities in {} for kids aged {} years old.\n",
            query.city(),
            query.ages_label(),
        ));
        prompt.push('\n');
        prompt.push_str("Requirements:\n");
        prompt.push_str(&format!("- Available during: {}\n", query.availability()));
        prompt.push_str(&format!(
            "- Within {} miles of {}\n",
            query.max_distance_miles(),
            query.city(),
        ));
        if let Some(preferences) = query.preferences() {
            prompt.push_str(&format!("- Additional preferences: {preferences}\n"));
        }
        prompt.push('\n');
        prompt.push_str(OUTPUT_INSTRUCTIONS);

        prompt
    }

    /// Build the complete generation request for `query`
    pub fn request(query: &ActivityQuery) -> GenerationRequest {
        GenerationRequest::new(SYSTEM_PROMPT, Self::build(query))
    }
}
