//! Activity search criteria and the validator that produces them
//!
//! [`ActivityQuery::from_untyped`] is the only constructor. It accepts an
//! arbitrary JSON value, checks every field independently, and either returns
//! a sanitized query or the complete list of field errors so a form can be
//! corrected in a single round trip.

use serde::Serialize;
use serde_json::{Map, Value};
use validator::{ValidateLength, ValidateRange};

use crate::value_objects::{AVAILABILITY_REQUIRED, Availability, FieldError};

/// Oldest age accepted for a child
pub const MAX_CHILD_AGE: u8 = 18;
/// Smallest accepted travel distance in miles
pub const MIN_DISTANCE_MILES: u8 = 1;
/// Largest accepted travel distance in miles
pub const MAX_DISTANCE_MILES: u8 = 100;

const MIN_CITY_LENGTH: u64 = 2;

const CITY: &str = "city";
const KIDS_AGES: &str = "kidsAges";
const AVAILABILITY: &str = "availability";
const MAX_DISTANCE: &str = "maxDistance";
const PREFERENCES: &str = "preferences";

// Field names used by the first version of the form.
const LEGACY_AVAILABILITY: &str = "timeText";
const LEGACY_MAX_DISTANCE: &str = "maxMiles";

/// Validated, sanitized search criteria for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityQuery {
    city: String,
    child_ages: Vec<u8>,
    availability: Availability,
    max_distance_miles: u8,
    preferences: Option<String>,
}

impl ActivityQuery {
    /// Validate and sanitize an untyped request payload
    ///
    /// All fields are checked; errors are reported in the order
    /// `city`, `kidsAges`, `availability`, `maxDistance`, `preferences`.
    /// A payload that is not a JSON object is treated as an empty one.
    ///
    /// # Errors
    ///
    /// Returns every [`FieldError`] found. The list is never empty.
    pub fn from_untyped(input: &Value) -> Result<Self, Vec<FieldError>> {
        let empty = Map::new();
        let fields = input.as_object().unwrap_or(&empty);
        let mut errors = Vec::new();

        let city = collect(validate_city(fields.get(CITY)), &mut errors);
        let child_ages = collect(validate_ages(fields.get(KIDS_AGES)), &mut errors);
        let availability = collect(
            validate_availability(
                fields
                    .get(AVAILABILITY)
                    .or_else(|| fields.get(LEGACY_AVAILABILITY)),
            ),
            &mut errors,
        );
        let max_distance_miles = collect(
            validate_distance(
                fields
                    .get(MAX_DISTANCE)
                    .or_else(|| fields.get(LEGACY_MAX_DISTANCE)),
            ),
            &mut errors,
        );
        let preferences = collect(validate_preferences(fields.get(PREFERENCES)), &mut errors);

        match (city, child_ages, availability, max_distance_miles, preferences) {
            (
                Some(city),
                Some(child_ages),
                Some(availability),
                Some(max_distance_miles),
                Some(preferences),
            ) if errors.is_empty() => Ok(Self {
                city,
                child_ages,
                availability,
                max_distance_miles,
                preferences,
            }),
            _ => Err(errors),
        }
    }

    /// Trimmed city name
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Children's ages in the order they were entered
    pub fn child_ages(&self) -> &[u8] {
        &self.child_ages
    }

    /// Ages as the literal list used in prompts and metadata, e.g. "5, 8"
    pub fn ages_label(&self) -> String {
        self.child_ages
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// When the family is free
    pub const fn availability(&self) -> &Availability {
        &self.availability
    }

    /// Maximum travel distance, rounded to whole miles
    pub const fn max_distance_miles(&self) -> u8 {
        self.max_distance_miles
    }

    /// Free-text preferences, `None` when absent or blank
    pub fn preferences(&self) -> Option<&str> {
        self.preferences.as_deref()
    }
}

fn collect<T>(result: Result<T, FieldError>, errors: &mut Vec<FieldError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            errors.push(error);
            None
        },
    }
}

fn validate_city(value: Option<&Value>) -> Result<String, FieldError> {
    let city = value
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    if city.is_empty() {
        return Err(FieldError::new(CITY, "City is required"));
    }
    if !city.validate_length(Some(MIN_CITY_LENGTH), None, None) {
        return Err(FieldError::new(
            CITY,
            "City must be at least 2 characters long",
        ));
    }
    Ok(city)
}

fn validate_ages(value: Option<&Value>) -> Result<Vec<u8>, FieldError> {
    let required = || FieldError::new(KIDS_AGES, "Kids ages are required");

    let ages: Option<Vec<u8>> = match value {
        Some(Value::String(text)) if !text.trim().is_empty() => {
            text.split(',').map(parse_age_token).collect()
        },
        Some(Value::Array(items)) if !items.is_empty() => items.iter().map(age_from_json).collect(),
        _ => return Err(required()),
    };

    ages.ok_or_else(|| {
        FieldError::new(
            KIDS_AGES,
            "Kids ages must be valid numbers between 0-18",
        )
    })
}

fn parse_age_token(token: &str) -> Option<u8> {
    token.trim().parse::<i64>().ok().and_then(checked_age)
}

fn age_from_json(value: &Value) -> Option<u8> {
    match value {
        Value::Number(number) => number.as_i64().and_then(checked_age),
        Value::String(text) => parse_age_token(text),
        _ => None,
    }
}

fn checked_age(age: i64) -> Option<u8> {
    if age.validate_range(Some(0), Some(i64::from(MAX_CHILD_AGE)), None, None) {
        u8::try_from(age).ok()
    } else {
        None
    }
}

fn validate_availability(value: Option<&Value>) -> Result<Availability, FieldError> {
    let text = value
        .and_then(Value::as_str)
        .ok_or_else(|| FieldError::new(AVAILABILITY, AVAILABILITY_REQUIRED))?;
    Availability::parse(text).map_err(FieldError::from)
}

fn validate_distance(value: Option<&Value>) -> Result<u8, FieldError> {
    let min = f64::from(MIN_DISTANCE_MILES);
    let max = f64::from(MAX_DISTANCE_MILES);

    let miles = value
        .and_then(Value::as_f64)
        .filter(|miles| miles.validate_range(Some(min), Some(max), None, None))
        .ok_or_else(|| {
            FieldError::new(
                MAX_DISTANCE,
                "Max distance must be a number between 1 and 100",
            )
        })?;

    // Bounded to [1, 100] above.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(miles.round() as u8)
}

fn validate_preferences(value: Option<&Value>) -> Result<Option<String>, FieldError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
        },
        Some(_) => Err(FieldError::new(
            PREFERENCES,
            "Preferences must be a string",
        )),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::value_objects::AvailabilitySlot;

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn valid_payload_is_sanitized() {
        let query = ActivityQuery::from_untyped(&json!({
            "city": "  Austin ",
            "kidsAges": " 5, 8 ",
            "availability": "Saturday morning",
            "maxDistance": 10,
        }))
        .unwrap();

        assert_eq!(query.city(), "Austin");
        assert_eq!(query.child_ages(), &[5, 8]);
        assert_eq!(
            query.availability(),
            &Availability::Slot(AvailabilitySlot::SaturdayMorning)
        );
        assert_eq!(query.max_distance_miles(), 10);
        assert_eq!(query.preferences(), None);
        assert_eq!(query.ages_label(), "5, 8");
    }

    #[test]
    fn invalid_payload_reports_every_field() {
        let errors = ActivityQuery::from_untyped(&json!({
            "city": "A",
            "kidsAges": "abc",
            "availability": "",
            "maxDistance": 500,
        }))
        .unwrap_err();

        assert_eq!(
            fields(&errors),
            vec!["city", "kidsAges", "availability", "maxDistance"]
        );
        assert_eq!(errors[0].message, "City must be at least 2 characters long");
    }

    #[test]
    fn missing_city_has_required_message() {
        let errors = ActivityQuery::from_untyped(&json!({
            "kidsAges": "5",
            "availability": "Sunday morning",
            "maxDistance": 5,
        }))
        .unwrap_err();
        assert_eq!(errors, vec![FieldError::new("city", "City is required")]);
    }

    #[test]
    fn blank_and_non_string_availability_share_message() {
        for availability in [json!("   "), json!(42)] {
            let errors = ActivityQuery::from_untyped(&json!({
                "city": "Austin",
                "kidsAges": "5",
                "availability": availability,
                "maxDistance": 5,
            }))
            .unwrap_err();
            assert_eq!(
                errors,
                vec![FieldError::new("availability", AVAILABILITY_REQUIRED)]
            );
        }
    }

    #[test]
    fn non_object_payload_reports_required_fields() {
        let errors = ActivityQuery::from_untyped(&json!("hello")).unwrap_err();
        assert_eq!(
            fields(&errors),
            vec!["city", "kidsAges", "availability", "maxDistance"]
        );
    }

    #[test]
    fn age_out_of_range_is_rejected() {
        let errors = ActivityQuery::from_untyped(&json!({
            "city": "Boston",
            "kidsAges": "4, 19",
            "availability": "This weekend",
            "maxDistance": 20,
        }))
        .unwrap_err();
        assert_eq!(fields(&errors), vec!["kidsAges"]);
    }

    #[test]
    fn empty_age_token_is_rejected() {
        let errors = ActivityQuery::from_untyped(&json!({
            "city": "Boston",
            "kidsAges": "4,,6",
            "availability": "This weekend",
            "maxDistance": 20,
        }))
        .unwrap_err();
        assert_eq!(fields(&errors), vec!["kidsAges"]);
    }

    #[test]
    fn ages_accepted_as_numeric_sequence() {
        let query = ActivityQuery::from_untyped(&json!({
            "city": "Denver",
            "kidsAges": [0, 3, 18],
            "availability": "weekday afternoons",
            "maxDistance": 1,
        }))
        .unwrap();
        assert_eq!(query.child_ages(), &[0, 3, 18]);
        assert_eq!(query.availability().as_str(), "weekday afternoons");
    }

    #[test]
    fn empty_age_sequence_is_required_error() {
        let errors = ActivityQuery::from_untyped(&json!({
            "city": "Denver",
            "kidsAges": [],
            "availability": "Sunday afternoon",
            "maxDistance": 1,
        }))
        .unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::new("kidsAges", "Kids ages are required")]
        );
    }

    #[test]
    fn distance_is_rounded_after_range_check() {
        let query = ActivityQuery::from_untyped(&json!({
            "city": "Portland",
            "kidsAges": "7",
            "availability": "Next weekend",
            "maxDistance": 12.6,
        }))
        .unwrap();
        assert_eq!(query.max_distance_miles(), 13);

        let errors = ActivityQuery::from_untyped(&json!({
            "city": "Portland",
            "kidsAges": "7",
            "availability": "Next weekend",
            "maxDistance": 0.6,
        }))
        .unwrap_err();
        assert_eq!(fields(&errors), vec!["maxDistance"]);
    }

    #[test]
    fn distance_as_string_is_rejected() {
        let errors = ActivityQuery::from_untyped(&json!({
            "city": "Portland",
            "kidsAges": "7",
            "availability": "Next weekend",
            "maxDistance": "10",
        }))
        .unwrap_err();
        assert_eq!(fields(&errors), vec!["maxDistance"]);
    }

    #[test]
    fn legacy_field_names_are_accepted() {
        let query = ActivityQuery::from_untyped(&json!({
            "city": "Seattle",
            "kidsAges": "2,6",
            "timeText": "Saturday afternoon",
            "maxMiles": 25,
        }))
        .unwrap();
        assert_eq!(query.availability().as_str(), "Saturday afternoon");
        assert_eq!(query.max_distance_miles(), 25);
    }

    #[test]
    fn preferences_are_trimmed_and_blank_is_none() {
        let base = json!({
            "city": "Chicago",
            "kidsAges": "9",
            "availability": "Sunday morning",
            "maxDistance": 15,
        });

        let mut with_prefs = base.clone();
        with_prefs["preferences"] = json!("  outdoor, free  ");
        let query = ActivityQuery::from_untyped(&with_prefs).unwrap();
        assert_eq!(query.preferences(), Some("outdoor, free"));

        let mut blank = base;
        blank["preferences"] = json!("   ");
        let query = ActivityQuery::from_untyped(&blank).unwrap();
        assert_eq!(query.preferences(), None);
    }

    #[test]
    fn non_string_preferences_are_rejected() {
        let errors = ActivityQuery::from_untyped(&json!({
            "city": "Chicago",
            "kidsAges": "9",
            "availability": "Sunday morning",
            "maxDistance": 15,
            "preferences": 42,
        }))
        .unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::new("preferences", "Preferences must be a string")]
        );
    }
}
