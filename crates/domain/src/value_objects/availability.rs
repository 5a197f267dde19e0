//! Availability value object
//!
//! A family's time window is either one of the slots offered by the search
//! form or any other non-empty free text.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::errors::DomainError;

/// Message reported when no usable availability was given
pub const AVAILABILITY_REQUIRED: &str = "Time availability is required";

/// Time-slot labels offered by the search form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvailabilitySlot {
    SaturdayMorning,
    SaturdayAfternoon,
    SaturdayEvening,
    SundayMorning,
    SundayAfternoon,
    SundayEvening,
    ThisWeekend,
    NextWeekend,
}

impl AvailabilitySlot {
    /// Canonical display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SaturdayMorning => "Saturday morning",
            Self::SaturdayAfternoon => "Saturday afternoon",
            Self::SaturdayEvening => "Saturday evening",
            Self::SundayMorning => "Sunday morning",
            Self::SundayAfternoon => "Sunday afternoon",
            Self::SundayEvening => "Sunday evening",
            Self::ThisWeekend => "This weekend",
            Self::NextWeekend => "Next weekend",
        }
    }

    /// All slots in form order
    #[must_use]
    pub const fn all() -> [Self; 8] {
        [
            Self::SaturdayMorning,
            Self::SaturdayAfternoon,
            Self::SaturdayEvening,
            Self::SundayMorning,
            Self::SundayAfternoon,
            Self::SundayEvening,
            Self::ThisWeekend,
            Self::NextWeekend,
        ]
    }

    /// Match a label case-insensitively, ignoring surrounding whitespace
    #[must_use]
    pub fn from_label(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::all()
            .into_iter()
            .find(|slot| slot.label().eq_ignore_ascii_case(text))
    }
}

impl fmt::Display for AvailabilitySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// When the family is free
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Availability {
    /// One of the enumerated form slots
    Slot(AvailabilitySlot),
    /// Any other description, already trimmed
    Custom(String),
}

impl Availability {
    /// Parse availability text
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAvailability` if the text is blank.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidAvailability(
                AVAILABILITY_REQUIRED.to_string(),
            ));
        }

        Ok(AvailabilitySlot::from_label(trimmed)
            .map_or_else(|| Self::Custom(trimmed.to_string()), Self::Slot))
    }

    /// Text used in prompts and metadata
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Slot(slot) => slot.label(),
            Self::Custom(text) => text,
        }
    }

}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Availability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_labels_round_trip() {
        for slot in AvailabilitySlot::all() {
            assert_eq!(AvailabilitySlot::from_label(slot.label()), Some(slot));
        }
    }

    #[test]
    fn slot_matching_ignores_case_and_whitespace() {
        assert_eq!(
            AvailabilitySlot::from_label("  saturday MORNING "),
            Some(AvailabilitySlot::SaturdayMorning)
        );
    }

    #[test]
    fn parse_known_slot_uses_canonical_label() {
        let availability = Availability::parse("sunday evening").unwrap();
        assert_eq!(
            availability,
            Availability::Slot(AvailabilitySlot::SundayEvening)
        );
        assert_eq!(availability.as_str(), "Sunday evening");
    }

    #[test]
    fn parse_free_text_is_trimmed() {
        let availability = Availability::parse("  weekdays after 4pm ").unwrap();
        assert_eq!(
            availability,
            Availability::Custom("weekdays after 4pm".to_string())
        );
    }

    #[test]
    fn parse_rejects_blank_text() {
        assert!(Availability::parse("").is_err());
        assert_eq!(
            Availability::parse("   "),
            Err(DomainError::InvalidAvailability(
                AVAILABILITY_REQUIRED.to_string()
            ))
        );
    }

    #[test]
    fn serializes_as_plain_string() {
        let availability = Availability::Slot(AvailabilitySlot::ThisWeekend);
        assert_eq!(
            serde_json::to_string(&availability).unwrap(),
            "\"This weekend\""
        );
    }
}
