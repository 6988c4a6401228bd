use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::constants;

/// A person from the persons sheet, one digital object per entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// Constructed as `{project_abbreviation}.person.{source_identifier}`,
    /// unique across the run; doubles as the output folder name.
    pub id: String,
    pub last_name: String,
    pub first_name: Option<String>,
    pub maiden_name: Option<String>,
    pub alternative_spelling: Option<String>,
    pub gender: Gender,
    pub is_youth: bool,
    pub memorial_sign: Option<String>,
    pub biography_text: Option<String>,
    pub birth_place: Option<String>,
    /// Normalized to `YYYY-MM-DDT00:00:00Z`
    pub birth_date: Option<String>,
    /// Indices into the run's event collection, in event-sheet order.
    /// Populated once by the link resolver.
    pub events: Vec<usize>,
}

impl Person {
    /// Name used for titles: "first last" when both are present,
    /// otherwise the last name alone.
    pub fn display_name(&self) -> String {
        match &self.first_name {
            Some(first) => format!("{} {}", first, self.last_name),
            None => self.last_name.clone(),
        }
    }
}

/// An event from the events sheet; may reference any number of persons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: Option<String>,
    /// Person ids as constructed by the normalizer, not raw sheet numbers
    pub person_ids: BTreeSet<String>,
    pub event_type: Option<String>,
    pub description: Option<String>,
    /// Normalized to `YYYY-MM-DDT00:00:00Z`
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub categories: Vec<String>,
    pub location: Option<String>,
    pub latt: Option<f64>,
    pub long: Option<f64>,
}

impl Event {
    /// Whether this event carries the death marker that selects the
    /// location block of the search document.
    pub fn is_death_marker(&self) -> bool {
        self.event_type.as_deref() == Some(constants::DEATH_EVENT_TYPE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Maps the sheet tokens (German or English, any case) onto the enum.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "männlich" | "male" => Some(Gender::Male),
            "weiblich" | "female" => Some(Gender::Female),
            _ => None,
        }
    }
}
