//! Search index document rendering (`SEARCH.json`).

use serde::Serialize;

use crate::domain::{Event, Person};
use crate::error::Result;

/// Document ingested by the repository's search index. The field spellings
/// (including the two hyphenated ones) are dictated by the index schema and
/// must not be normalised.
#[derive(Debug, Serialize)]
pub struct SearchDocument {
    pub id: String,
    #[serde(rename = "sys_entityTitle")]
    pub entity_title: String,
    #[serde(rename = "sys_entityDesc")]
    pub entity_desc: String,
    #[serde(rename = "sys_entityTypes")]
    pub entity_types: Vec<String>,
    #[serde(rename = "sys-entityLongLat", skip_serializing_if = "Option::is_none")]
    pub entity_long_lat: Option<[f64; 2]>,
    #[serde(rename = "sys_entityTags", skip_serializing_if = "Option::is_none")]
    pub entity_tags: Option<Vec<String>>,
    #[serde(rename = "sys-locationLabels", skip_serializing_if = "Option::is_none")]
    pub location_labels: Option<Vec<String>>,
}

/// Builds the search document for a person. The first linked death-marker
/// event, if any, contributes coordinates, tags and a location label.
pub fn document(person: &Person, events: &[&Event]) -> SearchDocument {
    let mut document = SearchDocument {
        id: person.id.clone(),
        entity_title: person.display_name(),
        entity_desc: person.biography_text.clone().unwrap_or_default(),
        entity_types: vec!["person".to_string()],
        entity_long_lat: None,
        entity_tags: None,
        location_labels: None,
    };

    if let Some(death) = events.iter().find(|event| event.is_death_marker()) {
        if let (Some(latt), Some(long)) = (death.latt, death.long) {
            document.entity_long_lat = Some([latt, long]);
        }
        if !death.categories.is_empty() {
            document.entity_tags = Some(death.categories.clone());
        }
        if let Some(location) = &death.location {
            document.location_labels = Some(vec![location.clone()]);
        }
    }

    document
}

pub fn render(person: &Person, events: &[&Event]) -> Result<String> {
    let mut rendered = serde_json::to_string_pretty(&document(person, events))?;
    rendered.push('\n');
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::domain::Gender;

    fn person() -> Person {
        Person {
            id: "memo.person.1".to_string(),
            last_name: "Gross".to_string(),
            first_name: Some("Adolf".to_string()),
            maiden_name: None,
            alternative_spelling: None,
            gender: Gender::Male,
            is_youth: false,
            memorial_sign: None,
            biography_text: Some("Kaufmann in Graz.".to_string()),
            birth_place: None,
            birth_date: None,
            events: Vec::new(),
        }
    }

    fn death_event() -> Event {
        Event {
            id: "10".to_string(),
            title: None,
            person_ids: BTreeSet::from(["memo.person.1".to_string()]),
            event_type: Some("Tod".to_string()),
            description: None,
            start_date: None,
            end_date: None,
            categories: vec!["Deportation".to_string()],
            location: Some("Auschwitz".to_string()),
            latt: Some(19.2),
            long: Some(50.03),
        }
    }

    #[test]
    fn base_document_has_title_description_and_type() {
        let document = document(&person(), &[]);
        assert_eq!(document.id, "memo.person.1");
        assert_eq!(document.entity_title, "Adolf Gross");
        assert_eq!(document.entity_desc, "Kaufmann in Graz.");
        assert_eq!(document.entity_types, vec!["person"]);
        assert!(document.entity_long_lat.is_none());
    }

    #[test]
    fn death_event_contributes_the_location_block() {
        let death = death_event();
        let document = document(&person(), &[&death]);
        assert_eq!(document.entity_long_lat, Some([19.2, 50.03]));
        assert_eq!(document.entity_tags, Some(vec!["Deportation".to_string()]));
        assert_eq!(
            document.location_labels,
            Some(vec!["Auschwitz".to_string()])
        );
    }

    #[test]
    fn first_death_marker_wins() {
        let mut first = death_event();
        first.location = Some("Graz".to_string());
        let second = death_event();
        let document = document(&person(), &[&first, &second]);
        assert_eq!(document.location_labels, Some(vec!["Graz".to_string()]));
    }

    #[test]
    fn non_death_events_contribute_nothing() {
        let mut event = death_event();
        event.event_type = Some("Deportation".to_string());
        let document = document(&person(), &[&event]);
        assert!(document.entity_long_lat.is_none());
        assert!(document.entity_tags.is_none());
        assert!(document.location_labels.is_none());
    }

    #[test]
    fn rendered_json_uses_the_index_field_spellings() {
        let death = death_event();
        let json = render(&person(), &[&death]).unwrap();
        assert!(json.contains("\"sys_entityTitle\": \"Adolf Gross\""));
        assert!(json.contains("\"sys_entityDesc\""));
        assert!(json.contains("\"sys_entityTypes\""));
        assert!(json.contains("\"sys-entityLongLat\""));
        assert!(json.contains("\"sys_entityTags\""));
        assert!(json.contains("\"sys-locationLabels\""));
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn missing_biography_renders_an_empty_description() {
        let mut person = person();
        person.biography_text = None;
        let json = render(&person, &[]).unwrap();
        assert!(json.contains("\"sys_entityDesc\": \"\""));
        assert!(!json.contains("sys-entityLongLat"));
    }
}
