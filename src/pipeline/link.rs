//! Resolves the person references on events into per-person event lists.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::domain::{Event, Person};

/// An event referencing a person id that no loaded person carries. Dangling
/// references never fail a run; they are surfaced so the sheet can be fixed.
#[derive(Debug, Clone)]
pub struct LinkWarning {
    pub event_id: String,
    pub person_id: String,
}

/// Walks every person over the full event collection and stores the indices
/// of the events referencing it, in event order. Each person's list is
/// replaced wholesale, so running the resolver again cannot duplicate links.
pub fn link_persons_to_events(persons: &mut [Person], events: &[Event]) -> Vec<LinkWarning> {
    for person in persons.iter_mut() {
        let linked: Vec<usize> = events
            .iter()
            .enumerate()
            .filter(|(_, event)| event.person_ids.contains(&person.id))
            .map(|(index, _)| index)
            .collect();
        debug!("Linked person {} to {} event(s)", person.id, linked.len());
        person.events = linked;
    }

    let known_ids: HashSet<&str> = persons.iter().map(|person| person.id.as_str()).collect();

    let mut warnings = Vec::new();
    for event in events {
        for person_id in &event.person_ids {
            if !known_ids.contains(person_id.as_str()) {
                warn!(
                    "Event {} references unknown person {}",
                    event.id, person_id
                );
                warnings.push(LinkWarning {
                    event_id: event.id.clone(),
                    person_id: person_id.clone(),
                });
            }
        }
    }

    warnings
}
