//! Turns raw sheet rows into typed domain records.
//!
//! Every rule here is per-row: a normalizer sees one `SheetRow` and either
//! produces a `Person`/`Event` or a validation error naming the row and the
//! offending field. Cross-row concerns (duplicate ids, person/event links)
//! live in the orchestrator and the link resolver.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::constants;
use crate::domain::{Event, Gender, Person};
use crate::error::{MemoError, Result};
use crate::source::{columns, SheetRow};

/// Splits `text` on `delimiter`, ignoring delimiters inside double quotes.
/// Quote characters stay part of the token; tokens are trimmed.
pub fn split_ignoring_quotes(text: &str, delimiter: char) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in text.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
            current.push(ch);
        } else if ch == delimiter && !in_quotes {
            tokens.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }
    }
    tokens.push(current.trim().to_string());

    tokens
}

/// Converts a `dd.mm.yyyy` date into `YYYY-MM-DDT00:00:00Z`.
///
/// The shape is strict: exactly three dot-separated numeric parts, a four
/// digit year, and a day/month combination that exists on the calendar.
pub fn convert_date(value: &str, row: &str, field: &str) -> Result<String> {
    let malformed = || MemoError::MalformedDate {
        row: row.to_string(),
        field: field.to_string(),
        value: value.to_string(),
    };

    let mut parts = value.split('.');
    let (day, month, year) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(day), Some(month), Some(year), None) => (day.trim(), month.trim(), year.trim()),
        _ => return Err(malformed()),
    };

    for part in [day, month, year] {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
            return Err(malformed());
        }
    }
    if year.len() != 4 {
        return Err(malformed());
    }

    let day: u32 = day.parse().map_err(|_| malformed())?;
    let month: u32 = month.parse().map_err(|_| malformed())?;
    let year: i32 = year.parse().map_err(|_| malformed())?;

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(malformed)?;
    Ok(format!("{}T00:00:00Z", date.format("%Y-%m-%d")))
}

/// Builds a `Person` from a persons-sheet row.
///
/// Identifier, last name and gender are required; everything else is
/// optional. The returned person carries no event links yet.
pub fn normalize_person(row: &SheetRow, project_abbr: &str) -> Result<Person> {
    let label = row_label(row, columns::PERSON_ID);

    let identifier = require(row, columns::PERSON_ID, &label)?;
    let last_name = require(row, columns::LAST_NAME, &label)?;
    let gender_token = require(row, columns::GENDER, &label)?;
    let gender = Gender::from_token(gender_token).ok_or_else(|| MemoError::Validation {
        row: label.clone(),
        field: columns::GENDER.to_string(),
    })?;

    let birth_date = row
        .get(columns::BIRTH_DATE)
        .map(|raw| convert_date(raw, &label, columns::BIRTH_DATE))
        .transpose()?;

    Ok(Person {
        id: constants::person_id(project_abbr, identifier),
        last_name: last_name.to_string(),
        first_name: optional(row, columns::FIRST_NAME),
        maiden_name: optional(row, columns::MAIDEN_NAME),
        alternative_spelling: optional(row, columns::ALTERNATIVE_SPELLING),
        gender,
        is_youth: row.get(columns::YOUTH) == Some(constants::YOUTH_AFFIRMATIVE),
        memorial_sign: optional(row, columns::MEMORIAL_SIGN),
        biography_text: optional(row, columns::BIOGRAPHY),
        birth_place: optional(row, columns::BIRTH_PLACE),
        birth_date,
        events: Vec::new(),
    })
}

/// Builds an `Event` from an events-sheet row.
///
/// Only the id is required. Person references and categories are
/// comma-separated lists that may themselves contain quoted commas, and the
/// references are rewritten into fully qualified person ids.
pub fn normalize_event(row: &SheetRow, project_abbr: &str) -> Result<Event> {
    let label = row_label(row, columns::EVENT_ID);

    let id = require(row, columns::EVENT_ID, &label)?;

    let person_ids: BTreeSet<String> = row
        .get(columns::EVENT_PERSON_NUMBERS)
        .map(|raw| {
            split_ignoring_quotes(raw, ',')
                .into_iter()
                .filter(|token| !token.is_empty())
                .map(|token| constants::person_id(project_abbr, &token))
                .collect()
        })
        .unwrap_or_default();

    let categories: Vec<String> = row
        .get(columns::EVENT_CATEGORIES)
        .map(|raw| {
            split_ignoring_quotes(raw, ',')
                .into_iter()
                .filter(|token| !token.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let start_date = row
        .get(columns::EVENT_START_DATE)
        .map(|raw| convert_date(raw, &label, columns::EVENT_START_DATE))
        .transpose()?;
    let end_date = row
        .get(columns::EVENT_END_DATE)
        .map(|raw| convert_date(raw, &label, columns::EVENT_END_DATE))
        .transpose()?;

    Ok(Event {
        id: id.to_string(),
        title: optional(row, columns::EVENT_TITLE),
        person_ids,
        event_type: optional(row, columns::EVENT_TYPE),
        description: optional(row, columns::EVENT_DESCRIPTION),
        start_date,
        end_date,
        categories,
        location: optional(row, columns::EVENT_LOCATION),
        latt: parse_coordinate(row, columns::EVENT_LATT, &label)?,
        long: parse_coordinate(row, columns::EVENT_LONG, &label)?,
    })
}

/// Identifies a row in error messages: its id cell when present, otherwise
/// its position in the sheet.
fn row_label(row: &SheetRow, id_column: &str) -> String {
    match row.get(id_column) {
        Some(id) => id.to_string(),
        None => format!("#{}", row.row_number()),
    }
}

fn require<'a>(row: &'a SheetRow, column: &str, label: &str) -> Result<&'a str> {
    row.get(column).ok_or_else(|| MemoError::Validation {
        row: label.to_string(),
        field: column.to_string(),
    })
}

fn optional(row: &SheetRow, column: &str) -> Option<String> {
    row.get(column).map(|value| value.to_string())
}

fn parse_coordinate(row: &SheetRow, column: &str, label: &str) -> Result<Option<f64>> {
    row.get(column)
        .map(|raw| {
            raw.parse::<f64>().map_err(|_| MemoError::Validation {
                row: label.to_string(),
                field: column.to_string(),
            })
        })
        .transpose()
}
