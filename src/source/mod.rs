use std::collections::HashMap;
use std::io::Read;

use crate::error::Result;

mod csv_file;
mod gsheet;

pub use csv_file::CsvFileSource;
pub use gsheet::GSheetSource;

/// Column names of the source sheets.
///
/// Field order within a row is irrelevant; presence governs validation.
/// Only the columns in the `*_REQUIRED` sets must be filled, everything
/// else defaults to empty/absent.
pub mod columns {
    // Persons sheet
    pub const PERSON_ID: &str = "Identifikatornummer";
    pub const LAST_NAME: &str = "Nachname";
    pub const FIRST_NAME: &str = "Vorname";
    pub const MAIDEN_NAME: &str = "Mädchenname";
    pub const ALTERNATIVE_SPELLING: &str = "Alternative Schreibweise";
    pub const GENDER: &str = "Geschlecht";
    pub const YOUTH: &str = "Jugendlich";
    pub const MEMORIAL_SIGN: &str = "Erinnerungszeichen (DERLA Nummer)";
    pub const BIOGRAPHY: &str = "Freitext / Biografie";
    pub const BIRTH_PLACE: &str = "Geburtsort";
    pub const BIRTH_DATE: &str = "Geburtsdatum";

    pub const PERSON_REQUIRED: &[&str] = &[PERSON_ID, LAST_NAME, GENDER];

    // Events sheet
    pub const EVENT_ID: &str = "Id";
    pub const EVENT_TITLE: &str = "Titel";
    pub const EVENT_PERSON_NUMBERS: &str = "Personennummer";
    pub const EVENT_TYPE: &str = "Typ";
    pub const EVENT_DESCRIPTION: &str = "Beschreibung";
    pub const EVENT_START_DATE: &str = "Startdatum";
    pub const EVENT_END_DATE: &str = "Enddatum";
    pub const EVENT_CATEGORIES: &str = "Kategorie";
    pub const EVENT_LOCATION: &str = "Ort";
    pub const EVENT_LATT: &str = "Längengrad";
    pub const EVENT_LONG: &str = "Breitengrad";

    pub const EVENT_REQUIRED: &[&str] = &[EVENT_ID];
}

/// Which of the two sheets to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sheet {
    Persons,
    Events,
}

impl Sheet {
    pub fn name(&self) -> &'static str {
        match self {
            Sheet::Persons => "persons",
            Sheet::Events => "events",
        }
    }
}

/// One data row of a sheet: field-name keyed cell values plus the 1-based
/// data-row position for diagnostics when the row has no usable id.
#[derive(Debug, Clone, Default)]
pub struct SheetRow {
    row_number: usize,
    values: HashMap<String, String>,
}

impl SheetRow {
    pub fn new(row_number: usize) -> Self {
        Self {
            row_number,
            values: HashMap::new(),
        }
    }

    pub fn insert(&mut self, column: &str, value: &str) {
        self.values.insert(column.to_string(), value.to_string());
    }

    /// Trimmed cell value; empty and missing cells both read as `None`.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values
            .get(column)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    pub fn row_number(&self) -> usize {
        self.row_number
    }
}

/// Supplies the ordered rows of both sheets. Implementations fetch from a
/// public spreadsheet export or from local CSV files; the pipeline does not
/// care which.
pub trait RowSource: Send + Sync {
    fn rows(&self, sheet: Sheet) -> Result<Vec<SheetRow>>;
}

/// Decodes CSV bytes into sheet rows, keyed by the header line.
pub(crate) fn rows_from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Vec<SheetRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();

    let mut rows = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        let mut row = SheetRow::new(idx + 1);
        for (header, value) in headers.iter().zip(record.iter()) {
            row.insert(header, value);
        }
        rows.push(row);
    }

    Ok(rows)
}
