use std::fs::File;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{MemoError, Result};
use crate::source::{rows_from_reader, RowSource, Sheet, SheetRow};

/// Reads the persons and events sheets from local CSV files.
pub struct CsvFileSource {
    persons_path: PathBuf,
    events_path: PathBuf,
    delimiter: u8,
}

impl CsvFileSource {
    pub fn new(persons_path: PathBuf, events_path: PathBuf, delimiter: u8) -> Self {
        Self {
            persons_path,
            events_path,
            delimiter,
        }
    }
}

impl RowSource for CsvFileSource {
    fn rows(&self, sheet: Sheet) -> Result<Vec<SheetRow>> {
        let path = match sheet {
            Sheet::Persons => &self.persons_path,
            Sheet::Events => &self.events_path,
        };

        debug!("Reading {} sheet from {}", sheet.name(), path.display());
        let file = File::open(path).map_err(|e| {
            MemoError::Source(format!(
                "Failed to open {} sheet '{}': {}",
                sheet.name(),
                path.display(),
                e
            ))
        })?;

        rows_from_reader(file, self.delimiter)
    }
}
