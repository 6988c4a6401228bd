//! Datastream manifest rendering (`datastreams.csv`).
//!
//! The manifest is driven by the list of artifacts the orchestrator actually
//! registered for this object, so a file only appears here if it was
//! rendered. `object.csv` describes the object itself and is not a
//! datastream, so it is excluded by name.

use crate::constants;
use crate::domain::Person;
use crate::error::Result;
use crate::render::mimetype_for;

pub fn render(person: &Person, manifest: &[String]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record([
        "dsid",
        "dspath",
        "title",
        "mimetype",
        "description",
        "creator",
        "rights",
    ])?;

    for file_name in manifest
        .iter()
        .filter(|name| name.as_str() != constants::OBJECT_CSV_FILE)
    {
        let description = format!(
            "Datastream {} of digital object {}",
            file_name, person.id
        );
        writer.write_record([
            file_name.as_str(),
            file_name.as_str(),
            file_name.as_str(),
            mimetype_for(file_name),
            description.as_str(),
            constants::CREATOR,
            constants::RIGHTS,
        ])?;
    }

    writer.flush()?;
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}
