//! Object-level metadata rendering (`object.csv`): the header row plus a
//! single record describing the digital object itself.

use crate::constants;
use crate::domain::Person;
use crate::error::Result;

pub fn render(person: &Person, project_abbr: &str) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record([
        "recid",
        "title",
        "project",
        "description",
        "creator",
        "rights",
        "publisher",
        "source",
        "object_type",
    ])?;

    let title = person.display_name();
    writer.write_record([
        person.id.as_str(),
        title.as_str(),
        project_abbr,
        person.biography_text.as_deref().unwrap_or(""),
        constants::CREATOR,
        constants::RIGHTS,
        // Publisher, source and object type are filled in on the repository
        // side; the columns still have to be present.
        "",
        "",
        "",
    ])?;

    writer.flush()?;
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}
