//! OAI Dublin Core rendering (`DC.xml`).

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event as XmlEvent};
use quick_xml::Writer;

use super::text_element;
use crate::constants;
use crate::domain::Person;
use crate::error::Result;

/// Renders the Dublin Core description of a person.
///
/// Element order is fixed so rerunning the pipeline over unchanged input
/// reproduces the file byte for byte.
pub fn render(person: &Person) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(XmlEvent::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("oai_dc:dc");
    root.push_attribute(("xmlns:oai_dc", constants::OAI_DC_NS));
    root.push_attribute(("xmlns:dc", constants::DC_NS));
    root.push_attribute(("xmlns:xsi", constants::XSI_NS));
    root.push_attribute(("xsi:schemaLocation", constants::OAI_DC_SCHEMA_LOCATION));
    writer.write_event(XmlEvent::Start(root))?;

    text_element(&mut writer, "dc:identifier", &person.id)?;

    // Title only when both name parts exist; a lone last name is not a title
    if let Some(first_name) = &person.first_name {
        let title = format!("{} {}", first_name, person.last_name);
        text_element(&mut writer, "dc:title", &title)?;
    }

    text_element(&mut writer, "dc:creator", constants::CREATOR)?;

    if person.is_youth {
        text_element(&mut writer, "dc:subject", "jugendlich")?;
    }
    if let Some(biography) = &person.biography_text {
        text_element(&mut writer, "dc:description", biography)?;
    }
    if let Some(memorial_sign) = &person.memorial_sign {
        text_element(&mut writer, "dc:relation", memorial_sign)?;
    }
    if let Some(birth_date) = &person.birth_date {
        text_element(&mut writer, "dc:date", birth_date)?;
    }

    text_element(&mut writer, "dc:language", constants::LANGUAGE)?;
    text_element(&mut writer, "dc:publisher", constants::PUBLISHER)?;
    text_element(&mut writer, "dc:rights", constants::RIGHTS)?;

    writer.write_event(XmlEvent::End(BytesEnd::new("oai_dc:dc")))?;

    Ok(String::from_utf8(writer.into_inner())?)
}
