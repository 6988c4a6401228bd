//! RDF/XML rendering (`RDF.xml`): one person node plus one node per linked
//! event, all inside a single `rdf:RDF` document.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event as XmlEvent};
use quick_xml::Writer;

use super::text_element;
use crate::constants;
use crate::domain::{Event, Person};
use crate::error::Result;

pub fn render(person: &Person, events: &[&Event]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(XmlEvent::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("rdf:RDF");
    root.push_attribute(("xmlns:rdf", constants::RDF_NS));
    root.push_attribute(("xmlns:rdfs", constants::RDFS_NS));
    root.push_attribute(("xmlns:dc", constants::DC_NS));
    root.push_attribute(("xmlns:foaf", constants::FOAF_NS));
    root.push_attribute(("xmlns:wgs84_pos", constants::WGS84_POS_NS));
    root.push_attribute(("xmlns:memo", constants::MEMO_NS));
    writer.write_event(XmlEvent::Start(root))?;

    write_person_node(&mut writer, person)?;
    for event in events {
        write_event_node(&mut writer, person, event)?;
    }

    writer.write_event(XmlEvent::End(BytesEnd::new("rdf:RDF")))?;

    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_person_node<W: Write>(writer: &mut Writer<W>, person: &Person) -> Result<()> {
    let uri = constants::object_uri(&person.id);
    let mut node = BytesStart::new("rdf:Description");
    node.push_attribute(("rdf:about", uri.as_str()));
    writer.write_event(XmlEvent::Start(node))?;

    resource_element(writer, "rdf:type", &format!("{}Person", constants::FOAF_NS))?;
    text_element(writer, "foaf:name", &person.display_name())?;
    text_element(writer, "foaf:familyName", &person.last_name)?;
    if let Some(first_name) = &person.first_name {
        text_element(writer, "foaf:givenName", first_name)?;
    }
    if let Some(birth_place) = &person.birth_place {
        text_element(writer, "foaf:based_near", birth_place)?;
    }
    if let Some(birth_date) = &person.birth_date {
        text_element(writer, "foaf:birthday", birth_date)?;
    }

    writer.write_event(XmlEvent::End(BytesEnd::new("rdf:Description")))?;
    Ok(())
}

fn write_event_node<W: Write>(writer: &mut Writer<W>, person: &Person, event: &Event) -> Result<()> {
    let uri = constants::event_uri(&person.id, &event.id);
    let mut node = BytesStart::new("rdf:Description");
    node.push_attribute(("rdf:about", uri.as_str()));
    writer.write_event(XmlEvent::Start(node))?;

    resource_element(writer, "rdf:type", &format!("{}Event", constants::MEMO_NS))?;
    resource_element(writer, "rdf:type", &format!("{}Point", constants::WGS84_POS_NS))?;

    if let Some(latt) = event.latt {
        typed_element(writer, "wgs84_pos:lat", constants::XSD_FLOAT, &latt.to_string())?;
    }
    if let Some(long) = event.long {
        typed_element(writer, "wgs84_pos:long", constants::XSD_FLOAT, &long.to_string())?;
    }
    if let Some(title) = &event.title {
        text_element(writer, "rdfs:label", title)?;
    }
    if let Some(description) = &event.description {
        text_element(writer, "dc:description", description)?;
    }
    if let Some(start_date) = &event.start_date {
        text_element(writer, "memo:startDate", start_date)?;
    }
    if let Some(end_date) = &event.end_date {
        text_element(writer, "memo:endDate", end_date)?;
    }
    for category in &event.categories {
        text_element(writer, "memo:category", category)?;
    }
    if let Some(location) = &event.location {
        text_element(writer, "memo:location", location)?;
    }
    text_element(writer, "dc:creator", constants::CREATOR)?;
    text_element(writer, "dc:rights", constants::RIGHTS)?;
    resource_element(
        writer,
        "memo:describesPerson",
        &constants::object_uri(&person.id),
    )?;

    writer.write_event(XmlEvent::End(BytesEnd::new("rdf:Description")))?;
    Ok(())
}

/// Writes `<name rdf:resource="uri"/>`.
fn resource_element<W: Write>(writer: &mut Writer<W>, name: &str, uri: &str) -> Result<()> {
    let mut element = BytesStart::new(name);
    element.push_attribute(("rdf:resource", uri));
    writer.write_event(XmlEvent::Empty(element))?;
    Ok(())
}

/// Writes `<name rdf:datatype="datatype">text</name>`.
fn typed_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    datatype: &str,
    text: &str,
) -> Result<()> {
    let mut element = BytesStart::new(name);
    element.push_attribute(("rdf:datatype", datatype));
    writer.write_event(XmlEvent::Start(element))?;
    writer.write_event(XmlEvent::Text(BytesText::new(text)))?;
    writer.write_event(XmlEvent::End(BytesEnd::new(name)))?;
    Ok(())
}
