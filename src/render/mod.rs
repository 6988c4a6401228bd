//! Renderers for the five artifacts making up one digital object.
//!
//! Every renderer is a pure function from domain records to the final byte
//! content of one file; nothing here touches the filesystem. The orchestrator
//! decides where the rendered artifacts go.

pub mod datastreams;
pub mod dublin_core;
pub mod object_csv;
pub mod rdf;
pub mod search;

use std::io::Write;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event as XmlEvent};
use quick_xml::Writer;

use crate::error::Result;

/// Mimetype recorded for a datastream, derived from the file name alone.
pub fn mimetype_for(file_name: &str) -> &'static str {
    if file_name.ends_with(".xml") {
        "application/xml"
    } else {
        "text/plain"
    }
}

/// Writes `<name>text</name>`, escaping the text content.
pub(crate) fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(XmlEvent::Start(BytesStart::new(name)))?;
    writer.write_event(XmlEvent::Text(BytesText::new(text)))?;
    writer.write_event(XmlEvent::End(BytesEnd::new(name)))?;
    Ok(())
}
