//! Fixed strings shared by the id scheme and the renderers.
//!
//! The creator/rights values are stamped verbatim into every artifact of a
//! digital object; the namespace URIs are the ones declared by the XML
//! renderers.

// Default project abbreviation, overridable via config.toml
pub const PROJECT_ABBR: &str = "memo";

// Metadata constants shared across DC.xml, RDF.xml and the CSV manifests
pub const CREATOR: &str = "Born digital - memo project GAMS";
pub const RIGHTS: &str = "Creative Commons BY-NC 4.0";
pub const PUBLISHER: &str = "GAMS - Geisteswissenschaftliches Asset Management System";
pub const LANGUAGE: &str = "de";

/// Affirmative marker in the youth column of the persons sheet
pub const YOUTH_AFFIRMATIVE: &str = "ja";

/// Event type that selects the location block of the search document
pub const DEATH_EVENT_TYPE: &str = "Tod";

// Artifact file names inside a digital-object folder
pub const DUBLIN_CORE_FILE: &str = "DC.xml";
pub const RDF_FILE: &str = "RDF.xml";
pub const SEARCH_FILE: &str = "SEARCH.json";
pub const OBJECT_CSV_FILE: &str = "object.csv";
pub const DATASTREAMS_FILE: &str = "datastreams.csv";

// Repository URIs
pub const OBJECT_BASE_URI: &str = "https://gams.uni-graz.at/";
pub const MEMO_NS: &str = "https://gams.uni-graz.at/memo#";

// XML namespaces declared by the renderers
pub const DC_NS: &str = "http://purl.org/dc/elements/1.1/";
pub const OAI_DC_NS: &str = "http://www.openarchives.org/OAI/2.0/oai_dc/";
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const OAI_DC_SCHEMA_LOCATION: &str =
    "http://www.openarchives.org/OAI/2.0/oai_dc/ http://www.openarchives.org/OAI/2.0/oai_dc.xsd";
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const FOAF_NS: &str = "http://xmlns.com/foaf/0.1/";
pub const WGS84_POS_NS: &str = "http://www.w3.org/2003/01/geo/wgs84_pos#";
pub const XSD_FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";

/// Build a person id from the project abbreviation and the sheet identifier.
pub fn person_id(project_abbr: &str, source_identifier: &str) -> String {
    format!("{}.person.{}", project_abbr, source_identifier)
}

/// Repository URI of a digital object.
pub fn object_uri(object_id: &str) -> String {
    format!("{}{}", OBJECT_BASE_URI, object_id)
}

/// Repository URI of an event attached to a digital object.
pub fn event_uri(object_id: &str, event_id: &str) -> String {
    format!("{}{}/events/{}", OBJECT_BASE_URI, object_id, event_id)
}
