use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV decoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML writing failed: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UTF-8 conversion failed: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("data source error: {0}")]
    Source(String),

    #[error("row {row}: missing or invalid required field '{field}'")]
    Validation { row: String, field: String },

    #[error("row {row}: duplicate id '{id}'")]
    DuplicateId { row: String, id: String },

    #[error("row {row}: malformed date '{value}' in field '{field}' (expected dd.mm.yyyy)")]
    MalformedDate {
        row: String,
        field: String,
        value: String,
    },

    #[error("object {object_id}: failed to write '{file_name}': {source}")]
    Render {
        object_id: String,
        file_name: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, MemoError>;
