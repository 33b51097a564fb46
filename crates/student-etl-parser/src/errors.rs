use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("{reader} failed to read {}: {source}", path.display())]
    Io {
        reader: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{reader} CSV error: {source}")]
    Csv {
        reader: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("{reader} JSON error: {source}")]
    Json {
        reader: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{reader} XML error at byte {position}: {source}")]
    Xml {
        reader: &'static str,
        position: usize,
        #[source]
        source: quick_xml::Error,
    },

    #[error("{reader} document is malformed: {message}")]
    Malformed {
        reader: &'static str,
        message: String,
    },

    #[error("{reader} header is missing required column '{column}'")]
    MissingColumn {
        reader: &'static str,
        column: &'static str,
    },

    #[error("{reader} record {record} is missing required field '{field}'")]
    MissingField {
        reader: &'static str,
        record: usize,
        field: &'static str,
    },

    #[error("{reader} record {record} invalid: {message}")]
    DataRow {
        reader: &'static str,
        record: usize,
        message: String,
    },
}
