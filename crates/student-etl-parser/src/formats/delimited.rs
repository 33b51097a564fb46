use csv::{ReaderBuilder, Trim};

use crate::errors::ParserError;
use crate::model::{StudentRecord, COLUMNS};
use crate::registry::RecordReader;

use super::ensure_finite;

/// Comma-separated files with a `Name,Height,Weight` header row.
pub struct DelimitedReader;

impl Default for DelimitedReader {
    fn default() -> Self {
        Self
    }
}

impl DelimitedReader {
    const NAME: &'static str = "DELIMITED";

    fn reader_builder() -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder.has_headers(true).trim(Trim::All);
        builder
    }
}

impl RecordReader for DelimitedReader {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn extension(&self) -> &'static str {
        "csv"
    }

    fn parse(&self, content: &str) -> Result<Vec<StudentRecord>, ParserError> {
        let mut reader = Self::reader_builder().from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|source| ParserError::Csv {
                reader: Self::NAME,
                source,
            })?
            .clone();
        for column in COLUMNS {
            if !headers.iter().any(|header| header == column) {
                return Err(ParserError::MissingColumn {
                    reader: Self::NAME,
                    column,
                });
            }
        }

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<StudentRecord>().enumerate() {
            let record = row.map_err(|source| ParserError::Csv {
                reader: Self::NAME,
                source,
            })?;
            let line_index = index + 1;
            ensure_finite(Self::NAME, line_index, "Height", record.height)?;
            ensure_finite(Self::NAME, line_index, "Weight", record.weight)?;
            records.push(record);
        }

        Ok(records)
    }
}
