use serde::Deserialize;

use crate::errors::ParserError;
use crate::model::StudentRecord;
use crate::registry::RecordReader;

use super::{ensure_finite, parse_measurement};

/// JSON files holding one object per student, either as a top-level array or
/// as newline-delimited objects.
pub struct StructuredReader;

impl Default for StructuredReader {
    fn default() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Height")]
    height: Measurement,
    #[serde(rename = "Weight")]
    weight: Measurement,
}

// Some exports quote their numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Measurement {
    Number(f64),
    Text(String),
}

impl Measurement {
    fn resolve(self, record: usize, field: &str) -> Result<f64, ParserError> {
        match self {
            Measurement::Number(value) => {
                ensure_finite(StructuredReader::NAME, record, field, value)
            }
            Measurement::Text(text) => {
                parse_measurement(StructuredReader::NAME, record, field, &text)
            }
        }
    }
}

impl RawRecord {
    fn into_record(self, record: usize) -> Result<StudentRecord, ParserError> {
        Ok(StudentRecord {
            name: self.name,
            height: self.height.resolve(record, "Height")?,
            weight: self.weight.resolve(record, "Weight")?,
        })
    }
}

impl StructuredReader {
    const NAME: &'static str = "STRUCTURED";

    fn json_error(source: serde_json::Error) -> ParserError {
        ParserError::Json {
            reader: Self::NAME,
            source,
        }
    }
}

impl RecordReader for StructuredReader {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn parse(&self, content: &str) -> Result<Vec<StudentRecord>, ParserError> {
        let trimmed = content.trim_start();
        let raw: Vec<RawRecord> = if trimmed.is_empty() {
            Vec::new()
        } else if trimmed.starts_with('[') {
            serde_json::from_str(trimmed).map_err(Self::json_error)?
        } else {
            serde_json::Deserializer::from_str(trimmed)
                .into_iter::<RawRecord>()
                .collect::<Result<Vec<_>, _>>()
                .map_err(Self::json_error)?
        };

        raw.into_iter()
            .enumerate()
            .map(|(index, record)| record.into_record(index + 1))
            .collect()
    }
}
