use std::fs;
use std::path::Path;

use crate::errors::ParserError;
use crate::formats::{DelimitedReader, HierarchicalReader, StructuredReader};
use crate::model::StudentRecord;

/// A format-specific reader that turns one input file into student rows.
pub trait RecordReader: Send + Sync {
    fn name(&self) -> &'static str;

    /// File extension (without the dot) this reader is responsible for.
    fn extension(&self) -> &'static str;

    fn parse(&self, content: &str) -> Result<Vec<StudentRecord>, ParserError>;

    fn read(&self, path: &Path) -> Result<Vec<StudentRecord>, ParserError> {
        let content = fs::read_to_string(path).map_err(|source| ParserError::Io {
            reader: self.name(),
            path: path.to_path_buf(),
            source,
        })?;
        self.parse(&content)
    }
}

/// Every supported reader, in the order their files are collected.
pub fn all_readers() -> [&'static dyn RecordReader; 3] {
    [&DelimitedReader, &StructuredReader, &HierarchicalReader]
}
