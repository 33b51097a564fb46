use std::path::{Path, PathBuf};

use glob::{glob_with, MatchOptions, Pattern};
use student_etl_parser::{all_readers, RecordReader};
use tracing::debug;

use crate::error::Result;
use crate::table::UnifiedTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub reader: &'static str,
    pub rows: usize,
}

#[derive(Debug, Default)]
pub struct Collection {
    pub table: UnifiedTable,
    pub files: Vec<FileReport>,
}

/// Reads every supported file directly inside `directory` into one table.
///
/// Files are grouped by format (CSV, then JSON, then XML) and, within a
/// format, visited in path order. A missing directory is treated as empty.
pub fn collect(directory: &Path) -> Result<UnifiedTable> {
    Ok(collect_with_report(directory)?.table)
}

pub fn collect_with_report(directory: &Path) -> Result<Collection> {
    let mut collection = Collection::default();

    for reader in all_readers() {
        for path in matching_files(directory, reader.extension())? {
            read_into(&mut collection, reader, path)?;
        }
    }

    Ok(collection)
}

fn read_into(
    collection: &mut Collection,
    reader: &'static dyn RecordReader,
    path: PathBuf,
) -> Result<()> {
    let records = reader.read(&path)?;
    debug!(
        path = %path.display(),
        reader = reader.name(),
        rows = records.len(),
        "Read input file"
    );

    collection.files.push(FileReport {
        path,
        reader: reader.name(),
        rows: records.len(),
    });
    collection.table.extend(records);
    Ok(())
}

fn matching_files(directory: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let base = if directory.as_os_str().is_empty() {
        Path::new(".")
    } else {
        directory
    };
    let pattern = format!(
        "{}/*.{}",
        Pattern::escape(&base.to_string_lossy()),
        extension
    );
    let options = MatchOptions {
        case_sensitive: false,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let mut paths = Vec::new();
    for entry in glob_with(&pattern, options)? {
        let path = entry?;
        if path.is_file() {
            paths.push(path);
        }
    }
    Ok(paths)
}
