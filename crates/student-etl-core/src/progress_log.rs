use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::error::Result;

/// `2024-Mar-05-14:07:09`
pub const TIMESTAMP_FORMAT: &str = "%Y-%b-%d-%H:%M:%S";

/// Append-only record of pipeline phase transitions.
#[derive(Debug, Clone)]
pub struct ProgressLog {
    path: PathBuf,
}

impl ProgressLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn record(&self, message: &str) -> Result<()> {
        self.record_at(Local::now().naive_local(), message)
    }

    pub fn record_at(&self, at: NaiveDateTime, message: &str) -> Result<()> {
        info!(log_path = %self.path.display(), "{message}");
        let mut writer = LogWriter::open(&self.path)?;
        writer.write_line(&format_line(at, message))?;
        writer.finish()?;
        Ok(())
    }
}

pub fn format_line(at: NaiveDateTime, message: &str) -> String {
    format!("{} {}", at.format(TIMESTAMP_FORMAT), message)
}

/// Holds the log file open for a single write; the handle is released when
/// the writer is dropped, whether or not the write succeeded.
struct LogWriter {
    inner: BufWriter<File>,
}

impl LogWriter {
    fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            inner: BufWriter::new(file),
        })
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.inner, "{line}")
    }

    fn finish(mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
