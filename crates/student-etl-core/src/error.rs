// crates/student-etl-core/src/error.rs

use student_etl_parser::ParserError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to parse input file: {0}")]
    Parse(#[from] ParserError),

    #[error("Database operation failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Invalid input file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Failed to enumerate input files: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
