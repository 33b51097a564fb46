use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PipelineError, Result};

pub const DATABASE_URL_VARS: [&str; 2] = ["DATABASE_URL", "STUDENT_ETL_DATABASE_URL"];
pub const PASSWORD_VAR: &str = "STUDENT_ETL_DB_PASSWORD";

// Postgres truncates identifiers longer than this.
const MAX_IDENTIFIER_LEN: usize = 63;

/// Everything one ETL run needs to know about its surroundings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EtlConfig {
    pub input_directory: PathBuf,
    pub destination_table: String,
    pub connection: ConnectionParams,
    pub log_path: PathBuf,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            input_directory: PathBuf::from("Data_Files"),
            destination_table: "student_profile".to_string(),
            connection: ConnectionParams::default(),
            log_path: PathBuf::from("log_file.txt"),
        }
    }
}

impl EtlConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EtlConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Overlays connection settings taken from the environment. `lookup` is
    /// usually `|key| std::env::var(key).ok()`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = DATABASE_URL_VARS.iter().find_map(|key| lookup(*key)) {
            self.connection.url = Some(url);
        }
        if let Some(password) = lookup(PASSWORD_VAR) {
            self.connection.password = Some(password);
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_table_name(&self.destination_table)?;
        if self.log_path.as_os_str().is_empty() {
            return Err(PipelineError::Config("log_path must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Where the destination database lives. A `url` takes precedence over the
/// individual fields.
#[derive(Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: Option<String>,
    pub url: Option<String>,
}

impl Default for ConnectionParams {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "HopeView_Academy_Data".to_string(),
            user: "postgres".to_string(),
            password: None,
            url: None,
        }
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Accepts plain SQL identifiers only; the name is interpolated into DDL.
pub fn validate_table_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !valid_start || !valid_rest || name.len() > MAX_IDENTIFIER_LEN {
        return Err(PipelineError::Config(format!(
            "invalid destination table name '{name}'"
        )));
    }
    Ok(())
}
