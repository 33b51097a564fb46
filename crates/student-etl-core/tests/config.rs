use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use student_etl_core::config::{EtlConfig, PASSWORD_VAR};
use student_etl_core::error::PipelineError;

#[test]
fn defaults_target_student_profile_table() {
    let config = EtlConfig::default();
    assert_eq!(config.input_directory, PathBuf::from("Data_Files"));
    assert_eq!(config.destination_table, "student_profile");
    assert_eq!(config.log_path, PathBuf::from("log_file.txt"));
    assert_eq!(config.connection.database, "HopeView_Academy_Data");
    assert_eq!(config.connection.port, 5432);
    assert!(config.validate().is_ok());
}

#[test]
fn partial_toml_keeps_defaults() -> Result<()> {
    let config = EtlConfig::from_toml_str(
        r#"
        input_directory = "/srv/etl/incoming"

        [connection]
        host = "db.internal"
        port = 6543
        "#,
    )?;
    assert_eq!(config.input_directory, PathBuf::from("/srv/etl/incoming"));
    assert_eq!(config.destination_table, "student_profile");
    assert_eq!(config.connection.host, "db.internal");
    assert_eq!(config.connection.port, 6543);
    assert_eq!(config.connection.user, "postgres");
    Ok(())
}

#[test]
fn loads_from_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("etl.toml");
    fs::write(&path, "destination_table = \"student_profile_v2\"\nlog_path = \"etl.log\"\n")?;

    let config = EtlConfig::from_file(&path)?;
    assert_eq!(config.destination_table, "student_profile_v2");
    assert_eq!(config.log_path, PathBuf::from("etl.log"));
    Ok(())
}

#[test]
fn rejects_unknown_keys() {
    let err = EtlConfig::from_toml_str("input_dir = \"typo\"\n").expect_err("unknown key");
    assert!(matches!(err, PipelineError::Toml(_)));
}

#[test]
fn rejects_invalid_table_name() {
    let err = EtlConfig::from_toml_str("destination_table = \"drop me\"\n")
        .expect_err("invalid table name");
    assert!(matches!(err, PipelineError::Config(_)));
}

#[test]
fn environment_overrides_connection() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("STUDENT_ETL_DATABASE_URL", "postgres://etl@db/roster"),
        (PASSWORD_VAR, "s3cret"),
    ]);
    let mut config = EtlConfig::default();
    config.apply_env(|key| env.get(key).map(|v| v.to_string()));

    assert_eq!(
        config.connection.url.as_deref(),
        Some("postgres://etl@db/roster")
    );
    assert_eq!(config.connection.password.as_deref(), Some("s3cret"));
}

#[test]
fn database_url_wins_over_prefixed_variable() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("DATABASE_URL", "postgres://primary/db"),
        ("STUDENT_ETL_DATABASE_URL", "postgres://secondary/db"),
    ]);
    let mut config = EtlConfig::default();
    config.apply_env(|key| env.get(key).map(|v| v.to_string()));
    assert_eq!(config.connection.url.as_deref(), Some("postgres://primary/db"));
}

#[test]
fn empty_environment_changes_nothing() {
    let mut config = EtlConfig::default();
    config.apply_env(|_| None);
    assert_eq!(config, EtlConfig::default());
}
