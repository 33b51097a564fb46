use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use student_etl_core::config::EtlConfig;
use student_etl_core::normalize::normalize;
use student_etl_core::pipeline::{print_table, Pipeline, RunOptions};
use student_etl_core::sink::PostgresSink;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Student profile ETL job", long_about = None)]
struct Cli {
    /// Emit diagnostics as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract, normalize and load into the destination table
    Run(RunArgs),
    /// Extract and normalize, then print the table without loading it
    Extract(ConfigArgs),
}

#[derive(Args, Debug, Default)]
struct ConfigArgs {
    /// TOML file overriding the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory scanned for .csv, .json and .xml input files
    #[arg(long)]
    input_dir: Option<PathBuf>,
    /// Destination table to replace
    #[arg(long)]
    table: Option<String>,
    /// Progress log file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
struct RunArgs {
    #[command(flatten)]
    config: ConfigArgs,
    /// Skip the load phase
    #[arg(long)]
    dry_run: bool,
    /// Do not print the normalized table
    #[arg(long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.command {
        Command::Run(args) => handle_run(args).await,
        Command::Extract(args) => handle_extract(args),
    }
}

fn init_tracing(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn handle_run(args: RunArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    let sink = PostgresSink::new(config.connection.clone());
    let pipeline = Pipeline::new(config).context("invalid ETL configuration")?;

    let options = RunOptions {
        dry_run: args.dry_run,
        print_table: !args.quiet,
    };
    let report = pipeline.run(&sink, options).await?;

    info!(
        files = report.files.len(),
        rows_extracted = report.rows_extracted,
        rows_loaded = ?report.rows_loaded,
        table = %pipeline.config().destination_table,
        "ETL run finished"
    );
    Ok(())
}

fn handle_extract(args: ConfigArgs) -> Result<()> {
    let config = load_config(&args)?;
    let pipeline = Pipeline::new(config).context("invalid ETL configuration")?;

    let collection = pipeline.extract()?;
    for file in &collection.files {
        info!(path = %file.path.display(), reader = file.reader, rows = file.rows, "Read input file");
    }
    print_table(&normalize(collection.table))?;
    Ok(())
}

fn load_config(args: &ConfigArgs) -> Result<EtlConfig> {
    dotenvy::dotenv().ok();

    let mut config = match &args.config {
        Some(path) => EtlConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => EtlConfig::default(),
    };
    config.apply_env(|key| env::var(key).ok());
    apply_overrides(&mut config, args);
    Ok(config)
}

fn apply_overrides(config: &mut EtlConfig, args: &ConfigArgs) {
    if let Some(dir) = &args.input_dir {
        config.input_directory = dir.clone();
    }
    if let Some(table) = &args.table {
        config.destination_table = table.clone();
    }
    if let Some(log_file) = &args.log_file {
        config.log_path = log_file.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_flags() {
        let cli = Cli::try_parse_from([
            "student-etl",
            "run",
            "--input-dir",
            "incoming",
            "--table",
            "student_profile_v2",
            "--dry-run",
        ])
        .expect("valid arguments");

        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert!(args.dry_run);
        assert!(!args.quiet);
        assert_eq!(args.config.input_dir, Some(PathBuf::from("incoming")));
        assert_eq!(args.config.table.as_deref(), Some("student_profile_v2"));
    }

    #[test]
    fn log_json_is_global() {
        let cli = Cli::try_parse_from(["student-etl", "extract", "--log-json"])
            .expect("valid arguments");
        assert!(cli.log_json);
        assert!(matches!(cli.command, Command::Extract(_)));
    }

    #[test]
    fn requires_a_subcommand() {
        assert!(Cli::try_parse_from(["student-etl"]).is_err());
    }

    #[test]
    fn overrides_replace_config_values() {
        let mut config = EtlConfig::default();
        let args = ConfigArgs {
            input_dir: Some(PathBuf::from("/data/in")),
            log_file: Some(PathBuf::from("/var/log/etl.txt")),
            ..ConfigArgs::default()
        };
        apply_overrides(&mut config, &args);

        assert_eq!(config.input_directory, PathBuf::from("/data/in"));
        assert_eq!(config.log_path, PathBuf::from("/var/log/etl.txt"));
        assert_eq!(config.destination_table, "student_profile");
    }
}
