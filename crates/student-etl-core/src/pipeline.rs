use tracing::info;

use crate::collector::{collect_with_report, Collection, FileReport};
use crate::config::EtlConfig;
use crate::error::Result;
use crate::normalize::normalize;
use crate::progress_log::ProgressLog;
use crate::sink::TableSink;
use crate::table::UnifiedTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Stop after the transform phase without touching the destination.
    pub dry_run: bool,
    /// Print the normalized table to stdout before loading.
    pub print_table: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            print_table: true,
        }
    }
}

#[derive(Debug)]
pub struct RunReport {
    pub files: Vec<FileReport>,
    pub rows_extracted: usize,
    /// `None` when loading was skipped.
    pub rows_loaded: Option<u64>,
    pub table: UnifiedTable,
}

/// The extract → transform → load sequence, with a progress log line at
/// every phase boundary. Any error ends the run immediately.
#[derive(Debug)]
pub struct Pipeline {
    config: EtlConfig,
    log: ProgressLog,
}

impl Pipeline {
    pub fn new(config: EtlConfig) -> Result<Self> {
        config.validate()?;
        let log = ProgressLog::new(config.log_path.clone());
        Ok(Self { config, log })
    }

    pub fn config(&self) -> &EtlConfig {
        &self.config
    }

    pub fn extract(&self) -> Result<Collection> {
        collect_with_report(&self.config.input_directory)
    }

    pub async fn run(&self, sink: &dyn TableSink, options: RunOptions) -> Result<RunReport> {
        self.log.record("ETL process starting...")?;

        self.log.record("Extraction phase started")?;
        let Collection { table, files } = self.extract()?;
        let rows_extracted = table.len();
        info!(
            files = files.len(),
            rows = rows_extracted,
            "Extracted student records"
        );
        self.log.record("Extraction phase completed")?;

        self.log.record("Beginning of Transformation Phase")?;
        let table = normalize(table);
        if options.print_table {
            print_table(&table)?;
        }
        self.log.record("End of Transformation Phase")?;

        let rows_loaded = if options.dry_run {
            self.log.record("Loading skipped (dry run)")?;
            None
        } else {
            self.log.record("Initializing Loading Phase")?;
            let loaded = sink
                .replace(&self.config.destination_table, &table)
                .await?;
            self.log.record("Loading Completed")?;
            Some(loaded)
        };

        self.log.record("ETL Job Completed Successfully")?;

        Ok(RunReport {
            files,
            rows_extracted,
            rows_loaded,
            table,
        })
    }
}

pub fn print_table(table: &UnifiedTable) -> Result<()> {
    let df = table.to_dataframe()?;
    println!("Below is the transformed data: ");
    println!("{df}");
    Ok(())
}
