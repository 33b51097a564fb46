use async_trait::async_trait;
use sqlx::postgres::PgConnection;
use sqlx::Connection;
use tracing::info;

use crate::config::{validate_table_name, ConnectionParams};
use crate::db;
use crate::error::Result;
use crate::table::UnifiedTable;

/// Destination for a finished table. Implementations replace whatever the
/// named table held before; they never append or merge.
#[async_trait]
pub trait TableSink: Send + Sync {
    /// Returns the number of rows written.
    async fn replace(&self, table_name: &str, table: &UnifiedTable) -> Result<u64>;
}

pub struct PostgresSink {
    params: ConnectionParams,
}

impl PostgresSink {
    pub fn new(params: ConnectionParams) -> Self {
        Self { params }
    }
}

#[async_trait]
impl TableSink for PostgresSink {
    async fn replace(&self, table_name: &str, table: &UnifiedTable) -> Result<u64> {
        let identifier = quote_identifier(table_name)?;

        let mut connection = db::connect(&self.params).await?;
        let inserted = replace_rows(&mut connection, &identifier, table).await?;
        connection.close().await?;

        info!(table = table_name, rows = inserted, "Replaced destination table");
        Ok(inserted)
    }
}

/// Drops, recreates and fills the table inside one transaction, so a failure
/// part way through leaves the previous contents in place.
pub async fn replace_rows(
    connection: &mut PgConnection,
    identifier: &str,
    table: &UnifiedTable,
) -> Result<u64> {
    let mut tx = connection.begin().await?;

    sqlx::query(&format!("DROP TABLE IF EXISTS {identifier}"))
        .execute(&mut *tx)
        .await?;

    sqlx::query(&format!(
        r#"
        CREATE TABLE {identifier} (
            "Name" TEXT,
            "Height" DOUBLE PRECISION,
            "Weight" DOUBLE PRECISION
        )
        "#
    ))
    .execute(&mut *tx)
    .await?;

    let insert = format!(
        r#"INSERT INTO {identifier} ("Name", "Height", "Weight") VALUES ($1, $2, $3)"#
    );
    let mut inserted = 0u64;
    for record in table {
        let result = sqlx::query(&insert)
            .bind(&record.name)
            .bind(record.height)
            .bind(record.weight)
            .execute(&mut *tx)
            .await?;
        inserted += result.rows_affected();
    }

    tx.commit().await?;
    Ok(inserted)
}

pub fn quote_identifier(name: &str) -> Result<String> {
    validate_table_name(name)?;
    Ok(format!("\"{name}\""))
}
