// crates/student-etl-core/src/db.rs

use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;

use crate::config::ConnectionParams;
use crate::error::Result;

/// Builds connection options from the configured parameters, preferring a
/// full connection URL when one is present.
pub fn connect_options(params: &ConnectionParams) -> Result<PgConnectOptions> {
    if let Some(url) = params.url.as_deref() {
        return Ok(url.parse::<PgConnectOptions>()?);
    }

    let mut options = PgConnectOptions::new()
        .host(&params.host)
        .port(params.port)
        .username(&params.user)
        .database(&params.database);
    if let Some(password) = params.password.as_deref() {
        options = options.password(password);
    }
    Ok(options)
}

/// Opens a single dedicated connection. Callers close it when done; nothing
/// is pooled between runs.
pub async fn connect(params: &ConnectionParams) -> Result<PgConnection> {
    let options = connect_options(params)?;
    let connection = PgConnection::connect_with(&options).await?;
    Ok(connection)
}
