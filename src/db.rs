use std::str::FromStr;

use sea_orm::{
    ConnectionTrait, DatabaseConnection, SqlxSqliteConnector, Statement, TransactionTrait,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::StoreResult;

const SCHEMA_SQL: &str = include_str!("../migrations/0001_schema.sql");

/// Open the SQLite file behind `database_url` as a single long-lived connection.
///
/// The pool is capped at one connection that is never reaped, so an
/// in-memory database (`sqlite::memory:`) lives as long as the handle.
pub async fn create_orm_conn(database_url: &str) -> StoreResult<DatabaseConnection> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    tracing::debug!(database_url, "sqlite connection opened");
    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

/// Create the four tables if they are absent. Every statement is
/// `IF NOT EXISTS`, so this runs on each startup.
pub async fn ensure_schema(conn: &DatabaseConnection) -> StoreResult<()> {
    let txn = conn.begin().await?;
    let backend = txn.get_database_backend();

    // Prepared statements carry one command each, so split the script.
    for stmt in SCHEMA_SQL.split(';') {
        let stmt = stmt.trim();
        if stmt.is_empty() {
            continue;
        }
        txn.execute(Statement::from_string(backend, format!("{stmt};")))
            .await?;
    }

    txn.commit().await?;
    Ok(())
}
