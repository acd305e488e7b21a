use sqlx::{mysql::MySqlPoolOptions, Error, Executor, MySqlPool};
use thiserror::Error;

use crate::config::Config;

pub mod memory;
pub mod models;
pub mod mysql;
pub mod store;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;
pub use store::{StoreError, SubmissionStore};

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Invalid database name: {0}")]
    InvalidName(String),
    #[error("Database error: {0}")]
    Sqlx(#[from] Error),
    #[error("Failed to create database: {0}")]
    CreateDb(String),
    #[error("Failed to create table {table}: {source}")]
    CreateTable {
        table: &'static str,
        #[source]
        source: Error,
    },
}

const SCHEMA: [(&str, &str); 3] = [
    (
        "consultations",
        "CREATE TABLE IF NOT EXISTS consultations (
            id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            contact VARCHAR(255) NOT NULL,
            problem TEXT NOT NULL,
            date VARCHAR(64) NOT NULL,
            message TEXT NULL
        )",
    ),
    (
        "feedbacks",
        "CREATE TABLE IF NOT EXISTS feedbacks (
            id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
            name VARCHAR(255) NULL,
            location VARCHAR(255) NULL,
            rating DOUBLE NULL,
            message TEXT NULL
        )",
    ),
    (
        "appointments",
        "CREATE TABLE IF NOT EXISTS appointments (
            id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            contact VARCHAR(255) NOT NULL,
            problem TEXT NOT NULL,
            date VARCHAR(64) NOT NULL,
            doctorName VARCHAR(255) NOT NULL,
            doctorRole VARCHAR(255) NOT NULL
        )",
    ),
];

/// Opens the shared connection pool, creating the database and its tables
/// when they are missing.
///
/// Parameters:
/// - `config`: Connection settings. `db_name` must be a plain identifier since
///   it is spliced into `CREATE DATABASE`.
///
/// The function performs the following steps:
/// 1. Connects to the server without selecting a database.
/// 2. Creates `db_name` if it does not exist, then drops that connection.
/// 3. Opens the main pool of `db_pool_size` connections on `db_name`.
/// 4. Creates the `consultations`, `feedbacks` and `appointments` tables if
///    they are missing. Existing tables are left untouched.
///
/// Returns:
/// - `Ok(MySqlPool)` ready to be shared by every request.
/// - `Err(DatabaseError)` naming the step that failed.
pub async fn init_db(config: &Config) -> Result<MySqlPool, DatabaseError> {
    let db_name = checked_name(&config.db_name)?;

    let temp_pool = MySqlPoolOptions::new()
        .max_connections(1)
        .connect_with(config.server_options())
        .await
        .map_err(DatabaseError::Sqlx)?;

    ensure_database_exists(&temp_pool, db_name).await?;
    temp_pool.close().await;

    let pool = MySqlPoolOptions::new()
        .max_connections(config.db_pool_size)
        .connect_with(config.database_options())
        .await
        .map_err(DatabaseError::Sqlx)?;

    ensure_schema(&pool).await?;

    log::info!(
        "Connected to database {} on {}:{} (pool size {})",
        config.db_name,
        config.db_host,
        config.db_port,
        config.db_pool_size
    );
    Ok(pool)
}

/// The database name ends up inside a DDL statement, where it cannot be bound.
fn checked_name(db_name: &str) -> Result<&str, DatabaseError> {
    let valid = !db_name.is_empty()
        && db_name.len() <= 64
        && db_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    if valid {
        Ok(db_name)
    } else {
        Err(DatabaseError::InvalidName(db_name.to_string()))
    }
}

async fn ensure_database_exists(pool: &MySqlPool, db_name: &str) -> Result<(), DatabaseError> {
    let db_exists: i64 = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM information_schema.schemata WHERE schema_name = ?)",
    )
    .bind(db_name)
    .fetch_one(pool)
    .await
    .map_err(DatabaseError::Sqlx)?;

    if db_exists == 0 {
        log::info!("Creating database {}", db_name);
        pool.execute(format!("CREATE DATABASE `{}`", db_name).as_str())
            .await
            .map_err(|e| DatabaseError::CreateDb(e.to_string()))?;
    }

    Ok(())
}

async fn ensure_schema(pool: &MySqlPool) -> Result<(), DatabaseError> {
    for (table, ddl) in SCHEMA {
        pool.execute(ddl)
            .await
            .map_err(|source| DatabaseError::CreateTable { table, source })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        assert_eq!(checked_name("clinic_db").unwrap(), "clinic_db");
    }

    #[test]
    fn rejects_names_that_would_escape_the_identifier() {
        assert!(matches!(
            checked_name("clinic`; DROP DATABASE x; --"),
            Err(DatabaseError::InvalidName(_))
        ));
        assert!(checked_name("").is_err());
    }
}
