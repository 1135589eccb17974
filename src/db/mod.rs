//! SQLite persistence: connection pool, schema bootstrap, and table access

pub mod employees;
pub mod schema;
pub mod users;

pub use employees::EmployeeStore;
pub use schema::{bootstrap, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME};
pub use users::UserStore;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::time::Duration;

use crate::config::{AuthConfig, DatabaseConfig};
use crate::error::Result;

/// Open a connection pool on the configured database file, creating it if needed
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(&config.path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    tracing::debug!("Opened database at {}", config.path.display());
    Ok(pool)
}

/// Connect and make sure the schema and default account exist
pub async fn open(database: &DatabaseConfig, auth: &AuthConfig) -> Result<SqlitePool> {
    let pool = connect(database).await?;
    bootstrap(&pool, auth.password_cost).await?;
    Ok(pool)
}
