//! Schema creation and the default account seed

use sqlx::SqlitePool;

use crate::auth::password::hash_password;
use crate::error::Result;

/// Username of the account seeded on an empty database
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
/// Password of the seeded account; change it after first login
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL
)
"#;

const CREATE_EMPLOYEES: &str = r#"
CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT UNIQUE NOT NULL,
    department TEXT NOT NULL,
    salary REAL NOT NULL
)
"#;

/// Create both tables if missing and seed the default admin account.
///
/// Safe to run on every startup: the seed is keyed on the username and the
/// insert ignores a concurrent duplicate.
pub async fn bootstrap(pool: &SqlitePool, password_cost: u32) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query(CREATE_USERS).execute(&mut *tx).await?;
    sqlx::query(CREATE_EMPLOYEES).execute(&mut *tx).await?;

    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE username = ?")
        .bind(DEFAULT_ADMIN_USERNAME)
        .fetch_optional(&mut *tx)
        .await?;

    if existing.is_none() {
        let hash = hash_password(DEFAULT_ADMIN_PASSWORD, password_cost)?;
        sqlx::query("INSERT OR IGNORE INTO users (username, password) VALUES (?, ?)")
            .bind(DEFAULT_ADMIN_USERNAME)
            .bind(hash)
            .execute(&mut *tx)
            .await?;
        tracing::warn!(
            "Seeded default account '{}'; change its password",
            DEFAULT_ADMIN_USERNAME
        );
    }

    tx.commit().await?;
    Ok(())
}
