//! Read access to login accounts

use sqlx::SqlitePool;

use crate::auth::User;
use crate::error::Result;

#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Unique lookup by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let mut conn = self.pool.acquire().await?;
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(user)
    }

    /// Number of accounts with the given username
    pub async fn count_named(&self, username: &str) -> Result<i64> {
        let mut conn = self.pool.acquire().await?;
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(&mut *conn)
            .await?;
        Ok(count)
    }
}
