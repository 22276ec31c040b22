//! PostgreSQL user store implementation.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::{User, UserStore, UserStoreError, UserStoreResult};

/// Settings for the bounded connection pool.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    /// Maximum number of live connections.
    pub max_connections: u32,
    /// Upper bound on waiting for a pooled connection.
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 20,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

/// User store backed by a PostgreSQL connection pool.
///
/// The pool keeps at least one connection open and never grows past the
/// configured maximum; an acquire that cannot be satisfied within the
/// configured timeout fails instead of waiting forever. Connections are
/// checked out per statement and returned on every exit path, including
/// errors.
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Connects to the database and ensures the `users` table exists.
    ///
    /// A connection failure here is meant to be fatal to the caller; there
    /// is no lazy reconnect.
    pub async fn connect(database_url: &str, settings: PoolSettings) -> UserStoreResult<Self> {
        let pool = PgPoolOptions::new()
            .min_connections(1)
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect(database_url)
            .await?;

        tracing::info!(
            max_connections = settings.max_connections,
            "Connected to PostgreSQL"
        );

        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Ensures the `users` table exists. Idempotent, not a migration system.
    async fn ensure_schema(&self) -> UserStoreResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (
                id SERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list_users(&self) -> UserStoreResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT id, name, email FROM users")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn add_user(&self, name: &str, email: &str) -> UserStoreResult<()> {
        sqlx::query(
            "INSERT INTO users (name, email) VALUES ($1, $2) ON CONFLICT (email) DO NOTHING",
        )
        .bind(name)
        .bind(email)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_user(&self, id: i32, name: &str, email: &str) -> UserStoreResult<()> {
        let result = sqlx::query("UPDATE users SET name = $1, email = $2 WHERE id = $3")
            .bind(name)
            .bind(email)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::not_found("User", id.to_string()));
        }
        Ok(())
    }

    async fn delete_user(&self, id: i32) -> UserStoreResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::not_found("User", id.to_string()));
        }
        Ok(())
    }

    async fn count_users(&self) -> UserStoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn search_users(&self, query: &str) -> UserStoreResult<Vec<User>> {
        let pattern = format!("%{query}%");
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, email FROM users WHERE name ILIKE $1 OR email ILIKE $1",
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }
}
