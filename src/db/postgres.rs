//! Provides PostgreSQL database interaction functionalities using `sqlx`.
//!
//! Includes capabilities for building a lazily-connecting pool, initializing the `users`
//! table, creating users and looking them up by name.
//! Also contains integration tests for database operations (requires the `integration-tests` feature).

use super::UserStore;
use crate::error::{AppError, Result};
use crate::models::{CreateUserParams, User};
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};
use std::time::Duration;
use tracing::{debug, error, info};

/// Represents the database connection pool and provides methods for database operations.
///
/// Holds a `sqlx::Pool`; no connection is opened until the first query runs.
pub struct Database {
    pool: Pool<Postgres>,
}

impl Database {
    /// Creates a new `Database` instance without contacting the server.
    ///
    /// Commands that never touch the backend (an unknown command name, for instance)
    /// therefore run without a reachable database.
    ///
    /// # Arguments
    ///
    /// * `database_url` - The connection string for the PostgreSQL database.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Persistence` if the connection string cannot be parsed.
    pub fn new(database_url: &str) -> Result<Self> {
        debug!("Configuring database pool");

        let pool = PgPoolOptions::new()
            .max_connections(1) // One command per process, one statement at a time
            .acquire_timeout(Duration::from_secs(10))
            .connect_lazy(database_url)
            .map_err(|e| {
                error!("Invalid database URL: {}", e);
                AppError::persistence("failed to connect to db", e)
            })?;

        Ok(Self { pool })
    }
}

impl UserStore for Database {
    /// Creates the `users` table if it does not exist.
    ///
    /// Idempotent; safe to run on every setup.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Persistence` if the statement fails.
    async fn init_schema(&self) -> Result<()> {
        info!("Initializing database schema (if necessary)...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id UUID PRIMARY KEY,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL,
                name TEXT NOT NULL UNIQUE
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to create users table: {}", e);
            AppError::persistence("couldn't create users table", e)
        })?;

        info!("Database schema initialized successfully");
        Ok(())
    }

    /// Inserts a user row and returns it as stored.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Persistence` on any failure, including the unique constraint on `name`.
    async fn create_user(&self, params: CreateUserParams) -> Result<User> {
        debug!("Inserting user {}", params.name);

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, created_at, updated_at, name)
            VALUES ($1, $2, $3, $4)
            RETURNING id, created_at, updated_at, name
            "#,
        )
        .bind(params.id)
        .bind(params.created_at)
        .bind(params.updated_at)
        .bind(&params.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to insert user {}: {}", params.name, e);
            AppError::persistence("couldn't create user", e)
        })?;

        info!("Created user {} ({})", user.name, user.id);
        Ok(user)
    }

    /// Fetches the user with exactly this name, if any.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Persistence` if the query fails. A missing row is `Ok(None)`.
    async fn get_user(&self, name: &str) -> Result<Option<User>> {
        debug!("Looking up user {}", name);

        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, created_at, updated_at, name FROM users WHERE name = $1"#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to query user {}: {}", name, e);
            AppError::persistence("couldn't look up user", e)
        })?;

        Ok(user)
    }
}
