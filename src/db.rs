//! PostgreSQL connection pool owned by a service process.
//!
//! A `Database` is created once at startup, handed to the stores as a cloned `PgPool`,
//! and closed once after the HTTP server has stopped. Connections are acquired per query
//! and returned to the pool automatically.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;
use crate::error::AppError;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Opens the pool and verifies that at least one connection can be established.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let options = config
            .connect_options()
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await?;

        log::info!("Connected to PostgreSQL database");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Waits for checked-out connections to be returned, then closes every connection.
    pub async fn close(&self) {
        log::info!("Closing database pool");
        self.pool.close().await;
    }
}
