//! Database connection module for `ClickHouse`.
//!
//! Provides the client handle and configuration for the event store the
//! collector reads from. The handle is created once at startup; a failed
//! connectivity check at that point is fatal.

use anyhow::{Context, Result};
use clickhouse::Client;
use std::sync::Arc;

/// Database configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// `ClickHouse` database URL (e.g., <http://localhost:8123>)
    pub url: String,
    /// Database name to use
    pub database: String,
    /// Username for authentication
    pub user: String,
    /// Password for authentication
    pub password: String,
}

impl DatabaseConfig {
    /// Load database configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CALCMON_DB_URL`: Database URL (default: <http://localhost:8123>)
    /// - `CALCMON_DB_NAME`: Database name (default: "calculator")
    /// - `CALCMON_DB_USER`: Database user (default: "calcmon")
    /// - `CALCMON_DB_PASSWORD`: Database password (default: "`calcmon_dev`")
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables cannot be read.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            url: std::env::var("CALCMON_DB_URL")
                .unwrap_or_else(|_| "http://localhost:8123".to_string()),
            database: std::env::var("CALCMON_DB_NAME")
                .unwrap_or_else(|_| "calculator".to_string()),
            user: std::env::var("CALCMON_DB_USER").unwrap_or_else(|_| "calcmon".to_string()),
            password: std::env::var("CALCMON_DB_PASSWORD")
                .unwrap_or_else(|_| "calcmon_dev".to_string()),
        })
    }
}

/// Database client wrapper.
///
/// The underlying `ClickHouse` client manages its HTTP connection reuse
/// internally; an aggregation pass issues its queries through this one handle.
#[derive(Clone)]
pub struct Database {
    client: Arc<Client>,
}

impl Database {
    /// Create a new database client from configuration.
    #[must_use]
    pub fn new(config: &DatabaseConfig) -> Self {
        let client = Client::default()
            .with_url(&config.url)
            .with_database(&config.database)
            .with_user(&config.user)
            .with_password(&config.password);

        Self {
            client: Arc::new(client),
        }
    }

    /// Get a reference to the underlying `ClickHouse` client.
    #[must_use]
    pub fn client(&self) -> Arc<Client> {
        Arc::clone(&self.client)
    }

    /// Test database connectivity by executing a simple query.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be reached or the query fails.
    pub async fn ping(&self) -> Result<()> {
        self.client
            .query("SELECT 1")
            .fetch_one::<u8>()
            .await
            .context("Failed to ping database")?;
        Ok(())
    }
}
