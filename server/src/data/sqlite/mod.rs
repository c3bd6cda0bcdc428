//! SQLite catalog service
//!
//! Read-only access to an existing SQLite database file, for local use and
//! for exercising the full stack without a PostgreSQL server.

mod decode;
pub mod error;
pub mod repositories;
mod repository_impl;

pub use error::SqliteError;
pub use sqlx::SqlitePool;

use std::sync::Arc;
use std::time::Duration;

use sqlx::ConnectOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::log::LevelFilter;

use crate::core::config::SqliteConfig;
use crate::core::constants::{
    HEALTH_CHECK_INTERVAL_SECS, SQLITE_BUSY_TIMEOUT_SECS, SQLITE_MAX_CONNECTIONS,
};
use crate::utils::file::expand_path;

/// SQLite catalog service
///
/// Owns the bounded pool shared by every request. Created once at startup.
pub struct SqliteService {
    pool: SqlitePool,
}

impl SqliteService {
    /// Open the configured database file read-only
    ///
    /// The file must already exist; nothing is created or migrated.
    pub async fn init(config: &SqliteConfig) -> Result<Self, SqliteError> {
        let path = config
            .path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| SqliteError::Config("database.sqlite.path is required".into()))?;
        let db_path = expand_path(path);

        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .read_only(true)
            .create_if_missing(false)
            .busy_timeout(Duration::from_secs(SQLITE_BUSY_TIMEOUT_SECS))
            .log_statements(LevelFilter::Trace);

        let pool = SqlitePoolOptions::new()
            .max_connections(SQLITE_MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        tracing::debug!(path = %db_path.display(), "SqliteService initialized");
        Ok(Self { pool })
    }

    /// Wrap an existing pool (in-memory databases, tests)
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the connection pool gracefully
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("SQLite pool closed");
    }

    /// Start a background health check task
    pub fn start_health_check_task(
        self: &Arc<Self>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        let db = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(HEALTH_CHECK_INTERVAL_SECS));
            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            tracing::debug!("SQLite health check task shutting down");
                            break;
                        }
                    }
                    _ = interval.tick() => {
                        if let Err(e) = sqlx::query("SELECT 1").execute(&db.pool).await {
                            tracing::warn!("SQLite health check failed: {}", e);
                        }
                    }
                }
            }
        })
    }
}
