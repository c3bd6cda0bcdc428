//! Data layer
//!
//! - `sqlite` / `postgres` - Catalog services over a bounded pool
//! - `traits` - Repository trait shared by both backends
//! - `filters` - Dynamic filter compiler (filter text to SQL predicates)
//! - `executor` - Bounded table query orchestration
//! - `sql` - SQL dialect abstraction
//! - `types` - Shared schema and result types
//! - `error` - Unified error type for all backends

pub mod error;
pub mod executor;
pub mod filters;
pub mod postgres;
pub mod sql;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use postgres::PostgresService;
pub use sqlite::SqliteService;

pub use error::{DataError, QueryError, SchemaLookupError};
pub use traits::CatalogRepository;

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::core::config::{DatabaseBackend, DatabaseConfig};
use crate::data::sql::Backend;

/// Catalog service enum
///
/// Wraps the backend-specific service. Services are stored as Arc so the
/// repository handed to request handlers shares the same pool.
pub enum CatalogService {
    /// SQLite backend (local files)
    Sqlite(Arc<SqliteService>),
    /// PostgreSQL backend (default)
    Postgres(Arc<PostgresService>),
}

impl CatalogService {
    /// Initialize the catalog service for the configured backend
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DataError> {
        match config.backend {
            DatabaseBackend::Sqlite => {
                let service = SqliteService::init(&config.sqlite).await?;
                Ok(Self::Sqlite(Arc::new(service)))
            }
            DatabaseBackend::Postgres => {
                let service = PostgresService::init(&config.postgres).await?;
                Ok(Self::Postgres(Arc::new(service)))
            }
        }
    }

    /// Close the pool gracefully
    pub async fn close(&self) {
        match self {
            Self::Sqlite(s) => s.close().await,
            Self::Postgres(p) => p.close().await,
        }
    }

    /// Start the background pool health check
    pub fn start_health_check_task(&self, shutdown_rx: watch::Receiver<bool>) -> JoinHandle<()> {
        match self {
            Self::Sqlite(s) => s.start_health_check_task(shutdown_rx),
            Self::Postgres(p) => p.start_health_check_task(shutdown_rx),
        }
    }

    /// Get the backend type
    pub fn backend(&self) -> Backend {
        match self {
            Self::Sqlite(_) => Backend::Sqlite,
            Self::Postgres(_) => Backend::Postgres,
        }
    }

    /// Get the repository trait object for catalog operations
    pub fn repository(&self) -> Box<dyn CatalogRepository + Send + Sync> {
        match self {
            Self::Sqlite(s) => Box::new(Arc::clone(s)),
            Self::Postgres(p) => Box::new(Arc::clone(p)),
        }
    }
}
