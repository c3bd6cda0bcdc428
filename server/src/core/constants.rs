// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "TableLens";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "tablelens";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".tablelens";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "tablelens.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "TABLELENS_CONFIG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "TABLELENS_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "TABLELENS_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "TABLELENS_LOG";

/// Environment variable for allowed CORS origins (comma-separated)
pub const ENV_CORS_ORIGINS: &str = "TABLELENS_CORS_ORIGINS";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 3001;

/// Maximum time to wait for background tasks during shutdown
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Table Queries
// =============================================================================

/// Query parameter that carries the row limit (never a column filter)
pub const LIMIT_PARAM: &str = "limit";

/// Row limit when none (or a non-numeric one) is given
pub const DEFAULT_QUERY_LIMIT: u32 = 25;

/// Smallest accepted row limit
pub const MIN_QUERY_LIMIT: u32 = 1;

/// Largest accepted row limit
pub const MAX_QUERY_LIMIT: u32 = 1000;

// =============================================================================
// Environment Variables - Database
// =============================================================================

/// Environment variable for the database backend (postgres or sqlite)
pub const ENV_DB_BACKEND: &str = "TABLELENS_DB_BACKEND";

/// Environment variable for a full PostgreSQL connection URL
pub const ENV_DATABASE_URL: &str = "TABLELENS_DATABASE_URL";

/// Environment variable for the PostgreSQL host
pub const ENV_DB_HOST: &str = "TABLELENS_DB_HOST";

/// Environment variable for the PostgreSQL port
pub const ENV_DB_PORT: &str = "TABLELENS_DB_PORT";

/// Environment variable for the PostgreSQL user
pub const ENV_DB_USER: &str = "TABLELENS_DB_USER";

/// Environment variable for the PostgreSQL password
pub const ENV_DB_PASS: &str = "TABLELENS_DB_PASS";

/// Environment variable for the PostgreSQL database name
pub const ENV_DB_NAME: &str = "TABLELENS_DB_NAME";

/// Environment variable for the SQLite database file
pub const ENV_SQLITE_PATH: &str = "TABLELENS_SQLITE_PATH";

// =============================================================================
// PostgreSQL Defaults
// =============================================================================

/// Default PostgreSQL host
pub const POSTGRES_DEFAULT_HOST: &str = "localhost";

/// Default PostgreSQL port
pub const POSTGRES_DEFAULT_PORT: u16 = 5432;

/// Maximum number of connections in the pool
pub const POSTGRES_DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Minimum number of connections to keep warm
pub const POSTGRES_DEFAULT_MIN_CONNECTIONS: u32 = 1;

/// Connection acquire timeout
pub const POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Idle connection timeout
pub const POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

/// Max connection lifetime
pub const POSTGRES_DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;

/// Statement timeout applied to every connection
pub const POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// SQLite Defaults
// =============================================================================

/// Maximum number of read-only connections
pub const SQLITE_MAX_CONNECTIONS: u32 = 4;

/// Busy timeout while another process holds a write lock
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// Background Tasks
// =============================================================================

/// Interval between pool health checks
pub const HEALTH_CHECK_INTERVAL_SECS: u64 = 60;
