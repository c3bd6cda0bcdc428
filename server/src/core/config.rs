use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_HOST, DEFAULT_PORT,
    POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS, POSTGRES_DEFAULT_HOST,
    POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS, POSTGRES_DEFAULT_MAX_CONNECTIONS,
    POSTGRES_DEFAULT_MAX_LIFETIME_SECS, POSTGRES_DEFAULT_MIN_CONNECTIONS, POSTGRES_DEFAULT_PORT,
    POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS,
};

// =============================================================================
// Database Backend Enum (PostgreSQL or SQLite)
// =============================================================================

/// Database whose catalog is browsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    #[default]
    Postgres,
    Sqlite,
}

impl fmt::Display for DatabaseBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseBackend::Postgres => write!(f, "postgres"),
            DatabaseBackend::Sqlite => write!(f, "sqlite"),
        }
    }
}

// =============================================================================
// File Config Structs (JSON deserialization)
// =============================================================================

/// Server configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub cors_origins: Option<Vec<String>>,
}

/// PostgreSQL configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PostgresFileConfig {
    /// Connection URL (or use TABLELENS_DATABASE_URL env var)
    pub url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    /// Maximum number of connections in the pool (default: 10)
    pub max_connections: Option<u32>,
    /// Minimum number of connections to keep warm (default: 1)
    pub min_connections: Option<u32>,
    /// Connection acquire timeout in seconds (default: 30)
    pub acquire_timeout_secs: Option<u64>,
    /// Idle connection timeout in seconds (default: 600)
    pub idle_timeout_secs: Option<u64>,
    /// Max connection lifetime in seconds (default: 1800)
    pub max_lifetime_secs: Option<u64>,
    /// Statement timeout in seconds (default: 30)
    pub statement_timeout_secs: Option<u64>,
}

/// SQLite configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SqliteFileConfig {
    pub path: Option<String>,
}

/// Database configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DatabaseFileConfig {
    /// Backend: postgres (default) or sqlite
    pub backend: Option<DatabaseBackend>,
    pub postgres: Option<PostgresFileConfig>,
    pub sqlite: Option<SqliteFileConfig>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerFileConfig>,
    pub database: Option<DatabaseFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

/// Overwrite `current` when `other` carries a value
fn merge_field<T: fmt::Debug>(current: &mut Option<T>, other: Option<T>, field: &str) {
    if let Some(value) = other {
        tracing::trace!(field, value = ?value, "Merging config field");
        *current = Some(value);
    }
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(server) = other.server {
            let current = self.server.get_or_insert_with(ServerFileConfig::default);
            merge_field(&mut current.host, server.host, "server.host");
            merge_field(&mut current.port, server.port, "server.port");
            merge_field(
                &mut current.cors_origins,
                server.cors_origins,
                "server.cors_origins",
            );
        }

        if let Some(database) = other.database {
            let current = self.database.get_or_insert_with(DatabaseFileConfig::default);
            merge_field(&mut current.backend, database.backend, "database.backend");

            if let Some(pg) = database.postgres {
                let cur = current
                    .postgres
                    .get_or_insert_with(PostgresFileConfig::default);
                // url and password are never logged
                if pg.url.is_some() {
                    cur.url = pg.url;
                }
                if pg.password.is_some() {
                    cur.password = pg.password;
                }
                merge_field(&mut cur.host, pg.host, "database.postgres.host");
                merge_field(&mut cur.port, pg.port, "database.postgres.port");
                merge_field(&mut cur.user, pg.user, "database.postgres.user");
                merge_field(&mut cur.name, pg.name, "database.postgres.name");
                merge_field(
                    &mut cur.max_connections,
                    pg.max_connections,
                    "database.postgres.max_connections",
                );
                merge_field(
                    &mut cur.min_connections,
                    pg.min_connections,
                    "database.postgres.min_connections",
                );
                merge_field(
                    &mut cur.acquire_timeout_secs,
                    pg.acquire_timeout_secs,
                    "database.postgres.acquire_timeout_secs",
                );
                merge_field(
                    &mut cur.idle_timeout_secs,
                    pg.idle_timeout_secs,
                    "database.postgres.idle_timeout_secs",
                );
                merge_field(
                    &mut cur.max_lifetime_secs,
                    pg.max_lifetime_secs,
                    "database.postgres.max_lifetime_secs",
                );
                merge_field(
                    &mut cur.statement_timeout_secs,
                    pg.statement_timeout_secs,
                    "database.postgres.statement_timeout_secs",
                );
            }

            if let Some(sqlite) = database.sqlite {
                let cur = current.sqlite.get_or_insert_with(SqliteFileConfig::default);
                merge_field(&mut cur.path, sqlite.path, "database.sqlite.path");
            }
        }
    }
}

// =============================================================================
// Runtime Config Structs (final merged configuration)
// =============================================================================

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
}

/// PostgreSQL configuration (final/runtime)
#[derive(Clone)]
pub struct PostgresConfig {
    /// Connection URL; takes precedence over the discrete settings
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    pub statement_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: POSTGRES_DEFAULT_HOST.to_string(),
            port: POSTGRES_DEFAULT_PORT,
            user: None,
            password: None,
            name: None,
            max_connections: POSTGRES_DEFAULT_MAX_CONNECTIONS,
            min_connections: POSTGRES_DEFAULT_MIN_CONNECTIONS,
            acquire_timeout_secs: POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS,
            idle_timeout_secs: POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS,
            max_lifetime_secs: POSTGRES_DEFAULT_MAX_LIFETIME_SECS,
            statement_timeout_secs: POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS,
        }
    }
}

impl fmt::Debug for PostgresConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .field("idle_timeout_secs", &self.idle_timeout_secs)
            .field("max_lifetime_secs", &self.max_lifetime_secs)
            .field("statement_timeout_secs", &self.statement_timeout_secs)
            .finish()
    }
}

/// SQLite configuration (final/runtime)
#[derive(Debug, Clone, Default)]
pub struct SqliteConfig {
    /// Database file, opened read-only
    pub path: Option<String>,
}

/// Database configuration (final/runtime)
#[derive(Debug, Clone, Default)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    pub postgres: PostgresConfig,
    pub sqlite: SqliteConfig,
}

/// Final merged application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.tablelens/tablelens.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        // 1. Profile dir - skip if not exists
        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        // 2. CLI-specified path OR local directory
        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        // 3. Layer configs: defaults -> file config -> CLI/env overrides
        let file_server = file_config.server.unwrap_or_default();
        let file_database = file_config.database.unwrap_or_default();
        let file_pg = file_database.postgres.unwrap_or_default();
        let file_sqlite = file_database.sqlite.unwrap_or_default();

        let server = ServerConfig {
            host: cli
                .host
                .clone()
                .or(file_server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT),
            cors_origins: cli
                .cors_origins
                .clone()
                .or(file_server.cors_origins)
                .unwrap_or_default()
                .into_iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
        };

        let pg_defaults = PostgresConfig::default();
        let postgres = PostgresConfig {
            url: cli.database_url.clone().or(file_pg.url),
            host: cli
                .db_host
                .clone()
                .or(file_pg.host)
                .unwrap_or(pg_defaults.host),
            port: cli.db_port.or(file_pg.port).unwrap_or(pg_defaults.port),
            user: cli.db_user.clone().or(file_pg.user),
            password: cli.db_pass.clone().or(file_pg.password),
            name: cli.db_name.clone().or(file_pg.name),
            max_connections: file_pg
                .max_connections
                .unwrap_or(pg_defaults.max_connections),
            min_connections: file_pg
                .min_connections
                .unwrap_or(pg_defaults.min_connections),
            acquire_timeout_secs: file_pg
                .acquire_timeout_secs
                .unwrap_or(pg_defaults.acquire_timeout_secs),
            idle_timeout_secs: file_pg
                .idle_timeout_secs
                .unwrap_or(pg_defaults.idle_timeout_secs),
            max_lifetime_secs: file_pg
                .max_lifetime_secs
                .unwrap_or(pg_defaults.max_lifetime_secs),
            statement_timeout_secs: file_pg
                .statement_timeout_secs
                .unwrap_or(pg_defaults.statement_timeout_secs),
        };

        let database = DatabaseConfig {
            backend: cli
                .db_backend
                .or(file_database.backend)
                .unwrap_or_default(),
            postgres,
            sqlite: SqliteConfig {
                path: cli.sqlite_path.clone().or(file_sqlite.path),
            },
        };

        let config = Self { server, database };
        config.validate()?;

        tracing::debug!(
            host = %config.server.host,
            port = config.server.port,
            backend = %config.database.backend,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Validate the configuration for consistency and correctness
    fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            anyhow::bail!("Configuration error: server.host must not be empty");
        }

        // Port 0 would bind a random port
        if self.server.port == 0 {
            anyhow::bail!("Configuration error: server.port must be greater than 0");
        }

        match self.database.backend {
            DatabaseBackend::Sqlite => {
                let has_path = self
                    .database
                    .sqlite
                    .path
                    .as_deref()
                    .is_some_and(|p| !p.trim().is_empty());
                if !has_path {
                    anyhow::bail!(
                        "Configuration error: database.sqlite.path is required for the sqlite backend"
                    );
                }
            }
            DatabaseBackend::Postgres => {
                let pg = &self.database.postgres;
                if pg.max_connections == 0 {
                    anyhow::bail!(
                        "Configuration error: database.postgres.max_connections must be greater than 0"
                    );
                }
                if pg.min_connections > pg.max_connections {
                    anyhow::bail!(
                        "Configuration error: database.postgres.min_connections ({}) exceeds max_connections ({})",
                        pg.min_connections,
                        pg.max_connections
                    );
                }
            }
        }

        Ok(())
    }
}

/// Get the profile config path (~/.tablelens/tablelens.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}
