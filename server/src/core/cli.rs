use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::config::DatabaseBackend;
use super::constants::{
    ENV_CONFIG, ENV_CORS_ORIGINS, ENV_DATABASE_URL, ENV_DB_BACKEND, ENV_DB_HOST, ENV_DB_NAME,
    ENV_DB_PASS, ENV_DB_PORT, ENV_DB_USER, ENV_HOST, ENV_PORT, ENV_SQLITE_PATH,
};

#[derive(Parser)]
#[command(name = "tablelens")]
#[command(version, about = "Browse and filter database tables over HTTP", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server host address
    #[arg(long, short = 'H', global = true, env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', global = true, env = ENV_PORT)]
    pub port: Option<u16>,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Allowed CORS origins, comma-separated (default: any origin)
    #[arg(long, global = true, env = ENV_CORS_ORIGINS, value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // Database options
    /// Database backend (postgres or sqlite)
    #[arg(long, global = true, env = ENV_DB_BACKEND, value_parser = parse_database_backend)]
    pub db_backend: Option<DatabaseBackend>,

    /// PostgreSQL connection URL (overrides the discrete settings)
    #[arg(long, global = true, env = ENV_DATABASE_URL, hide_env_values = true)]
    pub database_url: Option<String>,

    /// PostgreSQL host
    #[arg(long, global = true, env = ENV_DB_HOST)]
    pub db_host: Option<String>,

    /// PostgreSQL port
    #[arg(long, global = true, env = ENV_DB_PORT)]
    pub db_port: Option<u16>,

    /// PostgreSQL user
    #[arg(long, global = true, env = ENV_DB_USER)]
    pub db_user: Option<String>,

    /// PostgreSQL password
    #[arg(long, global = true, env = ENV_DB_PASS, hide_env_values = true)]
    pub db_pass: Option<String>,

    /// PostgreSQL database name
    #[arg(long, global = true, env = ENV_DB_NAME)]
    pub db_name: Option<String>,

    /// SQLite database file (when using the sqlite backend)
    #[arg(long, global = true, env = ENV_SQLITE_PATH)]
    pub sqlite_path: Option<String>,
}

/// Parse database backend from CLI/env string
fn parse_database_backend(s: &str) -> Result<DatabaseBackend, String> {
    match s.to_lowercase().as_str() {
        "sqlite" => Ok(DatabaseBackend::Sqlite),
        "postgres" | "postgresql" => Ok(DatabaseBackend::Postgres),
        _ => Err(format!(
            "Invalid database backend '{}'. Valid options: postgres, sqlite",
            s
        )),
    }
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the server (default command)
    Start,
    /// Print the tables visible to the configured database and exit
    Tables,
}

/// Configuration derived from CLI arguments
#[derive(Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub config: Option<PathBuf>,
    pub cors_origins: Option<Vec<String>>,
    pub db_backend: Option<DatabaseBackend>,
    pub database_url: Option<String>,
    pub db_host: Option<String>,
    pub db_port: Option<u16>,
    pub db_user: Option<String>,
    pub db_pass: Option<String>,
    pub db_name: Option<String>,
    pub sqlite_path: Option<String>,
}

impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("config", &self.config)
            .field("cors_origins", &self.cors_origins)
            .field("db_backend", &self.db_backend)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_user", &self.db_user)
            .field("db_pass", &self.db_pass.as_ref().map(|_| "<redacted>"))
            .field("db_name", &self.db_name)
            .field("sqlite_path", &self.sqlite_path)
            .finish()
    }
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            config: cli.config,
            cors_origins: cli.cors_origins,
            db_backend: cli.db_backend,
            database_url: cli.database_url,
            db_host: cli.db_host,
            db_port: cli.db_port,
            db_user: cli.db_user,
            db_pass: cli.db_pass,
            db_name: cli.db_name,
            sqlite_path: cli.sqlite_path,
        }
    }
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let mut cli = Cli::parse();
    let command = cli.command.take();
    (cli.into(), command)
}
