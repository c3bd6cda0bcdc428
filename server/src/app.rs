//! Core application

use std::sync::Arc;

use anyhow::Result;

use crate::api::ApiServer;
use crate::core::cli::{self, CliConfig, Commands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME, APP_NAME_LOWER, ENV_LOG};
use crate::core::shutdown::ShutdownService;
use crate::data::CatalogService;

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub catalog: Arc<CatalogService>,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        let app = Self::init(&cli_config).await?;
        match command {
            Some(Commands::Tables) => Self::print_tables(app).await,
            Some(Commands::Start) | None => Self::start_server(app).await,
        }
    }

    async fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;
        let catalog = CatalogService::init(&config.database)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to initialize database: {}", e))?;
        let catalog = Arc::new(catalog);
        tracing::debug!(backend = %catalog.backend(), "Catalog initialized");

        let shutdown = ShutdownService::new(Arc::clone(&catalog));

        Ok(Self {
            shutdown,
            config,
            catalog,
        })
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    /// Print the catalog's table list and exit
    async fn print_tables(app: Self) -> Result<()> {
        let result = app.catalog.repository().list_tables().await;
        app.catalog.close().await;

        let tables = result.map_err(|e| anyhow::anyhow!("Failed to list tables: {}", e))?;
        if tables.is_empty() {
            println!("No tables found ({})", app.catalog.backend());
        }
        for table in tables {
            println!("{}", table);
        }
        Ok(())
    }

    async fn start_server(app: Self) -> Result<()> {
        // Install signal handlers FIRST (before any blocking calls)
        app.shutdown.install_signal_handlers();

        app.shutdown
            .register(
                app.catalog
                    .start_health_check_task(app.shutdown.subscribe()),
            )
            .await;

        println!(
            "{} listening on http://{}:{} ({})",
            APP_NAME,
            app.config.server.host,
            app.config.server.port,
            app.catalog.backend()
        );

        let server = ApiServer::new(app);
        let app = server.start().await?;
        app.shutdown.shutdown().await;

        Ok(())
    }
}
