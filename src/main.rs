use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use music_catalog_server::catalog_store::SqliteCatalogStore;
use music_catalog_server::config::{AppConfig, CliConfig, FileConfig};
use music_catalog_server::server::{run_server, RequestsLoggingLevel};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the SQLite catalog database file, created beforehand with cli-init-db.
    #[clap(value_parser = parse_path)]
    pub catalog_db: Option<PathBuf>,

    /// Path to a TOML config file. Values in the file override command line values.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// The address to bind to.
    #[clap(long, default_value = "127.0.0.1")]
    pub bind_address: String,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config file {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };

    let cli_config = CliConfig {
        db_path: cli_args.catalog_db,
        bind_address: cli_args.bind_address,
        port: cli_args.port,
        logging_level: cli_args.logging_level,
    };
    let app_config = AppConfig::resolve(&cli_config, file_config)?;

    info!("Opening SQLite catalog database at {:?}...", app_config.db_path);
    let catalog_store = Arc::new(SqliteCatalogStore::open(&app_config.db_path)?);

    run_server(app_config.server, catalog_store).await
}
