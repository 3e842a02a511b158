mod file_config;

pub use file_config::FileConfig;

use crate::server::{RequestsLoggingLevel, ServerConfig};
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub db_path: Option<PathBuf>,
    pub bind_address: String,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
}

impl Default for CliConfig {
    fn default() -> Self {
        let server = ServerConfig::default();
        CliConfig {
            db_path: None,
            bind_address: server.bind_address,
            port: server.port,
            logging_level: server.requests_logging_level,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .or_else(|| cli.db_path.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("db_path must be specified on the command line or in config file")
            })?;

        if !db_path.exists() {
            bail!(
                "Catalog database does not exist: {:?}, create it with cli-init-db",
                db_path
            );
        }
        if !db_path.is_file() {
            bail!("db_path is not a file: {:?}", db_path);
        }

        let requests_logging_level = match file.logging_level {
            Some(level) => parse_logging_level(&level)?,
            None => cli.logging_level.clone(),
        };

        let default_top_length = file
            .default_top_length
            .unwrap_or(ServerConfig::default().default_top_length);

        Ok(Self {
            db_path,
            server: ServerConfig {
                requests_logging_level,
                bind_address: file.bind_address.unwrap_or_else(|| cli.bind_address.clone()),
                port: file.port.unwrap_or(cli.port),
                default_top_length,
            },
        })
    }
}

fn parse_logging_level(s: &str) -> Result<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true)
        .map_err(|e| anyhow::anyhow!("Invalid logging_level '{}': {}", s, e))
}
