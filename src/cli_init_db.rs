//! Creates (or recreates) a catalog database.
//!
//! Either runs a user-supplied SQL script, which is expected to drop and
//! create the catalog tables, or creates the built-in schema. The result is
//! validated against the schema the catalog server expects.

use anyhow::{bail, Context, Result};
use clap::Parser;
use rusqlite::Connection;
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use music_catalog_server::catalog_store::latest_catalog_schema;
use music_catalog_server::sqlite_persistence::run_sql_script;

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the SQLite catalog database file.
    pub catalog_db: PathBuf,

    /// SQL script to run instead of the built-in schema.
    #[clap(long)]
    pub script: Option<PathBuf>,

    /// Drop the catalog tables first if the database already has them.
    #[clap(long)]
    pub force: bool,
}

fn has_tables(conn: &Connection) -> Result<bool> {
    let table_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |r| r.get(0),
    )?;
    Ok(table_count > 0)
}

fn main() -> Result<()> {
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

    let conn = Connection::open(&cli_args.catalog_db)
        .with_context(|| format!("Failed to open {:?}", cli_args.catalog_db))?;
    let schema = latest_catalog_schema();

    match &cli_args.script {
        Some(script) => {
            info!("Running SQL script file {:?}", script);
            run_sql_script(&conn, script)?;
        }
        None => {
            if has_tables(&conn)? {
                if !cli_args.force {
                    bail!(
                        "{:?} already contains tables, pass --force to recreate the catalog",
                        cli_args.catalog_db
                    );
                }
                info!("Dropping existing catalog tables");
                schema.drop_all(&conn)?;
            }
            info!("Creating catalog schema at version {}", schema.version);
            schema.create(&conn)?;
        }
    }

    schema
        .validate(&conn)
        .context("Catalog schema validation failed")?;
    info!("Catalog database ready at {:?}", cli_args.catalog_db);
    Ok(())
}
