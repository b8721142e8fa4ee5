//! explorer-server CLI
//!
//! Serves generic CRUD endpoints for every table of a SQLite database.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use explorer_server::{Cli, build_router, build_service, http};
use explorer_sqlite::connect_with_retry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level())
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Connect to database
    let options = SqlitePoolOptions::new().max_connections(cli.max_connections);
    let pool = connect_with_retry(options, &cli.database, cli.connect_retries, cli.retry_delay())
        .await
        .with_context(|| format!("unable to connect to {}", cli.database))?;

    let service = build_service(pool.clone(), cli.on_missing_primary_key.into())
        .await
        .context("schema discovery failed")?;
    info!(tables = service.schema().len(), "schema ready");

    let router = build_router(Arc::new(service))?;
    http::run(cli.listen, router).await?;

    pool.close().await;
    Ok(())
}
