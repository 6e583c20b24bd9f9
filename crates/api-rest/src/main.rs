//! Travel Health API server.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::signal;
use tracing::{error, info};
use travel_health_api_rest::{build_router, AppState};
use travel_health_common::{init_tracing, AppConfig};
use travel_health_infrastructure::DatabasePool;

#[derive(Parser, Debug)]
#[command(name = "travel-health-api")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding default.toml and {APP_ENV}.toml
    #[arg(short, long, env = "APP_CONFIG_DIR", default_value = "config")]
    config: PathBuf,

    /// Apply database migrations and exit
    #[arg(long)]
    migrate_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = AppConfig::load_from(&args.config)?;
    init_tracing(&config.telemetry)?;

    info!(
        service = %config.telemetry.service_name,
        version = env!("CARGO_PKG_VERSION"),
        "Starting travel health API"
    );

    let pool = DatabasePool::connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    if config.database.run_migrations || args.migrate_only {
        pool.migrate().await.context("Failed to run migrations")?;
    }
    if args.migrate_only {
        info!("Migrations applied, exiting");
        pool.close().await;
        return Ok(());
    }

    let app = build_router(AppState::postgres(pool.clone()), &config.server);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!(address = %address, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Received shutdown signal");
}
