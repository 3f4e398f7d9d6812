use anyhow::Context;
use tokio::net::TcpListener;

use campaign_keep::api::{self, AppState};
use campaign_keep::config::AppConfig;
use campaign_keep::core::logging;
use campaign_keep::database::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, config_source) = AppConfig::load();

    // Initialize logging
    let _log_guard = logging::init(&config.logging, &config.log_dir());
    log::info!("{} v{} starting", campaign_keep::NAME, campaign_keep::VERSION);
    config_source.log();

    let data_dir = config.data_dir();
    let db = Database::new(&data_dir)
        .await
        .with_context(|| format!("failed to open database in {}", data_dir.display()))?;

    let state = AppState::new(db, &config);
    let app = api::router(state, config.server.cors_permissive);

    let listener = TcpListener::bind(config.server.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_address))?;
    tracing::info!(address = %config.server.bind_address, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
