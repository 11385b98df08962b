use anyhow::{Context, Result};
use aptoide_api::{create_app, AppState, Config};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Held for the whole process so file logs get flushed
    let _log_guard = scraper_logging::init_from_env();

    info!("Starting aptoide-api service...");

    let config = Config::from_env();
    info!(
        bind_addr = %config.bind_addr,
        search_url = %config.scraper.search_url,
        timeout_secs = config.scraper.timeout.as_secs(),
        "Configuration loaded"
    );

    let state = AppState::from_config(&config.scraper).context("Failed to set up Aptoide client")?;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;
    info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal, stopping gracefully");
}
