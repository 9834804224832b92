//! Freight desk HTTP server binary

use anyhow::Context;
use freight_desk::api::{AppState, create_router};
use freight_desk::carrier::FmcsaClient;
use freight_desk::config::Settings;
use freight_desk::dataset::LoadTable;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real deployments set the environment directly.
    let dotenv = dotenvy::dotenv();

    init_logging()?;
    if let Ok(path) = dotenv {
        info!(path = %path.display(), "Loaded environment file");
    }

    info!("Starting freight desk v{}", env!("CARGO_PKG_VERSION"));

    let settings = Settings::from_env().context("Invalid configuration")?;
    info!(settings = ?settings, "Configuration loaded");

    let loads = LoadTable::load(&settings.loads_path, settings.reference_kind)
        .context("Failed to load dataset")?;
    let carriers = FmcsaClient::new(settings.fmcsa_api_base.clone(), &settings.fmcsa_api_key)
        .context("Failed to create regulator client")?;

    let state = AppState::new(loads, carriers, settings.api_key.clone());
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(settings.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", settings.bind_address))?;
    info!("Listening on {}", settings.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Console logging, filtered by `RUST_LOG`; `LOG_FORMAT=json` for JSON lines.
fn init_logging() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,freight_desk=debug"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
    .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {}", e))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal, shutting down gracefully...");
}
