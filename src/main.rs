// gemini-relay - Single-endpoint image relay to the Gemini API
// Author: kelexine (https://github.com/kelexine)

use anyhow::{bail, Result};
use clap::Parser;
use gemini_relay::cli::Args;
use gemini_relay::config::AppConfig;
use gemini_relay::server::{bind_listener, create_router};
use gemini_relay::utils::logging;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments (PORT and API_KEY are read from the environment here)
    let args = Args::parse();

    // Phase 1: Load configuration
    let config = AppConfig::load(&args)?;

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting gemini-relay v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Validate the API key before accepting connections
    match &config.gemini.api_key {
        Some(api_key) => info!(
            api_key_configured = true,
            fingerprint = %api_key.fingerprint(),
            "Gemini API key loaded"
        ),
        None if config.server.require_api_key => {
            error!(api_key_configured = false, "API_KEY is not set; refusing to start");
            bail!("API_KEY is not set");
        }
        None => warn!(
            api_key_configured = false,
            "API_KEY is not set; starting anyway because server.require_api_key = false"
        ),
    }

    // Phase 4: Build and start HTTP server
    let app = create_router(&config)?;
    let listener = bind_listener(&config.server).await?;
    info!("Listening on http://{}/operation", listener.local_addr()?);

    // Phase 5: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
