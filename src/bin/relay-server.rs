//! Signal Relay Server
//!
//! Accepts webhook signals on `POST /enqueue` and hands them out one at a
//! time on `GET /dequeue`. Queue state lives entirely in the configured
//! store, so the process itself is stateless.

use dotenvy::dotenv;
use signal_relay::config::Config;
use signal_relay::core::http::start_server;
use signal_relay::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    let config = Config::from_env()?;
    logging::init_logging(&config);

    info!("Starting Signal Relay Server");
    info!(environment = %config.environment, "Environment");
    info!(store = %config.store, "Queue store");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down relay server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
