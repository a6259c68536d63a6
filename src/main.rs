//! Ongkir Proxy - shipping-cost proxy for the RajaOngkir API
//!
//! This is the main entry point for the proxy server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::signal;
use tracing::{info, warn};

use ongkir_proxy::{routes, AppState, Config, ProxyMode};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    info!("Starting RajaOngkir Proxy");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        environment = config.environment.as_str(),
        mode = ?config.proxy_mode,
        upstream = %config.rajaongkir_base_url,
        "Configuration loaded successfully"
    );
    if !config.has_api_key() {
        warn!("RAJA_ONGKIR_API_KEY is not set; proxy requests will fail with a configuration error");
    }

    // Initialize metrics
    routes::metrics::init_metrics();

    let state = Arc::new(AppState::new(config.clone())?);
    let app = routes::create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("RajaOngkir Proxy listening on {}", addr);
    info!("Health check: http://{}/health", addr);
    match config.proxy_mode {
        ProxyMode::Validated => info!("Serving validated API under /api/rajaongkir"),
        ProxyMode::PassThrough => info!("Serving pass-through proxy under /proxy-rajaongkir"),
    }

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("RajaOngkir Proxy shutdown complete");
    Ok(())
}

/// Initialize tracing; `LOG_FORMAT=json` switches to JSON lines
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ongkir_proxy=info,tower_http=info".into());

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    }
}

/// Handle graceful shutdown signals
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating shutdown");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating shutdown");
        }
    }
}
