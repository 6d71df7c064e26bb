use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use transit_router::network::Network;
use transit_router::planner::RouterConfig;
use transit_router::web::{AppState, create_router};

/// Default bind address when `TRANSIT_ADDR` is not set.
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Network data is required; there is nothing to route over without it
    let network_path = std::env::var("TRANSIT_NETWORK").unwrap_or_else(|_| {
        eprintln!("Error: TRANSIT_NETWORK must point to a network JSON file.");
        eprintln!("Example: TRANSIT_NETWORK=transit-router/data/network.json");
        std::process::exit(1);
    });
    let network = Network::load(&network_path).expect("Failed to load network");

    let addr: SocketAddr = std::env::var("TRANSIT_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()
        .expect("TRANSIT_ADDR must be a socket address, e.g. 127.0.0.1:3000");

    let config = RouterConfig::default();
    let state = AppState::new(network, config);
    let app = create_router(state);

    info!(%addr, "Transit router listening");
    info!("  GET  /health        - Health check");
    info!("  GET  /api/stations  - List stations");
    info!("  GET  /api/lines     - List lines");
    info!("  POST /api/routes    - Plan routes between two coordinates");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
