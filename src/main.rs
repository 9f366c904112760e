//! # Tweezers
//!
//! An HTTP service that runs paginated Twitter searches and returns the
//! resulting tweet table as JSON.
//!
//! ## Environment Variables
//!
//! The following environment variables are required for Twitter API functionality:
//! - `xapi_consumer_key`, `xapi_consumer_secret`: Twitter app credentials
//! - `xapi_access_token`, `xapi_access_token_secret`: User credentials
//! - `PORT`: Server port (defaults to 3000)
//!
//! ## API Endpoints
//!
//! - `GET /`: Returns a welcome message
//! - `GET /health`: Returns service health status
//! - `GET /search?q=...`: Runs a search and returns the results

use axum::{routing::get, Router};
use log::info;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use tweezers::{get_server_port, handle_health, handle_root, handle_search};

/// Main entry point for the tweezers web service.
///
/// Initializes `env_logger` (controlled by `RUST_LOG`), mounts all routes
/// behind the HTTP tracing middleware and serves until terminated.
///
/// # Example Usage
///
/// ```bash
/// # Run with default port 3000
/// cargo run --bin tweezers
///
/// # Run on custom port with debug logging
/// PORT=8080 RUST_LOG=debug cargo run --bin tweezers
/// ```
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::init();

    let app = Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/search", get(handle_search))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    let port = get_server_port();
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    info!("Starting tweezers server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
