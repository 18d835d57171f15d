mod cache;

use std::net::SocketAddr;

use axum::{Router, middleware, routing};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    services::{ServeDir, ServeFile},
};
use tracing_subscriber::EnvFilter;

/// Where `trunk build` / `wasm-bindgen` output lands, relative to this crate
const DEFAULT_DIST_DIR: &str = "../dist";
const DEFAULT_PORT: u16 = 8080;

async fn healthz() -> &'static str {
    "ok"
}

fn app(dist_dir: &str) -> Router {
    let index = format!("{dist_dir}/index.html");
    let static_files = ServeDir::new(dist_dir).not_found_service(ServeFile::new(index));

    Router::new()
        .route("/healthz", routing::get(healthz))
        .fallback_service(static_files)
        .layer(
            ServiceBuilder::new()
                .layer(CompressionLayer::new().br(true).gzip(true))
                .layer(middleware::from_fn(cache::cache_control)),
        )
}

fn port_from_env() -> u16 {
    match std::env::var("PORT") {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid PORT {raw:?}, using {DEFAULT_PORT}");
            DEFAULT_PORT
        }),
        Err(_) => DEFAULT_PORT,
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    tracing::info!("Shutting down");
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let dist_dir = std::env::var("DIST_DIR").unwrap_or_else(|_| DEFAULT_DIST_DIR.to_string());
    let addr = SocketAddr::from(([0, 0, 0, 0], port_from_env()));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Serving {dist_dir} on http://{addr}");

    axum::serve(listener, app(&dist_dir))
        .with_graceful_shutdown(shutdown_signal())
        .await
}
