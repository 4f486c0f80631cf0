pub mod config;
pub mod logger;
pub mod proxy;

use axum::middleware;
use axum::routing::{any, get};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_tracing(std::path::Path::new("logs"))?;

    let config = config::load_config()?;
    let state = proxy::ProxyState::new(&config.upstream)?;
    let static_dir = config.static_dir();
    tracing::info!(
        "Serving {} and proxying /api/v1 to {}",
        static_dir.display(),
        config.upstream.base_url
    );

    // Unknown paths get index.html so a reload with ?active=... still boots the SPA
    let spa = ServeDir::new(&static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/v1/*rest", any(proxy::forward))
        .fallback_service(spa)
        .layer(middleware::from_fn(logger::request_logger))
        .with_state(state);

    let addr = config.bind_addr()?;
    tracing::info!("Attempting to bind gateway to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!("Port {} is already in use", addr.port());
            } else {
                tracing::error!("Failed to bind to {}: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;
    Ok(())
}
