use std::net::SocketAddr;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vitrine_fakestore::FakeStoreClient;

use vitrine_api::cache::CatalogCache;
use vitrine_api::config::ServerConfig;
use vitrine_api::router::build_app_router;
use vitrine_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitrine_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Store client and catalog cache ---
    let store = Arc::new(FakeStoreClient::new(config.store_api_url.clone()));
    tracing::info!(store_api_url = %config.store_api_url, "Store API client created");

    let catalog = Arc::new(CatalogCache::new(
        Arc::clone(&store),
        config.catalog_revalidate_secs,
    ));

    // --- App state ---
    let shutdown = CancellationToken::new();
    let state = AppState {
        config: Arc::new(config.clone()),
        store,
        catalog,
        shutdown: shutdown.clone(),
    };

    // --- Catalog warm-up ---
    // A cold cache still works; the first page request pays the upstream
    // round trip instead.
    match state.catalog.snapshot().await {
        Ok(snapshot) => {
            tracing::info!(
                products = snapshot.products.len(),
                categories = snapshot.categories.len(),
                "Catalog warmed up"
            );
        }
        Err(err) => {
            tracing::warn!(error = %err, "Catalog warm-up failed, pages will retry lazily");
        }
    }

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    // Cancelling the token inside the shutdown future ends every live
    // browse session, which lets the open WebSocket connections drain.
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            shutdown.cancel();
        })
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
