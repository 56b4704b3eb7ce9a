//! Autotienda storefront gateway.
//!
//! This binary serves the storefront's HTTP API: catalog browsing, the
//! cart and checkout pipeline, authentication, the contact form and the
//! admin back-office. It holds no data of its own beyond sessions; the
//! four backing REST services (autos, usuarios, carrito, ordenes) own
//! everything durable.

#![cfg_attr(not(test), forbid(unsafe_code))]

use autotienda_storefront::config::StorefrontConfig;
use autotienda_storefront::routes;
use autotienda_storefront::state::AppState;

#[tokio::main]
async fn main() {
    // Load configuration from environment before anything logs
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "autotienda_storefront=info,tower_http=debug".into());

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(
        autos = %config.services.autos,
        usuarios = %config.services.usuarios,
        carrito = %config.services.carrito,
        ordenes = %config.services.ordenes,
        "backing services configured"
    );

    let addr = config.socket_addr();
    let state = AppState::new(config);
    let app = routes::app(state);

    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
