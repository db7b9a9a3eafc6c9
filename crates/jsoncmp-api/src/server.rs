//! Router assembly and the listening loop

use crate::handlers;
use crate::request_id::{assign_request_id, request_span};
use crate::state::AppState;
use anyhow::Result;
use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Build the service router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/store", post(handlers::store_payload))
        .route(
            "/api/compare",
            get(handlers::compare).post(handlers::compare),
        )
        .route("/api/payloads", delete(handlers::delete_payloads))
        .route("/api/status", get(handlers::status))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(assign_request_id))
                .layer(TraceLayer::new_for_http().make_span_with(request_span)),
        )
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C
///
/// # Errors
///
/// Fails if the address cannot be bound or the server loop errors.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve_with_shutdown(listener, state, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves
///
/// # Errors
///
/// Fails if the server loop errors.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    state: AppState,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("Starting jsoncmp server on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Cannot listen for shutdown signal; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
