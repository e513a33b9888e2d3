//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use reporting_types::ReportingRepository;

use super::error::panic_response;
use super::handlers::{self, AppState};
use crate::openapi;

/// HTTP Server for the Reporting API.
pub struct HttpServer<R: ReportingRepository> {
    state: Arc<AppState<R>>,
}

impl<R: ReportingRepository> HttpServer<R> {
    /// Creates a new HTTP server over the given repository.
    pub fn new(repo: R) -> Self {
        Self {
            state: Arc::new(AppState::new(repo)),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api-docs/openapi.json", get(openapi::openapi_json))
            .route("/api/customers", post(handlers::add_customer::<R>))
            .route(
                "/api/customers/by-account",
                get(handlers::get_customer_by_account::<R>),
            )
            .route(
                "/api/customers/by-transaction",
                get(handlers::get_customer_by_transaction::<R>),
            )
            .route("/api/customers/{id}", get(handlers::get_customer::<R>))
            .route(
                "/api/customers/{id}/full",
                get(handlers::get_full_customer::<R>),
            )
            .route(
                "/api/transactions/by-customer",
                post(handlers::search_by_customer::<R>),
            )
            .route(
                "/api/transactions/by-account",
                post(handlers::search_by_account::<R>),
            )
            .route("/api/commissions", get(handlers::list_comissions::<R>))
            .route(
                "/api/commissions/by-transaction",
                get(handlers::get_comission_by_transaction::<R>),
            )
            .route("/api/commissions/{id}", get(handlers::get_comission::<R>))
            .fallback(handlers::fallback)
            .method_not_allowed_fallback(handlers::method_not_allowed)
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }
}

/// Serves an already assembled router, so callers can add outer layers.
pub async fn serve(router: Router, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
