//! HTTP transport for pipeline validation
//!
//! Wraps the validator in an axum router with CORS, request tracing, and
//! panic recovery, and owns the listener lifecycle.

mod cors;
mod routes;

pub use cors::cors_layer;
pub use routes::{ApiError, handle_panic};

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use std::future::Future;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};

use crate::application::AppConfig;
use crate::primitives::ConfigError;

/// Server setup and lifecycle errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid server configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Failed to bind {addr}: {source}")]
    BindFailed {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("Server terminated unexpectedly: {source}")]
    ServeFailed { source: std::io::Error },
}

/// Build the application router
pub fn router(config: &AppConfig) -> Result<Router, ServerError> {
    let routes = Router::new()
        .route("/", get(routes::root))
        .route(
            "/pipelines/parse",
            get(routes::parse_pipeline_get).post(routes::parse_pipeline),
        )
        .fallback(routes::not_found);

    with_middleware(routes, config)
}

/// Wrap routes in the body, panic, CORS and tracing layers
fn with_middleware(routes: Router, config: &AppConfig) -> Result<Router, ServerError> {
    let router = routes
        // No request size cap on pipeline bodies
        .layer(DefaultBodyLimit::disable())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer(config)?)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    Ok(router)
}

/// Bind the configured address and serve until Ctrl-C or SIGTERM
pub async fn serve(config: &AppConfig) -> Result<(), ServerError> {
    let addr = config.listen_addr()?;
    let app = router(config)?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::BindFailed { addr, source })?;

    serve_with_shutdown(listener, app, shutdown_signal()).await
}

/// Serve `app` on an already bound listener until `shutdown` resolves
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    match listener.local_addr() {
        Ok(local_addr) => info!(%local_addr, "Pipeline validator listening"),
        Err(e) => warn!(error = %e, "Listening on unknown local address"),
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|source| ServerError::ServeFailed { source })?;

    info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl-C, or SIGTERM on unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
