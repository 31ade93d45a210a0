//! HTTP API for the footfall resource planner.
//!
//! This crate hosts the calculator and the prediction workflow:
//!
//! - [`router`] - Builds the axum router for an [`AppState`]
//! - [`serve`] - Binds, serves, and shuts down gracefully on Ctrl+C / SIGTERM
//! - [`ServerConfig`] / [`AuthMode`] - Startup configuration
//! - [`ApiError`] - JSON error responses

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/footfall-planning/footfall/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod auth;
mod config;
mod error;
pub mod routes;
mod state;

use std::time::Duration;

use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    middleware,
    routing::{get, post},
};
use footfall_predict::PredictionClient;
use footfall_store::{PredictionStore, StoreError};
use thiserror::Error;
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

pub use auth::{Principal, require_admin};
pub use config::{AuthMode, DEFAULT_PORT, ServerConfig};
pub use error::ApiError;
pub use state::AppState;

/// Errors that stop the server from starting or running.
#[derive(Error, Debug)]
pub enum ServerError {
    /// The prediction client could not be built.
    #[error("Failed to create prediction client: {0}")]
    Client(#[from] reqwest::Error),

    /// The prediction log could not be opened.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Binding or serving failed.
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/predictions", get(routes::admin_predictions))
        .route("/prediction-create", post(routes::admin_create_prediction))
        .route("/resources/:id", get(routes::admin_resources))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/resources", post(routes::resources))
        .route("/api/locations", get(routes::locations))
        .route("/api/predict", post(routes::predict))
        .route("/api/predictions", get(routes::list_predictions))
        .route("/api/predictions/range", get(routes::predictions_in_range))
        .nest("/api/admin", admin)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the server until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if the client or store cannot be created, or the address
/// cannot be bound.
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let client = PredictionClient::new(config.predict.clone())?;
    let store = match config.store_path {
        Some(path) => PredictionStore::new(path)?,
        None => PredictionStore::with_default_path()?,
    };

    match &config.auth {
        AuthMode::Demo => warn!("Demo auth mode: admin routes are open to every caller"),
        AuthMode::Token { tokens } if tokens.is_empty() => {
            warn!("No admin tokens configured: admin routes will reject every request");
        }
        AuthMode::Token { tokens } => info!(count = tokens.len(), "Admin token auth enabled"),
    }
    info!(
        ml_service = %config.predict.base_url,
        store = %store.path().display(),
        "Initializing state"
    );

    let app = router(AppState::new(client, store, config.auth));

    let listener = TcpListener::bind(config.addr).await?;
    info!("Server running on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

/// Resolves when Ctrl+C or SIGTERM is received.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
