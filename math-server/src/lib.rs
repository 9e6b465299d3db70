//! Math Server - authenticated HTTP API for basic arithmetic
//!
//! Four POST routes (`/add`, `/subtract`, `/multiply`, `/divide`) guarded by
//! a static bearer token. Every successful operation is appended to a local
//! SQLite log and reported through `tracing`.

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod metrics;
pub mod state;
pub mod tracing;

pub use api::{MathInput, OperationResult};
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};

/// Build the application router with all routes and state attached
pub fn router(state: AppState) -> Router {
    Router::new()
        // Operation endpoints
        .route("/add", post(handlers::add))
        .route("/subtract", post(handlers::subtract))
        .route("/multiply", post(handlers::multiply))
        .route("/divide", post(handlers::divide))
        // Health checks
        .route("/health/live", get(handlers::health_live))
        .route("/health/ready", get(handlers::health_ready))
        // Metrics
        .route("/metrics", get(handlers::metrics))
        .fallback(handlers::not_found)
        .with_state(state)
}
