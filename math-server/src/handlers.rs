//! HTTP request handlers

use crate::api::{HealthResponse, HealthStatus, MathInput, OperationResult};
use crate::error::{ApiError, ApiResult};
use crate::extract::{Authenticated, MathPayload};
use crate::metrics::{self, LatencyTimer};
use crate::state::AppState;
use axum::{extract::State, Json};
use math_core::{MathError, Operation};
use std::sync::Arc;
use tracing::{error, info, warn, Instrument};

/// POST /add
pub async fn add(
    State(state): State<AppState>,
    _auth: Authenticated,
    MathPayload(input): MathPayload,
) -> ApiResult<Json<OperationResult>> {
    execute(&state, Operation::Add, input).await
}

/// POST /subtract
pub async fn subtract(
    State(state): State<AppState>,
    _auth: Authenticated,
    MathPayload(input): MathPayload,
) -> ApiResult<Json<OperationResult>> {
    execute(&state, Operation::Subtract, input).await
}

/// POST /multiply
pub async fn multiply(
    State(state): State<AppState>,
    _auth: Authenticated,
    MathPayload(input): MathPayload,
) -> ApiResult<Json<OperationResult>> {
    execute(&state, Operation::Multiply, input).await
}

/// POST /divide
pub async fn divide(
    State(state): State<AppState>,
    _auth: Authenticated,
    MathPayload(input): MathPayload,
) -> ApiResult<Json<OperationResult>> {
    execute(&state, Operation::Divide, input).await
}

async fn execute(
    state: &AppState,
    operation: Operation,
    input: MathInput,
) -> ApiResult<Json<OperationResult>> {
    run_operation(state, operation, input)
        .instrument(crate::tracing::operation_span(operation))
        .await
}

/// Guard, compute, persist, log.
///
/// Authentication and payload validation already ran in the extractors.
async fn run_operation(
    state: &AppState,
    operation: Operation,
    input: MathInput,
) -> ApiResult<Json<OperationResult>> {
    let timer = LatencyTimer::start();
    let MathInput { a, b } = input;

    if let Err(err) = operation.check_operands(a, b) {
        match err {
            MathError::DivisionByZero => warn!("Division by zero attempted"),
            _ => warn!("Rejected operands for {}: {}", operation, err),
        }
        crate::tracing::record_error(&err.to_string());
        return Err(err.into());
    }

    let result = operation.apply(a, b);

    let store = Arc::clone(&state.store);
    let persisted = tokio::task::spawn_blocking(move || store.append(operation, a, b, result))
        .await
        .map_err(|e| ApiError::Storage(format!("store task failed: {}", e)))
        .and_then(|outcome| outcome.map_err(ApiError::from));

    if let Err(err) = persisted {
        error!("Failed to persist {} operation: {}", operation, err);
        crate::tracing::record_error(&err.to_string());
        return Err(err);
    }

    info!("{}: {} and {} = {}", operation.label(), a, b, result);
    crate::tracing::record_result(result);
    metrics::record_operation(operation.name(), timer.elapsed_seconds());

    Ok(Json(OperationResult {
        operation,
        a,
        b,
        result,
    }))
}

/// Health check - liveness
pub async fn health_live(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// Health check - readiness, backed by a store round trip
pub async fn health_ready(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let store = Arc::clone(&state.store);
    let checked = tokio::task::spawn_blocking(move || store.check_connection()).await;

    match checked {
        Ok(Ok(())) => Ok(Json(HealthResponse {
            status: HealthStatus::Healthy,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.uptime_seconds(),
        })),
        Ok(Err(e)) => {
            warn!("Readiness check failed: {}", e);
            Err(ApiError::ServiceUnavailable("Store not ready".to_string()))
        }
        Err(e) => {
            warn!("Readiness check task failed: {}", e);
            Err(ApiError::ServiceUnavailable("Store not ready".to_string()))
        }
    }
}

/// Prometheus metrics endpoint
pub async fn metrics() -> String {
    metrics::get_prometheus_metrics()
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".to_string())
}
