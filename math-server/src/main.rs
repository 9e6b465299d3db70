//! Math HTTP Server binary

use math_core::OperationStore;
use math_server::{router, AppState, ServerConfig};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;

    if config.otel_enabled {
        math_server::tracing::init_tracing_stack("math-server")?;
        info!("OpenTelemetry tracing enabled");
    } else {
        math_server::tracing::init_console_logging()?;
        info!("Console logging enabled (set OTEL_ENABLED=true for OpenTelemetry)");
    }

    info!("Starting Math HTTP Server v{}", env!("CARGO_PKG_VERSION"));

    math_server::metrics::init_prometheus()?;
    math_server::metrics::init_metrics();

    // Schema is created once here rather than per request
    let store = OperationStore::open(config.store.clone())?;
    let state = AppState::new(store);

    let app = router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .layer(CompressionLayer::new()),
    );

    info!("Listening on {}", config.bind_address);

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install CTRL+C signal handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal, shutting down gracefully...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    if config.otel_enabled {
        info!("Flushing OpenTelemetry traces...");
        math_server::tracing::shutdown_telemetry();
    }

    info!("Server shutdown complete");
    Ok(())
}
