//! Prometheus metrics collection for the math server

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Instant;

/// Initialize all metric descriptions
pub fn init_metrics() {
    describe_counter!("math_operations_total", "Total number of completed operations");
    describe_counter!("math_errors_total", "Total number of rejected or failed requests");
    describe_histogram!(
        "math_operation_latency_seconds",
        "Operation latency in seconds, including persistence"
    );
}

/// Record a completed operation
pub fn record_operation(operation: &str, latency_seconds: f64) {
    counter!("math_operations_total", 1, "operation" => operation.to_string());
    histogram!(
        "math_operation_latency_seconds",
        latency_seconds,
        "operation" => operation.to_string()
    );
}

/// Record an error
pub fn record_error(error_type: &str) {
    counter!("math_errors_total", 1, "type" => error_type.to_string());
}

/// Timer for measuring operation latency
pub struct LatencyTimer {
    start: Instant,
}

impl LatencyTimer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Storage for Prometheus handle
static PROMETHEUS_HANDLE: std::sync::OnceLock<metrics_exporter_prometheus::PrometheusHandle> =
    std::sync::OnceLock::new();

/// Install the Prometheus recorder
pub fn init_prometheus() -> anyhow::Result<()> {
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let handle = builder.install_recorder()?;
    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("Failed to set Prometheus handle"))?;
    Ok(())
}

/// Render metrics in the Prometheus text format
pub fn get_prometheus_metrics() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Prometheus metrics not initialized\n".to_string())
}
