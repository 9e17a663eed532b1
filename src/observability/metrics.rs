//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bridge_requests_total` (counter): inbound requests by outcome
//! - `bridge_upstream_duration_seconds` (histogram): outbound call latency by result
//!
//! Recording is a no-op until [`init_metrics`] installs the Prometheus
//! exporter, which only happens when `observability.metrics_enabled` is set.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Outcome label for a relay that produced a 200 envelope.
pub const OUTCOME_RELAYED: &str = "relayed";

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Count one finished inbound request.
pub fn record_request(outcome: &'static str) {
    counter!("bridge_requests_total", "outcome" => outcome).increment(1);
}

/// Record how long an outbound call took.
pub fn record_upstream_duration(start: Instant, completed: bool) {
    let result = if completed { "completed" } else { "failed" };
    histogram!("bridge_upstream_duration_seconds", "result" => result)
        .record(start.elapsed().as_secs_f64());
}
