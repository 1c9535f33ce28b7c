//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_requests_total` (counter): requests by outcome (claimed / not_found)
//! - `router_handler_attempts` (histogram): handlers invoked per request
//! - `router_request_duration_seconds` (histogram): dispatch latency
//! - `router_dispatch_failures_total` (counter): dispatch tasks that died

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::dispatch::Outcome;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_dispatch(outcome: &Outcome, start: Instant) {
    metrics::counter!("router_requests_total", "outcome" => outcome.label()).increment(1);
    metrics::histogram!("router_handler_attempts").record(outcome.attempts() as f64);
    metrics::histogram!("router_request_duration_seconds", "outcome" => outcome.label())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_dispatch_failure() {
    metrics::counter!("router_dispatch_failures_total").increment(1);
}
