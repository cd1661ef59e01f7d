//! Metrics collection and exposition.
//!
//! # Metrics
//! - `resolver_requests_total` (counter): resolutions by outcome
//! - `resolver_request_duration_seconds` (histogram): resolution latency
//! - `resolver_cache_events_total` (counter): hit/miss/invalidation
//! - `resolver_config_conflicts_total` (counter): skipped component instances
//! - `resolver_data_reloads_total` (counter): site data reloads by result

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one resolution and its latency.
pub fn record_resolution(outcome: &'static str, start: Instant) {
    counter!("resolver_requests_total", "outcome" => outcome).increment(1);
    histogram!("resolver_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_cache_event(event: &'static str) {
    counter!("resolver_cache_events_total", "event" => event).increment(1);
}

pub fn record_config_conflict(reason: &'static str) {
    counter!("resolver_config_conflicts_total", "reason" => reason).increment(1);
}

pub fn record_data_reload(result: &'static str) {
    counter!("resolver_data_reloads_total", "result" => result).increment(1);
}
