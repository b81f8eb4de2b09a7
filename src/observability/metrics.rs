//! Metrics collection and exposition.
//!
//! # Metrics
//! - `words_http_requests_total` (counter): requests by method, route, status
//! - `words_http_request_duration_seconds` (histogram): latency distribution
//! - `words_recorded_total` (counter): accepted words
//! - `words_rejected_total` (counter): words that failed validation
//! - `words_prefix_queries_total` (counter): prefix queries by outcome
//! - `words_distinct` (gauge): distinct words in the table
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    counter!(
        "words_http_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "words_http_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_word_recorded() {
    counter!("words_recorded_total").increment(1);
}

pub fn record_word_rejected() {
    counter!("words_rejected_total").increment(1);
}

pub fn record_prefix_query(hit: bool) {
    let outcome = if hit { "hit" } else { "miss" };
    counter!("words_prefix_queries_total", "outcome" => outcome).increment(1);
}

pub fn record_distinct_words(count: usize) {
    gauge!("words_distinct").set(count as f64);
}
