//! Metrics collection and exposition.
//!
//! # Metrics
//! - `aptos_transactions_submitted_total` (counter): accepted submissions by action
//! - `aptos_api_errors_total` (counter): responses with status >= 400 by endpoint, status
//! - `aptos_mint_outcomes_total` (counter): scheduled mint outcomes by kind

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Install the Prometheus recorder and its HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics recorder"),
    }
}

pub fn record_submission(action: &str) {
    metrics::counter!("aptos_transactions_submitted_total", "action" => action.to_string())
        .increment(1);
}

pub fn record_api_error(endpoint: &str, status: u16) {
    metrics::counter!(
        "aptos_api_errors_total",
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

pub fn record_mint_outcome(outcome: &str) {
    metrics::counter!("aptos_mint_outcomes_total", "outcome" => outcome.to_string()).increment(1);
}
