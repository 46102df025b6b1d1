//! Startup orchestration.
//!
//! # Responsibilities
//! - Install logging before anything else logs
//! - Start the metrics endpoint when enabled
//!
//! # Design Decisions
//! - A bad metrics address is logged, not fatal; validation already rejects it

use std::net::SocketAddr;

use crate::config::ObservabilityConfig;
use crate::observability::{init_logging, metrics};

/// Install logging and, if enabled, the Prometheus endpoint.
pub fn init_observability(config: &ObservabilityConfig) {
    if !init_logging(config) {
        tracing::debug!("Global subscriber already installed");
    }

    if config.metrics_enabled {
        match config.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }
}
