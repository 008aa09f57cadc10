//! Prometheus counters for contract generation and transfer.

use lazy_static::lazy_static;
use log::error;
use prometheus::{IntCounterVec, Opts, Registry};

lazy_static! {
    pub static ref CONTRACTS_GENERATED: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "contracts_generated_total",
            "Generated contract documents, by kind."
        ),
        &["kind"],
    )
    .expect("metric definition is valid");
    pub static ref CONTRACTS_DOWNLOADED: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "contracts_downloaded_total",
            "Downloaded contract documents, by kind and format."
        ),
        &["kind", "format"],
    )
    .expect("metric definition is valid");
}

/// Register the service counters on the shared registry.
pub fn register(registry: &Registry) {
    if let Err(e) = registry.register(Box::new(CONTRACTS_GENERATED.clone())) {
        error!("Failed to register contracts_generated_total: {}", e);
    }
    if let Err(e) = registry.register(Box::new(CONTRACTS_DOWNLOADED.clone())) {
        error!("Failed to register contracts_downloaded_total: {}", e);
    }
}
