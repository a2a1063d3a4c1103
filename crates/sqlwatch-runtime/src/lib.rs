//! # sqlwatch-runtime
//!
//! [`DecisionCore`] is the single entry point a host process embeds: raw
//! slow-query records go in through [`DecisionCore::ingest`], notification
//! decisions come out of [`DecisionCore::notify_if_due`], and failures and
//! metric snapshots are routed to the classifier and the alert engine.

pub mod decision_core;
pub mod outcome;

pub use decision_core::{
    DecisionCore, FINGERPRINT_COMPONENT, MASKING_COMPONENT, NOTIFIER_COMPONENT,
};
pub use outcome::{FailureOutcome, IngestOutcome, NotifyOutcome};

use sqlwatch_core::config::ObservabilityConfig;

/// Install the global subscriber described by `config`. Idempotent.
pub fn init_logging(config: &ObservabilityConfig) {
    if config.json_logs {
        sqlwatch_observability::init_tracing_json();
    } else {
        sqlwatch_observability::init_tracing_with_filter(&config.log_level);
    }
}
