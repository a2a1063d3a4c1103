//! # sqlwatch-observability
//!
//! Tracing subscriber setup, structured log events, span macros, and the
//! degradation tracker with its alert thresholds.

pub mod degradation;
pub mod tracing_setup;

pub use degradation::{
    evaluate_alerts, evaluate_alerts_at, AlertLevel, DegradationAlert, DegradationThresholds,
    DegradationTracker, RecoveryStatus, TrackedDegradation,
};
pub use tracing_setup::{init_tracing, init_tracing_json, init_tracing_with_filter};
