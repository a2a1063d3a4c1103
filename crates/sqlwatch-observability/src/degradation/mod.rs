//! Degradation tracking and alerting.

pub mod alerting;
pub mod tracker;

pub use alerting::{evaluate_alerts, evaluate_alerts_at, AlertLevel, DegradationAlert, DegradationThresholds};
pub use tracker::{DegradationTracker, RecoveryStatus, TrackedDegradation};
