use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlwatch_classify::CircuitState;
use sqlwatch_core::models::{ErrorClassification, Fingerprint, Severity};
use sqlwatch_notify::GateDecision;

/// Result of [`DecisionCore::ingest`](crate::DecisionCore::ingest).
#[derive(Debug, Clone, Serialize)]
pub struct IngestOutcome {
    pub fingerprint: Fingerprint,
    pub masked_sql: String,
    pub is_new_template: bool,
    /// Masking failed open or fingerprinting fell back to the raw-text hash.
    pub degraded: bool,
}

/// Result of [`DecisionCore::notify_if_due`](crate::DecisionCore::notify_if_due).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NotifyOutcome {
    /// Average time is below `notify_min_severity`; the gate was not consulted.
    BelowSeverity { severity: Severity },
    Suppressed { decision: GateDecision },
    Sent {
        decision: GateDecision,
        severity: Severity,
    },
}

impl NotifyOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }
}

/// Result of [`DecisionCore::classify_failure`](crate::DecisionCore::classify_failure).
#[derive(Debug, Clone, PartialEq)]
pub struct FailureOutcome {
    pub classification: ErrorClassification,
    /// Circuit state of the failing component after this failure.
    pub circuit: CircuitState,
    /// When to try again, if the failure is retryable and attempts remain.
    pub retry_at: Option<DateTime<Utc>>,
}
