use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AlertSeverity;

/// Lifecycle status of a fired alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertStatus {
    Firing,
    Resolved,
}

/// An alert produced by one rule against one snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiredAlert {
    pub id: Uuid,
    pub rule_id: u64,
    pub rule_name: String,
    pub display_name: String,
    pub severity: AlertSeverity,
    /// Always `Firing` at creation.
    pub status: AlertStatus,
    pub message: String,
    pub metric_name: String,
    pub metric_value: f64,
    pub threshold_value: Option<f64>,
    /// The snapshot's metrics as a JSON object.
    pub details: serde_json::Value,
    pub triggered_at: DateTime<Utc>,
}
