use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Severity;

/// What a notifier is asked to deliver for one template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub fingerprint: String,
    /// Masked template text; never raw SQL.
    pub template_text: String,
    pub severity: Severity,
    pub avg_query_time: f64,
    pub max_query_time: f64,
    pub occurrence_count: u64,
    /// Gate reason label, e.g. "first_contact" or "escalation".
    pub reason: String,
    pub requested_at: DateTime<Utc>,
}
