use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::TemplateStatus;
use crate::constants::REANALYZE_AFTER_DAYS;

/// One shape of SQL seen repeatedly, keyed by its fingerprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryTemplate {
    pub fingerprint: String,
    pub template_text: String,
    pub first_seen_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
    pub status: TemplateStatus,
    /// Set only by `update_notification_info`.
    pub last_notified_at: Option<DateTime<Utc>>,
    /// Average query time at the last successful notification.
    pub last_notified_avg_time: Option<f64>,
    pub occurrence_count: u64,
    /// Sum of observed query times in seconds.
    pub total_query_time: f64,
    pub max_query_time: f64,
}

impl QueryTemplate {
    /// A freshly sighted template with no observations recorded yet.
    pub fn new(
        fingerprint: impl Into<String>,
        template_text: impl Into<String>,
        seen_at: DateTime<Utc>,
    ) -> Self {
        Self {
            fingerprint: fingerprint.into(),
            template_text: template_text.into(),
            first_seen_at: seen_at,
            last_seen_at: seen_at,
            status: TemplateStatus::Pending,
            last_notified_at: None,
            last_notified_avg_time: None,
            occurrence_count: 0,
            total_query_time: 0.0,
            max_query_time: 0.0,
        }
    }

    /// Record one execution. Non-finite or negative durations count as zero.
    pub fn record_sighting(&mut self, query_time: f64, at: DateTime<Utc>) {
        let query_time = if query_time.is_finite() && query_time > 0.0 {
            query_time
        } else {
            0.0
        };
        self.occurrence_count += 1;
        self.total_query_time += query_time;
        if query_time > self.max_query_time {
            self.max_query_time = query_time;
        }
        if at > self.last_seen_at {
            self.last_seen_at = at;
        }
    }

    /// Mean query time over every sighting, 0.0 before the first one.
    pub fn avg_query_time(&self) -> f64 {
        if self.occurrence_count == 0 {
            0.0
        } else {
            self.total_query_time / self.occurrence_count as f64
        }
    }

    /// Whether analysis should run again: the last attempt was abandoned, or
    /// the template has been seen across more than a week.
    pub fn should_reanalyze(&self) -> bool {
        self.status == TemplateStatus::Abandoned
            || self.last_seen_at - self.first_seen_at > Duration::days(REANALYZE_AFTER_DAYS)
    }
}
