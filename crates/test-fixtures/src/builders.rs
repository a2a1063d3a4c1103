//! Builders for models with many fields.

use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlwatch_core::models::{
    AlertRule, AlertSeverity, ComparisonOperator, MetricSnapshot, QueryTemplate, TemplateStatus,
};

/// Fixed reference instant for time-dependent tests.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 8, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Builder for [`QueryTemplate`] fixtures.
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
    template: QueryTemplate,
}

impl TemplateBuilder {
    pub fn new(fingerprint: &str) -> Self {
        Self {
            template: QueryTemplate::new(fingerprint, "SELECT * FROM T WHERE ID = ?", t0()),
        }
    }

    pub fn text(mut self, text: &str) -> Self {
        self.template.template_text = text.to_string();
        self
    }

    pub fn status(mut self, status: TemplateStatus) -> Self {
        self.template.status = status;
        self
    }

    /// Previously notified `ago` before [`t0`] at `avg_time` seconds.
    pub fn notified(mut self, ago: Duration, avg_time: f64) -> Self {
        self.template.last_notified_at = Some(t0() - ago);
        self.template.last_notified_avg_time = Some(avg_time);
        self
    }

    pub fn sightings(mut self, times: &[f64]) -> Self {
        for (i, t) in times.iter().enumerate() {
            self.template
                .record_sighting(*t, t0() + Duration::seconds(i as i64));
        }
        self
    }

    pub fn build(self) -> QueryTemplate {
        self.template
    }
}

/// A THRESHOLD rule `metric > threshold` with a given cooldown.
pub fn threshold_rule(id: u64, metric: &str, threshold: f64, cooldown_minutes: u32) -> AlertRule {
    AlertRule::threshold(
        id,
        format!("rule_{id}"),
        metric,
        ComparisonOperator::GreaterThan,
        threshold,
        AlertSeverity::Warning,
    )
    .with_display_name(format!("Rule {id}"))
    .with_cooldown_minutes(cooldown_minutes)
}

/// Snapshot at `at` with the given metrics.
pub fn snapshot(at: DateTime<Utc>, metrics: &[(&str, f64)]) -> MetricSnapshot {
    metrics
        .iter()
        .fold(MetricSnapshot::builder().captured_at(at), |b, (name, value)| {
            b.metric(*name, *value)
        })
        .build()
}
