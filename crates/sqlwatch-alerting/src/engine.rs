use std::time::{Duration as StdDuration, Instant};

use chrono::{DateTime, Duration, Utc};
use sqlwatch_core::config::AlertingConfig;
use sqlwatch_core::models::{AlertRule, AlertStatus, FiredAlert, MetricSnapshot};
use sqlwatch_core::traits::AlertHistorySink;
use sqlwatch_observability::tracing_setup::events;
use uuid::Uuid;

use crate::condition;
use crate::fire_state::{FireCheck, RuleFireState};
use crate::message;

/// Evaluates alert rules against metric snapshots.
///
/// Rules are independent: a misconfigured rule is logged and skipped, and
/// never stops the rest of the pass.
#[derive(Debug)]
pub struct AlertRuleEngine {
    fire_state: RuleFireState,
    evaluation_budget: StdDuration,
    retention: Duration,
}

impl Default for AlertRuleEngine {
    fn default() -> Self {
        Self::new(&AlertingConfig::default())
    }
}

impl AlertRuleEngine {
    pub fn new(config: &AlertingConfig) -> Self {
        Self {
            fire_state: RuleFireState::new(),
            evaluation_budget: StdDuration::from_millis(config.evaluation_budget_ms),
            retention: Duration::minutes(i64::from(config.fire_state_retention_minutes)),
        }
    }

    pub fn fire_state(&self) -> &RuleFireState {
        &self.fire_state
    }

    pub fn evaluate(&self, rules: &[AlertRule], snapshot: &MetricSnapshot) -> Vec<FiredAlert> {
        self.evaluate_at(rules, snapshot, Utc::now())
    }

    /// One pass over `rules` in order. Disabled rules, rules in cooldown and
    /// rules whose metric is absent from the snapshot are skipped.
    pub fn evaluate_at(
        &self,
        rules: &[AlertRule],
        snapshot: &MetricSnapshot,
        now: DateTime<Utc>,
    ) -> Vec<FiredAlert> {
        let _span = sqlwatch_observability::rule_eval_span!(rules.len(), snapshot.len()).entered();
        let start = Instant::now();
        let mut fired = Vec::new();

        for rule in rules.iter().filter(|r| r.enabled) {
            let Some(value) = snapshot.get(&rule.metric_name) else {
                tracing::debug!(
                    rule = %rule.name,
                    metric = %rule.metric_name,
                    "metric absent from snapshot"
                );
                continue;
            };

            let check = self.fire_state.fire_if(rule.id, rule.cooldown(), now, || {
                condition::is_triggered(rule, value)
            });
            match check {
                Ok(FireCheck::Fired) => {
                    let alert = build_alert(rule, value, snapshot, now);
                    events::alert_fired(
                        rule.id,
                        &rule.name,
                        &rule.metric_name,
                        value,
                        rule.severity.as_str(),
                    );
                    fired.push(alert);
                }
                Ok(FireCheck::CoolingDown) => {
                    tracing::debug!(rule = %rule.name, "rule in cooldown");
                }
                Ok(FireCheck::NotTriggered) => {}
                Err(e) => {
                    tracing::warn!(rule = %rule.name, error = %e, "alert rule skipped");
                }
            }
        }

        let elapsed = start.elapsed();
        if elapsed > self.evaluation_budget {
            tracing::warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                budget_ms = self.evaluation_budget.as_millis() as u64,
                rules = rules.len(),
                "alert evaluation exceeded budget"
            );
        }
        fired
    }

    /// Evaluate, then append every fired alert to `sink`. Sink failures are
    /// logged; the fired alerts are returned either way.
    pub fn evaluate_and_record(
        &self,
        rules: &[AlertRule],
        snapshot: &MetricSnapshot,
        sink: &dyn AlertHistorySink,
    ) -> Vec<FiredAlert> {
        self.evaluate_and_record_at(rules, snapshot, sink, Utc::now())
    }

    pub fn evaluate_and_record_at(
        &self,
        rules: &[AlertRule],
        snapshot: &MetricSnapshot,
        sink: &dyn AlertHistorySink,
        now: DateTime<Utc>,
    ) -> Vec<FiredAlert> {
        let fired = self.evaluate_at(rules, snapshot, now);
        for alert in &fired {
            if let Err(e) = sink.record(alert) {
                tracing::error!(
                    rule = %alert.rule_name,
                    alert_id = %alert.id,
                    error = %e,
                    "failed to record fired alert"
                );
            }
        }
        fired
    }

    pub fn cleanup(&self, rules: &[AlertRule]) -> usize {
        self.cleanup_at(rules, Utc::now())
    }

    pub fn cleanup_at(&self, rules: &[AlertRule], now: DateTime<Utc>) -> usize {
        let removed = self.fire_state.cleanup(rules, now);
        tracing::debug!(removed = removed, "alert fire state cleaned");
        removed
    }

    /// Drop fire-state entries older than the configured retention.
    pub fn cleanup_expired(&self) -> usize {
        self.cleanup_expired_at(Utc::now())
    }

    pub fn cleanup_expired_at(&self, now: DateTime<Utc>) -> usize {
        self.fire_state.cleanup_expired(self.retention, now)
    }
}

fn build_alert(
    rule: &AlertRule,
    value: f64,
    snapshot: &MetricSnapshot,
    now: DateTime<Utc>,
) -> FiredAlert {
    FiredAlert {
        id: Uuid::new_v4(),
        rule_id: rule.id,
        rule_name: rule.name.clone(),
        display_name: rule.label().to_string(),
        severity: rule.severity,
        status: AlertStatus::Firing,
        message: message::build_message(rule, value),
        metric_name: rule.metric_name.clone(),
        metric_value: value,
        threshold_value: rule.threshold_value,
        details: snapshot.to_json(),
        triggered_at: now,
    }
}
