//! DecisionCore owns every engine and wires the ingest, notify, classify and
//! alert paths together. Built once from a validated [`SqlwatchConfig`].

use std::cell::Cell;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use sqlwatch_alerting::AlertRuleEngine;
use sqlwatch_classify::{CircuitBreaker, ClassificationContext, ErrorClassifier, RetryPolicy};
use sqlwatch_core::config::SqlwatchConfig;
use sqlwatch_core::errors::SqlwatchResult;
use sqlwatch_core::models::{
    AlertRule, DegradationEvent, FiredAlert, MetricSnapshot, NotificationRequest, QueryTemplate,
    RecoveryStrategy, Severity, TemplateStatus,
};
use sqlwatch_core::traits::{AlertHistorySink, INotifier, ITemplateStore};
use sqlwatch_fingerprint::SqlFingerprinter;
use sqlwatch_masking::SqlMasker;
use sqlwatch_notify::{
    abandon_in_store, severity_for, GateDecision, NotificationSettings, TemplateRegistry,
};
use sqlwatch_observability::{
    evaluate_alerts_at, DegradationAlert, DegradationThresholds, DegradationTracker,
};

use crate::outcome::{FailureOutcome, IngestOutcome, NotifyOutcome};

/// Circuit breaker key for notification delivery.
pub const NOTIFIER_COMPONENT: &str = "notifier";
pub const MASKING_COMPONENT: &str = "masking";
pub const FINGERPRINT_COMPONENT: &str = "fingerprint";

pub struct DecisionCore {
    config: SqlwatchConfig,
    fingerprinter: SqlFingerprinter,
    masker: SqlMasker,
    classifier: ErrorClassifier,
    breaker: CircuitBreaker,
    retry: RetryPolicy,
    registry: TemplateRegistry,
    settings: NotificationSettings,
    alerts: AlertRuleEngine,
    degradation: Mutex<DegradationTracker>,
    degradation_thresholds: DegradationThresholds,
    /// Recovered episodes older than the warning window no longer count.
    degradation_retention: chrono::Duration,
}

impl DecisionCore {
    /// Validate `config` and build every engine from it.
    pub fn new(config: SqlwatchConfig) -> SqlwatchResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    pub fn from_toml(toml_str: &str) -> SqlwatchResult<Self> {
        Self::new(SqlwatchConfig::from_toml(toml_str)?)
    }

    fn build(config: SqlwatchConfig) -> Self {
        Self {
            fingerprinter: SqlFingerprinter::new(),
            masker: SqlMasker::with_config(config.masking.clone()),
            classifier: ErrorClassifier::new(),
            breaker: CircuitBreaker::new(&config.classification),
            retry: RetryPolicy::from(&config.classification),
            registry: TemplateRegistry::new(),
            settings: NotificationSettings::from(&config.notification),
            alerts: AlertRuleEngine::new(&config.alerting),
            degradation: Mutex::new(DegradationTracker::new()),
            degradation_thresholds: DegradationThresholds::from(&config.observability),
            degradation_retention: chrono::Duration::seconds(
                config.observability.degradation_window_secs.max(0),
            ),
            config,
        }
    }

    pub fn config(&self) -> &SqlwatchConfig {
        &self.config
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    pub fn alert_engine(&self) -> &AlertRuleEngine {
        &self.alerts
    }

    pub fn masker(&self) -> &SqlMasker {
        &self.masker
    }

    pub fn template(&self, fingerprint: &str) -> SqlwatchResult<Option<QueryTemplate>> {
        Ok(self.registry.get(fingerprint)?)
    }

    /// Move a template through the lifecycle, e.g. when analysis starts.
    pub fn advance(&self, fingerprint: &str, to: TemplateStatus) -> SqlwatchResult<TemplateStatus> {
        Ok(self.registry.advance(fingerprint, to)?)
    }

    // ── Ingest ──

    pub fn ingest(&self, raw_sql: &str, query_time: f64) -> SqlwatchResult<IngestOutcome> {
        self.ingest_at(raw_sql, query_time, Utc::now())
    }

    /// Mask and fingerprint the same raw text independently, then record the
    /// sighting. Blank SQL produces an empty fingerprint and no template.
    pub fn ingest_at(
        &self,
        raw_sql: &str,
        query_time: f64,
        at: DateTime<Utc>,
    ) -> SqlwatchResult<IngestOutcome> {
        let masked = self.masker.mask_with_report(raw_sql);
        let (fingerprint, fell_back) = self.fingerprinter.fingerprint_with_status(raw_sql);

        {
            let mut tracker = self.tracker();
            if masked.is_degraded() {
                let fallback = if self.config.masking.fail_closed {
                    "redaction"
                } else {
                    "original text"
                };
                tracker.record(event(MASKING_COMPONENT, masked.tracker.summary(), fallback, at));
            } else if tracker.is_degraded(MASKING_COMPONENT) {
                tracker.mark_recovered_at(MASKING_COMPONENT, at);
            }
            if fell_back {
                tracker.record(event(
                    FINGERPRINT_COMPONENT,
                    "lexer rejected input",
                    "raw text hash",
                    at,
                ));
            } else if !fingerprint.is_empty() && tracker.is_degraded(FINGERPRINT_COMPONENT) {
                tracker.mark_recovered_at(FINGERPRINT_COMPONENT, at);
            }
            tracker.prune_recovered(self.degradation_retention, at);
        }

        let is_new_template = if fingerprint.is_empty() {
            false
        } else {
            self.registry
                .observe_at(&fingerprint.hash, &fingerprint.template, query_time, at)?
                .is_new
        };

        Ok(IngestOutcome {
            degraded: masked.is_degraded() || fell_back,
            fingerprint,
            masked_sql: masked.masked,
            is_new_template,
        })
    }

    // ── Notify ──

    pub fn notify_if_due(
        &self,
        fingerprint: &str,
        notifier: &dyn INotifier,
    ) -> SqlwatchResult<NotifyOutcome> {
        self.notify_if_due_at(fingerprint, notifier, Utc::now())
    }

    /// Severity floor, then the gate, both under the template's lock and
    /// against the template's current average. The notifier circuit is
    /// consulted only when the gate lets a notification through, and the
    /// notifier sees masked template text only. A failed send is classified
    /// against the notifier circuit and returned; notification info is untouched.
    pub fn notify_if_due_at(
        &self,
        fingerprint: &str,
        notifier: &dyn INotifier,
        now: DateTime<Utc>,
    ) -> SqlwatchResult<NotifyOutcome> {
        let notification = &self.config.notification;
        let severity = Cell::new(Severity::Low);

        let outcome = self.registry.evaluate_current_and_mark_at(
            fingerprint,
            &self.settings,
            now,
            |current| {
                severity.set(severity_for(
                    current.avg_query_time(),
                    &notification.severity_thresholds,
                ));
                severity.get().meets(notification.notify_min_severity)
            },
            |current, decision| {
                self.breaker.check(NOTIFIER_COMPONENT, now)?;
                let request = self.build_request(current, decision, severity.get(), now);
                notifier.send(&request).map_err(|e| {
                    let ctx = ClassificationContext::new(NOTIFIER_COMPONENT)
                        .with_operation("send");
                    self.classify_failure_at(None, &e.to_string(), &ctx, now);
                    e
                })
            },
        )?;

        let severity = severity.get();
        let Some(outcome) = outcome else {
            return Ok(NotifyOutcome::BelowSeverity { severity });
        };
        if outcome.sent {
            self.breaker.record_success(NOTIFIER_COMPONENT);
            Ok(NotifyOutcome::Sent {
                decision: outcome.decision,
                severity,
            })
        } else {
            Ok(NotifyOutcome::Suppressed {
                decision: outcome.decision,
            })
        }
    }

    fn build_request(
        &self,
        template: &QueryTemplate,
        decision: GateDecision,
        severity: Severity,
        now: DateTime<Utc>,
    ) -> NotificationRequest {
        NotificationRequest {
            fingerprint: template.fingerprint.clone(),
            template_text: self.masker.mask(&template.template_text),
            severity,
            avg_query_time: template.avg_query_time(),
            max_query_time: template.max_query_time,
            occurrence_count: template.occurrence_count,
            reason: decision.reason().to_string(),
            requested_at: now,
        }
    }

    // ── Classify ──

    pub fn classify_failure(
        &self,
        diagnostic_code: Option<&str>,
        message: &str,
        ctx: &ClassificationContext,
    ) -> FailureOutcome {
        self.classify_failure_at(diagnostic_code, message, ctx, Utc::now())
    }

    /// Classify, count the failure against `ctx.component`'s circuit, and
    /// work out the next retry time. Non-errors (CONTINUE) leave the circuit alone.
    pub fn classify_failure_at(
        &self,
        diagnostic_code: Option<&str>,
        message: &str,
        ctx: &ClassificationContext,
        now: DateTime<Utc>,
    ) -> FailureOutcome {
        let classification = self.classifier.classify(diagnostic_code, message);

        let circuit = if classification.strategy == RecoveryStrategy::Continue {
            self.breaker.state(&ctx.component)
        } else {
            self.breaker
                .record_failure_at(&ctx.component, &classification, now)
        };

        let retry_at = self
            .retry
            .should_retry(&classification, ctx.attempt)
            .then(|| {
                self.retry
                    .next_retry_at(ctx.first_failed_at.unwrap_or(now), ctx.attempt)
            });

        tracing::debug!(
            component = %ctx.component,
            operation = ctx.operation.as_deref().unwrap_or(""),
            attempt = ctx.attempt,
            code = classification.code(),
            circuit = circuit.as_str(),
            "failure classified"
        );

        FailureOutcome {
            classification,
            circuit,
            retry_at,
        }
    }

    pub fn allow_execution(&self, component: &str) -> bool {
        self.breaker.allow_execution(component)
    }

    pub fn record_success(&self, component: &str) {
        self.breaker.record_success(component);
    }

    // ── Alerts ──

    pub fn evaluate_metrics(
        &self,
        rules: &[AlertRule],
        snapshot: &MetricSnapshot,
        sink: &dyn AlertHistorySink,
    ) -> Vec<FiredAlert> {
        self.evaluate_metrics_at(rules, snapshot, sink, Utc::now())
    }

    pub fn evaluate_metrics_at(
        &self,
        rules: &[AlertRule],
        snapshot: &MetricSnapshot,
        sink: &dyn AlertHistorySink,
        now: DateTime<Utc>,
    ) -> Vec<FiredAlert> {
        self.alerts.evaluate_and_record_at(rules, snapshot, sink, now)
    }

    // ── Housekeeping ──

    /// Abandon in-flight templates in `store` and in the registry. Returns
    /// the number of stored templates changed.
    pub fn on_startup(&self, store: &dyn ITemplateStore) -> SqlwatchResult<usize> {
        let stored = abandon_in_store(store)?;
        let cached = self.registry.abandon_in_flight()?;
        tracing::info!(stored = stored, cached = cached, "startup housekeeping done");
        Ok(stored)
    }

    pub fn degradation_alerts(&self) -> Vec<DegradationAlert> {
        self.degradation_alerts_at(Utc::now())
    }

    pub fn degradation_alerts_at(&self, now: DateTime<Utc>) -> Vec<DegradationAlert> {
        evaluate_alerts_at(&self.tracker(), &self.degradation_thresholds, now)
    }

    pub fn is_degraded(&self, component: &str) -> bool {
        self.tracker().is_degraded(component)
    }

    fn tracker(&self) -> MutexGuard<'_, DegradationTracker> {
        self.degradation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DecisionCore {
    fn default() -> Self {
        Self::build(SqlwatchConfig::default())
    }
}

fn event(
    component: &str,
    failure: impl Into<String>,
    fallback: &str,
    at: DateTime<Utc>,
) -> DegradationEvent {
    DegradationEvent {
        component: component.to_string(),
        failure: failure.into(),
        fallback_used: fallback.to_string(),
        timestamp: at,
    }
}
