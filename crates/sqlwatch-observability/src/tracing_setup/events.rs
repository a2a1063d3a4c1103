//! Structured log events for the decision points.
//!
//! Each function emits a `tracing` event with an `event` field naming it.

/// A fingerprint was seen for the first time.
pub fn template_first_seen(fingerprint: &str, template: &str) {
    tracing::info!(
        event = "template_first_seen",
        fingerprint = %fingerprint,
        template = %template,
        "new query template"
    );
}

/// The notification gate decided for one template.
pub fn notification_gated(fingerprint: &str, notify: bool, reason: &str) {
    tracing::debug!(
        event = "notification_gated",
        fingerprint = %fingerprint,
        notify = notify,
        reason = %reason,
        "notification gate decided"
    );
}

/// An alert rule fired.
pub fn alert_fired(rule_id: u64, rule_name: &str, metric: &str, value: f64, severity: &str) {
    tracing::warn!(
        event = "alert_fired",
        rule_id = rule_id,
        rule_name = %rule_name,
        metric = %metric,
        value = value,
        severity = %severity,
        "alert rule fired"
    );
}

/// Masking fell back to its failure policy.
pub fn masking_degraded(reason: &str, fail_closed: bool) {
    tracing::error!(
        event = "masking_degraded",
        reason = %reason,
        fail_closed = fail_closed,
        "masking failed, applying failure policy"
    );
}

/// Fingerprinting fell back to hashing the raw text.
pub fn fingerprint_fallback(reason: &str, sql_len: usize) {
    tracing::warn!(
        event = "fingerprint_fallback",
        reason = %reason,
        sql_len = sql_len,
        "lexing failed, fingerprinting raw text"
    );
}

/// A failure was classified.
pub fn error_classified(code: &str, category: &str, strategy: &str) {
    tracing::info!(
        event = "error_classified",
        code = %code,
        category = %category,
        strategy = %strategy,
        "error classified"
    );
}

/// A circuit opened for a component.
pub fn circuit_opened(key: &str, failures: u32) {
    tracing::warn!(
        event = "circuit_opened",
        key = %key,
        failures = failures,
        "circuit breaker opened"
    );
}

/// A component entered degraded mode.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}
