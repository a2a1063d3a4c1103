use chrono::{Duration, TimeZone, Utc};
use sqlwatch_core::models::*;

fn t0() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

// ── QueryTemplate ──

#[test]
fn new_template_is_pending_and_unnotified() {
    let t = QueryTemplate::new("abc", "SELECT ?", t0());
    assert_eq!(t.status, TemplateStatus::Pending);
    assert!(t.last_notified_at.is_none());
    assert!(t.last_notified_avg_time.is_none());
    assert_eq!(t.occurrence_count, 0);
    assert_eq!(t.avg_query_time(), 0.0);
}

#[test]
fn record_sighting_updates_aggregates() {
    let mut t = QueryTemplate::new("abc", "SELECT ?", t0());
    t.record_sighting(2.0, t0() + Duration::minutes(1));
    t.record_sighting(4.0, t0() + Duration::minutes(2));
    assert_eq!(t.occurrence_count, 2);
    assert_eq!(t.max_query_time, 4.0);
    assert!((t.avg_query_time() - 3.0).abs() < 1e-9);
    assert_eq!(t.last_seen_at, t0() + Duration::minutes(2));
}

#[test]
fn record_sighting_never_moves_last_seen_backwards() {
    let mut t = QueryTemplate::new("abc", "SELECT ?", t0());
    t.record_sighting(1.0, t0() + Duration::hours(1));
    t.record_sighting(1.0, t0());
    assert_eq!(t.last_seen_at, t0() + Duration::hours(1));
}

#[test]
fn record_sighting_treats_nan_as_zero() {
    let mut t = QueryTemplate::new("abc", "SELECT ?", t0());
    t.record_sighting(f64::NAN, t0());
    assert_eq!(t.occurrence_count, 1);
    assert_eq!(t.total_query_time, 0.0);
}

#[test]
fn should_reanalyze_after_a_week_of_sightings() {
    let mut t = QueryTemplate::new("abc", "SELECT ?", t0());
    t.record_sighting(1.0, t0() + Duration::days(7));
    assert!(!t.should_reanalyze());
    t.record_sighting(1.0, t0() + Duration::days(7) + Duration::seconds(1));
    assert!(t.should_reanalyze());
}

#[test]
fn should_reanalyze_when_abandoned() {
    let mut t = QueryTemplate::new("abc", "SELECT ?", t0());
    t.status = TemplateStatus::Abandoned;
    assert!(t.should_reanalyze());
}

// ── TemplateStatus ──

#[test]
fn template_status_parses_case_insensitively() {
    assert_eq!("waiting".parse::<TemplateStatus>().unwrap(), TemplateStatus::Waiting);
    assert_eq!("SENT".parse::<TemplateStatus>().unwrap(), TemplateStatus::Sent);
    assert!("DONE".parse::<TemplateStatus>().is_err());
}

#[test]
fn in_flight_statuses() {
    let in_flight: Vec<_> = TemplateStatus::ALL
        .into_iter()
        .filter(TemplateStatus::is_in_flight)
        .collect();
    assert_eq!(
        in_flight,
        vec![TemplateStatus::Pending, TemplateStatus::Analyzing, TemplateStatus::Waiting]
    );
    assert!(TemplateStatus::ALL
        .into_iter()
        .all(|s| s.is_in_flight() != s.is_terminal()));
}

// ── AlertRule ──

#[test]
fn operators_parse_from_text() {
    assert_eq!(">".parse::<ComparisonOperator>().unwrap(), ComparisonOperator::GreaterThan);
    assert_eq!(">=".parse::<ComparisonOperator>().unwrap(), ComparisonOperator::GreaterOrEqual);
    assert_eq!("<".parse::<ComparisonOperator>().unwrap(), ComparisonOperator::LessThan);
    assert_eq!("<=".parse::<ComparisonOperator>().unwrap(), ComparisonOperator::LessOrEqual);
    assert_eq!("=".parse::<ComparisonOperator>().unwrap(), ComparisonOperator::Equal);
    assert!("!=".parse::<ComparisonOperator>().is_err());
}

#[test]
fn operator_serde_uses_symbols() {
    let json = serde_json::to_string(&ComparisonOperator::GreaterOrEqual).unwrap();
    assert_eq!(json, "\">=\"");
    let back: ComparisonOperator = serde_json::from_str("\"<\"").unwrap();
    assert_eq!(back, ComparisonOperator::LessThan);
}

#[test]
fn operator_never_matches_nan() {
    for op in [
        ComparisonOperator::GreaterThan,
        ComparisonOperator::GreaterOrEqual,
        ComparisonOperator::LessThan,
        ComparisonOperator::LessOrEqual,
        ComparisonOperator::Equal,
    ] {
        assert!(!op.apply(f64::NAN, 1.0));
    }
}

#[test]
fn rule_type_parses_from_text() {
    assert_eq!("threshold".parse::<RuleType>().unwrap(), RuleType::Threshold);
    assert_eq!("ANOMALY".parse::<RuleType>().unwrap(), RuleType::Anomaly);
    assert_eq!("Trend".parse::<RuleType>().unwrap(), RuleType::Trend);
    assert!("spike".parse::<RuleType>().is_err());
}

#[test]
fn rule_deserializes_with_defaults() {
    let json = r#"{
        "id": 7,
        "name": "backlog",
        "display_name": "Queue backlog",
        "metric_name": "queue_backlog",
        "rule_type": "THRESHOLD",
        "operator": ">",
        "threshold_value": 100.0,
        "severity": "WARNING"
    }"#;
    let rule: AlertRule = serde_json::from_str(json).unwrap();
    assert!(rule.enabled);
    assert_eq!(rule.cooldown_minutes, 30);
    assert!(rule.description.is_none());
    assert!(rule.validate().is_ok());
}

#[test]
fn threshold_rule_without_operator_is_invalid() {
    let mut rule = AlertRule::threshold(
        1,
        "qps",
        metric_names::SLOW_QUERY_QPS,
        ComparisonOperator::GreaterThan,
        10.0,
        AlertSeverity::Warning,
    );
    rule.operator = None;
    let err = rule.validate().unwrap_err();
    assert!(err.to_string().contains("operator"));
}

#[test]
fn rule_with_empty_metric_is_invalid() {
    let rule = AlertRule::anomaly(1, "ds", "", None, AlertSeverity::Critical);
    assert!(rule.validate().is_err());
}

#[test]
fn anomaly_rule_needs_no_threshold() {
    let rule = AlertRule::anomaly(1, "ds", "datasource_status", None, AlertSeverity::Critical);
    assert!(rule.validate().is_ok());
}

#[test]
fn validate_rules_rejects_duplicate_names() {
    let a = AlertRule::anomaly(1, "ds", "datasource_status", None, AlertSeverity::Critical);
    let b = AlertRule::anomaly(2, "ds", "queue_backlog", None, AlertSeverity::Info);
    let err = validate_rules(&[a, b]).unwrap_err();
    assert!(err.to_string().contains("duplicate"));
}

#[test]
fn label_falls_back_to_name() {
    let rule = AlertRule::anomaly(1, "ds", "m", None, AlertSeverity::Info).with_display_name(" ");
    assert_eq!(rule.label(), "ds");
}

// ── MetricSnapshot ──

#[test]
fn snapshot_builder_collects_metrics() {
    let snap = MetricSnapshot::builder()
        .captured_at(t0())
        .slow_query_qps(12.5)
        .queue_backlog(3.0)
        .metric("custom", 1.0)
        .build();
    assert_eq!(snap.captured_at(), t0());
    assert_eq!(snap.len(), 3);
    assert_eq!(snap.get(metric_names::SLOW_QUERY_QPS), Some(12.5));
    assert_eq!(snap.get("missing"), None);
}

#[test]
fn snapshot_json_maps_non_finite_to_null() {
    let snap = MetricSnapshot::builder()
        .metric("a", 1.5)
        .metric("b", f64::INFINITY)
        .build();
    let json = snap.to_json();
    assert_eq!(json["a"], serde_json::json!(1.5));
    assert!(json["b"].is_null());
}

// ── Error taxonomy ──

#[test]
fn category_strategy_table() {
    assert_eq!(ErrorCategory::Blocking.recovery_strategy(), RecoveryStrategy::Abort);
    assert_eq!(ErrorCategory::Transient.recovery_strategy(), RecoveryStrategy::Retry);
    assert_eq!(ErrorCategory::Permanent.recovery_strategy(), RecoveryStrategy::Abort);
    assert_eq!(ErrorCategory::None.recovery_strategy(), RecoveryStrategy::Continue);
}

#[test]
fn only_transient_is_retryable_and_only_blocking_breaks() {
    for category in ErrorCategory::ALL {
        assert_eq!(category.is_retryable(), category == ErrorCategory::Transient);
        assert_eq!(category.should_circuit_break(), category == ErrorCategory::Blocking);
    }
}

#[test]
fn every_kind_strategy_derives_from_category() {
    for spec in ERROR_KINDS {
        let c = ErrorClassification::for_kind(spec.kind, &[]);
        assert_eq!(c.strategy, spec.category.recovery_strategy(), "{}", spec.code);
        assert_eq!(c.retryable, spec.category == ErrorCategory::Transient);
        let expected_retries = if c.strategy == RecoveryStrategy::Retry { 3 } else { 0 };
        assert_eq!(c.max_retries, expected_retries);
    }
}

#[test]
fn kind_codes_round_trip() {
    for spec in ERROR_KINDS {
        assert_eq!(ErrorKind::from_code(spec.code).unwrap(), spec.kind);
    }
    assert!(ErrorKind::from_code("NOPE_999").is_err());
}

#[test]
fn user_message_substitutes_args() {
    let msg = ErrorKind::TableNotFound.format_user_message(&["shop.orders"]);
    assert!(msg.contains("'shop.orders'"));
    let msg = ErrorKind::TableNotFound.format_user_message(&[]);
    assert!(msg.contains("'{}'"));
}

#[test]
fn severity_is_ordered() {
    assert!(Severity::Critical.meets(Severity::Medium));
    assert!(Severity::Medium.meets(Severity::Medium));
    assert!(!Severity::Low.meets(Severity::Medium));
    assert_eq!("HIGH".parse::<Severity>().unwrap(), Severity::High);
}
