use std::sync::{Arc, Barrier};
use std::thread;

use chrono::Duration;
use sqlwatch_alerting::{build_message, validate_rules, AlertRuleEngine};
use sqlwatch_core::errors::AlertError;
use sqlwatch_core::models::{AlertRule, AlertSeverity, AlertStatus, MetricSnapshot};
use test_fixtures::builders::{snapshot, t0, threshold_rule};
use test_fixtures::collaborators::RecordingSink;
use test_fixtures::{list_fixtures, load_fixture, AlertingGolden};

// ── Golden ────────────────────────────────────────────────────────────────

#[test]
fn golden_rule_sets() {
    let files = list_fixtures("golden/alerting");
    assert!(!files.is_empty());
    for path in files {
        let rel = format!("golden/alerting/{}", path.file_name().unwrap().to_string_lossy());
        let golden: AlertingGolden = load_fixture(&rel);
        let snap = MetricSnapshot::new(t0(), golden.metrics.clone());
        let engine = AlertRuleEngine::default();
        let fired: Vec<String> = engine
            .evaluate_at(&golden.rules, &snap, t0())
            .into_iter()
            .map(|a| a.rule_name)
            .collect();
        assert_eq!(fired, golden.expected_fired, "{}", golden.description);
    }
}

// ── Cooldown ──────────────────────────────────────────────────────────────

#[test]
fn cooldown_suppresses_then_releases() {
    let engine = AlertRuleEngine::default();
    let rules = vec![threshold_rule(1, "slow_query_qps", 10.0, 30)];
    let snap = snapshot(t0(), &[("slow_query_qps", 20.0)]);

    assert_eq!(engine.evaluate_at(&rules, &snap, t0()).len(), 1);
    assert!(engine
        .evaluate_at(&rules, &snap, t0() + Duration::minutes(10))
        .is_empty());
    assert_eq!(
        engine
            .evaluate_at(&rules, &snap, t0() + Duration::minutes(31))
            .len(),
        1
    );
    assert!(engine
        .fire_state()
        .in_cooldown(&rules[0], t0() + Duration::minutes(40)));
}

#[test]
fn untriggered_rule_does_not_start_cooldown() {
    let engine = AlertRuleEngine::default();
    let rules = vec![threshold_rule(1, "slow_query_qps", 10.0, 30)];
    assert!(engine
        .evaluate_at(&rules, &snapshot(t0(), &[("slow_query_qps", 1.0)]), t0())
        .is_empty());
    let later = t0() + Duration::minutes(1);
    assert_eq!(
        engine
            .evaluate_at(&rules, &snapshot(later, &[("slow_query_qps", 11.0)]), later)
            .len(),
        1
    );
}

#[test]
fn rules_cool_down_independently() {
    let engine = AlertRuleEngine::default();
    let rules = vec![
        threshold_rule(1, "slow_query_qps", 10.0, 30),
        threshold_rule(2, "queue_backlog", 5.0, 30),
    ];
    let only_qps = snapshot(t0(), &[("slow_query_qps", 20.0)]);
    assert_eq!(engine.evaluate_at(&rules, &only_qps, t0()).len(), 1);

    let both = snapshot(t0(), &[("slow_query_qps", 20.0), ("queue_backlog", 9.0)]);
    let fired = engine.evaluate_at(&rules, &both, t0() + Duration::minutes(1));
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].rule_id, 2);
}

// ── Fired alert content ───────────────────────────────────────────────────

#[test]
fn fired_alert_carries_message_and_details() {
    let engine = AlertRuleEngine::default();
    let rule = threshold_rule(7, "queue_backlog", 100.0, 30)
        .with_description("Analysis queue is not draining");
    let snap = snapshot(t0(), &[("queue_backlog", 150.0), ("cpu_usage", 40.5)]);
    let fired = engine.evaluate_at(std::slice::from_ref(&rule), &snap, t0());
    assert_eq!(fired.len(), 1);

    let alert = &fired[0];
    assert_eq!(alert.status, AlertStatus::Firing);
    assert_eq!(alert.severity, AlertSeverity::Warning);
    assert_eq!(alert.display_name, "Rule 7");
    assert_eq!(alert.metric_value, 150.0);
    assert_eq!(alert.threshold_value, Some(100.0));
    assert_eq!(alert.triggered_at, t0());
    assert_eq!(
        alert.message,
        "Alert rule [Rule 7] fired: queue_backlog = 150.00 (threshold: > 100)\n\
         Description: Analysis queue is not draining"
    );
    assert_eq!(alert.details["queue_backlog"], 150.0);
    assert_eq!(alert.details["cpu_usage"], 40.5);
}

#[test]
fn anomaly_message_without_threshold() {
    let rule = AlertRule::anomaly(3, "ds", "datasource_status", None, AlertSeverity::Critical);
    assert_eq!(
        build_message(&rule, 1.0),
        "Alert rule [ds] fired: datasource_status = 1.00"
    );
}

// ── Sink ──────────────────────────────────────────────────────────────────

#[test]
fn fired_alerts_are_recorded() {
    let engine = AlertRuleEngine::default();
    let sink = RecordingSink::new();
    let rules = vec![threshold_rule(1, "slow_query_qps", 10.0, 30)];
    let snap = snapshot(t0(), &[("slow_query_qps", 20.0)]);
    let fired = engine.evaluate_and_record_at(&rules, &snap, &sink, t0());
    assert_eq!(fired.len(), 1);
    assert_eq!(sink.alerts().len(), 1);
    assert_eq!(sink.alerts()[0].id, fired[0].id);
}

#[test]
fn sink_failure_does_not_lose_alerts() {
    let engine = AlertRuleEngine::default();
    let sink = RecordingSink::failing();
    let rules = vec![
        threshold_rule(1, "slow_query_qps", 10.0, 30),
        threshold_rule(2, "queue_backlog", 10.0, 30),
    ];
    let snap = snapshot(t0(), &[("slow_query_qps", 20.0), ("queue_backlog", 20.0)]);
    assert_eq!(engine.evaluate_and_record_at(&rules, &snap, &sink, t0()).len(), 2);
    assert!(engine.fire_state().last_fired(2).is_some());
}

// ── Cleanup ───────────────────────────────────────────────────────────────

#[test]
fn cleanup_drops_removed_disabled_and_stale_rules() {
    let engine = AlertRuleEngine::default();
    let rules = vec![
        threshold_rule(1, "m", 0.0, 30),
        threshold_rule(2, "m", 0.0, 30),
        threshold_rule(3, "m", 0.0, 600),
    ];
    engine.evaluate_at(&rules, &snapshot(t0(), &[("m", 1.0)]), t0());
    assert_eq!(engine.fire_state().len(), 3);

    let current = vec![rules[0].clone(), rules[2].clone().disabled()];
    assert_eq!(engine.cleanup_at(&current, t0() + Duration::minutes(10)), 2);
    assert_eq!(engine.fire_state().len(), 1);

    assert_eq!(engine.cleanup_at(&current, t0() + Duration::minutes(61)), 1);
    assert!(engine.fire_state().is_empty());
}

#[test]
fn cleanup_expired_uses_retention() {
    let engine = AlertRuleEngine::default();
    let rules = vec![threshold_rule(1, "m", 0.0, 30)];
    engine.evaluate_at(&rules, &snapshot(t0(), &[("m", 1.0)]), t0());
    assert_eq!(engine.cleanup_expired_at(t0() + Duration::hours(23)), 0);
    assert_eq!(engine.cleanup_expired_at(t0() + Duration::hours(25)), 1);
}

// ── Validation ────────────────────────────────────────────────────────────

#[test]
fn validate_rules_rejects_duplicates_and_bad_threshold_rules() {
    let ok = vec![threshold_rule(1, "m", 1.0, 5), threshold_rule(2, "m", 1.0, 5)];
    assert!(validate_rules(&ok).is_ok());

    let mut dup = vec![threshold_rule(1, "m", 1.0, 5), threshold_rule(2, "m", 1.0, 5)];
    dup[1].name = dup[0].name.clone();
    assert!(matches!(
        validate_rules(&dup),
        Err(AlertError::DuplicateRuleName { .. })
    ));

    let shared_id = vec![threshold_rule(1, "m", 1.0, 5), threshold_rule(1, "n", 1.0, 5)];
    assert!(matches!(
        validate_rules(&shared_id),
        Err(AlertError::DuplicateRuleId { id: 1 })
    ));

    let mut broken = threshold_rule(3, "m", 1.0, 5);
    broken.operator = None;
    assert!(matches!(
        validate_rules(&[broken]),
        Err(AlertError::InvalidRule { .. })
    ));
}

#[test]
fn misconfigured_rule_does_not_block_others() {
    let engine = AlertRuleEngine::default();
    let mut broken = threshold_rule(1, "m", 1.0, 5);
    broken.threshold_value = None;
    let rules = vec![broken, threshold_rule(2, "m", 1.0, 5)];
    let fired = engine.evaluate_at(&rules, &snapshot(t0(), &[("m", 3.0)]), t0());
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].rule_id, 2);
}

// ── Concurrency ───────────────────────────────────────────────────────────

#[test]
fn concurrent_passes_fire_a_rule_at_most_once() {
    let engine = Arc::new(AlertRuleEngine::default());
    let rules = Arc::new(vec![threshold_rule(1, "slow_query_qps", 10.0, 30)]);
    let snap = Arc::new(snapshot(t0(), &[("slow_query_qps", 50.0)]));
    let barrier = Arc::new(Barrier::new(32));

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let rules = Arc::clone(&rules);
            let snap = Arc::clone(&snap);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                engine.evaluate_at(&rules, &snap, t0()).len()
            })
        })
        .collect();

    let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(total, 1);
}
