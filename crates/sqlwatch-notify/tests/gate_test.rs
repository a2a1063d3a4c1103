use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlwatch_core::models::QueryTemplate;
use sqlwatch_notify::{GateDecision, TemplateNotificationGate as Gate};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
}

fn notified(hours_ago: i64, avg: f64) -> QueryTemplate {
    let mut tpl = QueryTemplate::new("a1b2", "SELECT * FROM ORDERS WHERE ID = ?", t0());
    Gate::update_notification_info_at(&mut tpl, avg, t0() - Duration::hours(hours_ago));
    tpl
}

// ── First contact ─────────────────────────────────────────────────────────

#[test]
fn never_notified_always_notifies() {
    let tpl = QueryTemplate::new("a1b2", "SELECT ?", t0());
    assert_eq!(Gate::decide_at(&tpl, 168, 10.0, 0.0, t0()), GateDecision::FirstContact);
    assert!(Gate::should_notify_at(&tpl, 1, 1.1, 0.5, t0()));
}

// ── Escalation ────────────────────────────────────────────────────────────

#[test]
fn escalation_overrides_cooldown() {
    let tpl = notified(2, 2.0);
    assert!(Gate::should_notify_at(&tpl, 5, 1.5, 3.5, t0()));
    match Gate::decide_at(&tpl, 5, 1.5, 3.5, t0()) {
        GateDecision::Escalation { ratio } => assert!((ratio - 1.75).abs() < 1e-9),
        other => panic!("expected escalation, got {other:?}"),
    }
}

#[test]
fn ratio_exactly_at_multiplier_escalates() {
    let tpl = notified(1, 2.0);
    assert!(matches!(
        Gate::decide_at(&tpl, 5, 1.5, 3.0, t0()),
        GateDecision::Escalation { .. }
    ));
}

#[test]
fn mild_regression_inside_cooldown_is_suppressed() {
    let tpl = notified(2, 2.0);
    assert!(!Gate::should_notify_at(&tpl, 5, 1.5, 2.2, t0()));
}

// ── Cooldown ──────────────────────────────────────────────────────────────

#[test]
fn cooldown_boundary_is_inclusive() {
    let tpl = notified(5, 2.0);
    assert_eq!(Gate::decide_at(&tpl, 5, 1.5, 2.0, t0()), GateDecision::CooldownElapsed);

    let just_inside = t0() - Duration::seconds(1);
    assert!(!Gate::should_notify_at(&tpl, 5, 1.5, 2.0, just_inside));
}

#[test]
fn improvement_after_cooldown_still_notifies() {
    let tpl = notified(30, 8.0);
    assert!(Gate::should_notify_at(&tpl, 24, 2.0, 1.0, t0()));
}

// ── Mutation ──────────────────────────────────────────────────────────────

#[test]
fn update_records_time_and_average() {
    let mut tpl = QueryTemplate::new("a1b2", "SELECT ?", t0());
    Gate::update_notification_info_at(&mut tpl, 4.25, t0());
    assert_eq!(tpl.last_notified_at, Some(t0()));
    assert_eq!(tpl.last_notified_avg_time, Some(4.25));
    assert!(!Gate::should_notify_at(&tpl, 1, 2.0, 4.25, t0()));
}

// ── Aggregated sightings ──────────────────────────────────────────────────

#[test]
fn average_over_sightings_drives_escalation() {
    use test_fixtures::builders::{t0 as fixed_now, TemplateBuilder};

    let tpl = TemplateBuilder::new("c3d4")
        .text("SELECT * FROM PAYMENTS WHERE USER_ID = ?")
        .notified(Duration::hours(1), 1.0)
        .sightings(&[1.0, 3.0])
        .build();
    assert_eq!(tpl.occurrence_count, 2);
    let avg = tpl.avg_query_time();
    assert!((avg - 2.0).abs() < 1e-9);
    assert!(matches!(
        Gate::decide_at(&tpl, 24, 1.5, avg, fixed_now()),
        GateDecision::Escalation { .. }
    ));
    assert!(!Gate::should_notify_at(&tpl, 24, 2.5, avg, fixed_now()));
}
