use chrono::{Duration, TimeZone, Utc};
use sqlwatch_classify::{classify, CircuitBreaker, CircuitState};
use sqlwatch_core::config::ClassificationConfig;
use sqlwatch_core::errors::ClassificationError;

fn breaker() -> CircuitBreaker {
    CircuitBreaker::new(&ClassificationConfig {
        circuit_failure_threshold: 3,
        circuit_open_timeout_secs: 60,
        circuit_half_open_max_calls: 1,
        ..ClassificationConfig::default()
    })
}

fn t0() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 8, 0, 0).unwrap()
}

// ── Closed → Open ─────────────────────────────────────────────────────────

#[test]
fn unknown_keys_are_closed_and_allowed() {
    let cb = breaker();
    assert_eq!(cb.state("explain"), CircuitState::Closed);
    assert!(cb.allow_execution_at("explain", t0()));
}

#[test]
fn opens_after_threshold_transient_failures() {
    let cb = breaker();
    let transient = classify(None, "Connection timed out");
    assert_eq!(cb.record_failure_at("explain", &transient, t0()), CircuitState::Closed);
    assert_eq!(cb.record_failure_at("explain", &transient, t0()), CircuitState::Closed);
    assert_eq!(cb.record_failure_at("explain", &transient, t0()), CircuitState::Open);
    assert!(!cb.allow_execution_at("explain", t0() + Duration::seconds(5)));
}

#[test]
fn blocking_failure_opens_immediately() {
    let cb = breaker();
    let blocking = classify(Some("42S02"), "Table 'x' doesn't exist");
    assert_eq!(cb.record_failure_at("schema", &blocking, t0()), CircuitState::Open);
    assert_eq!(cb.stats("schema").unwrap().blocking_failures, 1);
}

#[test]
fn success_resets_failure_count() {
    let cb = breaker();
    let transient = classify(None, "Connection timed out");
    cb.record_failure_at("k", &transient, t0());
    cb.record_failure_at("k", &transient, t0());
    cb.record_success("k");
    cb.record_failure_at("k", &transient, t0());
    assert_eq!(cb.state("k"), CircuitState::Closed);
    assert_eq!(cb.stats("k").unwrap().consecutive_failures, 1);
}

// ── Open → HalfOpen → Closed/Open ─────────────────────────────────────────

#[test]
fn half_open_after_timeout_allows_limited_probes() {
    let cb = breaker();
    let blocking = classify(None, "Access denied for user 'm'");
    cb.record_failure_at("k", &blocking, t0());

    let later = t0() + Duration::seconds(61);
    assert!(cb.allow_execution_at("k", later));
    assert_eq!(cb.state("k"), CircuitState::HalfOpen);
    assert!(!cb.allow_execution_at("k", later), "only one probe allowed");
}

#[test]
fn probe_success_closes() {
    let cb = breaker();
    cb.record_failure_at("k", &classify(None, "Access denied"), t0());
    assert!(cb.allow_execution_at("k", t0() + Duration::seconds(61)));
    cb.record_success("k");
    assert_eq!(cb.state("k"), CircuitState::Closed);
    assert!(cb.allow_execution_at("k", t0() + Duration::seconds(62)));
}

#[test]
fn probe_failure_reopens() {
    let cb = breaker();
    let transient = classify(None, "Connection timed out");
    for _ in 0..3 {
        cb.record_failure_at("k", &transient, t0());
    }
    let later = t0() + Duration::seconds(61);
    assert!(cb.allow_execution_at("k", later));
    assert_eq!(cb.record_failure_at("k", &transient, later), CircuitState::Open);
    assert!(!cb.allow_execution_at("k", later + Duration::seconds(1)));
}

#[test]
fn huge_open_timeout_reports_retry_after_without_overflow() {
    let cb = CircuitBreaker::new(&ClassificationConfig {
        circuit_open_timeout_secs: 10_000_000_000_000,
        ..ClassificationConfig::default()
    });
    cb.record_failure_at("notifier", &classify(None, "Access denied"), t0());
    match cb.check("notifier", t0() + Duration::seconds(1)) {
        Err(ClassificationError::CircuitOpen { retry_after_secs, .. }) => {
            assert!(retry_after_secs > 0);
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn check_reports_retry_after() {
    let cb = breaker();
    cb.record_failure_at("k", &classify(None, "Access denied"), t0());
    let err = cb.check("k", t0() + Duration::seconds(20)).unwrap_err();
    match err {
        ClassificationError::CircuitOpen { key, retry_after_secs } => {
            assert_eq!(key, "k");
            assert_eq!(retry_after_secs, 40);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

// ── Reset and isolation ───────────────────────────────────────────────────

#[test]
fn keys_are_independent() {
    let cb = breaker();
    cb.record_failure_at("a", &classify(None, "Access denied"), t0());
    assert_eq!(cb.state("a"), CircuitState::Open);
    assert_eq!(cb.state("b"), CircuitState::Closed);
    assert_eq!(cb.open_keys(), vec!["a".to_string()]);
}

#[test]
fn reset_and_reset_all() {
    let cb = breaker();
    let blocking = classify(None, "Access denied");
    cb.record_failure_at("a", &blocking, t0());
    cb.record_failure_at("b", &blocking, t0());
    cb.reset("a");
    assert_eq!(cb.state("a"), CircuitState::Closed);
    assert_eq!(cb.state("b"), CircuitState::Open);
    cb.reset_all();
    assert!(cb.open_keys().is_empty());
}

#[test]
fn concurrent_failures_open_once_and_count_all() {
    let cb = std::sync::Arc::new(breaker());
    let transient = classify(None, "Connection timed out");
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cb = cb.clone();
            let c = transient.clone();
            std::thread::spawn(move || {
                for _ in 0..10 {
                    cb.record_failure_at("shared", &c, t0());
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    let stats = cb.stats("shared").unwrap();
    assert_eq!(stats.state, CircuitState::Open);
    assert_eq!(stats.consecutive_failures, 80);
}
