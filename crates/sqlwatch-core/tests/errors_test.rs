use sqlwatch_core::errors::*;

#[test]
fn config_error_names_the_field() {
    let err = ConfigError::invalid("cooldown_hours", "0 is outside [1, 168]");
    let msg = err.to_string();
    assert!(msg.contains("cooldown_hours"));
    assert!(msg.contains("[1, 168]"));
    assert_eq!(err.field(), Some("cooldown_hours"));
}

#[test]
fn illegal_transition_carries_both_states() {
    let err = NotificationError::IllegalTransition {
        from: "SENT".into(),
        to: "PENDING".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("SENT"));
    assert!(msg.contains("PENDING"));
}

#[test]
fn duplicate_rule_name_carries_name() {
    let err = AlertError::DuplicateRuleName {
        name: "qps_high".into(),
    };
    assert!(err.to_string().contains("qps_high"));
}

// --- From impls ---

#[test]
fn config_error_converts_to_sqlwatch_error() {
    let err: SqlwatchError = ConfigError::invalid("x", "bad").into();
    assert!(matches!(err, SqlwatchError::Config(_)));
    assert!(err.to_string().contains("configuration error"));
}

#[test]
fn alert_error_converts_to_sqlwatch_error() {
    let err: SqlwatchError = AlertError::SinkFailed {
        reason: "disk full".into(),
    }
    .into();
    assert!(matches!(err, SqlwatchError::Alert(_)));
}

#[test]
fn notification_error_converts_to_sqlwatch_error() {
    let err: SqlwatchError = NotificationError::SendFailed {
        reason: "smtp down".into(),
    }
    .into();
    assert!(matches!(err, SqlwatchError::Notification(_)));
}

#[test]
fn serde_json_error_converts_to_sqlwatch_error() {
    let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: SqlwatchError = json_err.into();
    assert!(matches!(err, SqlwatchError::Serialization(_)));
}

// --- Error codes ---

#[test]
fn tagged_prefixes_code() {
    let err = ConfigError::invalid("cooldown_hours", "bad");
    assert!(err.tagged().starts_with("[CONFIG_ERROR] "));
}

#[test]
fn wrapper_reports_inner_code() {
    let err: SqlwatchError = ClassificationError::CircuitOpen {
        key: "ai".into(),
        retry_after_secs: 30,
    }
    .into();
    assert_eq!(err.error_code(), error_code::CIRCUIT_OPEN);

    let err: SqlwatchError = NotificationError::IllegalTransition {
        from: "SENT".into(),
        to: "PENDING".into(),
    }
    .into();
    assert_eq!(err.error_code(), error_code::ILLEGAL_TRANSITION);
}

#[test]
fn invalid_rule_and_duplicate_share_code() {
    let a = AlertError::InvalidRule {
        rule: "r".into(),
        reason: "x".into(),
    };
    let b = AlertError::DuplicateRuleName { name: "r".into() };
    assert_eq!(a.error_code(), b.error_code());
}
