//! Span definitions per operation: fingerprinting, masking, gating, rule evaluation.

/// Create a fingerprint span.
#[macro_export]
macro_rules! fingerprint_span {
    ($sql_len:expr) => {
        tracing::debug_span!("sqlwatch.fingerprint", sql_len = $sql_len)
    };
}

/// Create a masking span.
#[macro_export]
macro_rules! masking_span {
    ($sql_len:expr) => {
        tracing::debug_span!("sqlwatch.masking", sql_len = $sql_len)
    };
}

/// Create a notification gate span.
#[macro_export]
macro_rules! gate_span {
    ($fingerprint:expr) => {
        tracing::info_span!("sqlwatch.gate", fingerprint = %$fingerprint)
    };
}

/// Create a rule evaluation span.
#[macro_export]
macro_rules! rule_eval_span {
    ($rule_count:expr, $metric_count:expr) => {
        tracing::info_span!(
            "sqlwatch.rule_eval",
            rule_count = $rule_count,
            metric_count = $metric_count
        )
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const FINGERPRINT: &str = "sqlwatch.fingerprint";
    pub const MASKING: &str = "sqlwatch.masking";
    pub const GATE: &str = "sqlwatch.gate";
    pub const RULE_EVAL: &str = "sqlwatch.rule_eval";
}
