// Single source of truth for all default values.

// --- Notification ---
pub const DEFAULT_SEVERITY_THRESHOLD_SECS: f64 = 3.0;
pub const DEFAULT_COOLDOWN_HOURS: u32 = 1;
pub const DEFAULT_DEGRADATION_MULTIPLIER: f64 = 1.5;
pub const DEFAULT_SEVERITY_MEDIUM_SECS: f64 = 3.0;
pub const DEFAULT_SEVERITY_HIGH_SECS: f64 = 5.0;
pub const DEFAULT_SEVERITY_CRITICAL_SECS: f64 = 10.0;

// --- Alerting ---
pub const DEFAULT_RULE_COOLDOWN_MINUTES: u32 = 30;
pub const DEFAULT_EVALUATION_BUDGET_MS: u64 = 50;
pub const DEFAULT_FIRE_STATE_RETENTION_MINUTES: u32 = 1_440; // 24 hours

// --- Masking ---
pub const DEFAULT_MASKING_ENABLED: bool = true;
pub const DEFAULT_MASKING_FAIL_CLOSED: bool = false;
pub const DEFAULT_MASKING_REDACTION: &str = "[MASKING_FAILED]";

// --- Classification ---
pub const DEFAULT_RETRY_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_INITIAL_DELAY_SECS: u64 = 10;
pub const DEFAULT_RETRY_MULTIPLIER: f64 = 2.0;
pub const DEFAULT_RETRY_MAX_DELAY_SECS: u64 = 300; // 5 minutes
pub const DEFAULT_CIRCUIT_FAILURE_THRESHOLD: u32 = 3;
pub const DEFAULT_CIRCUIT_OPEN_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CIRCUIT_HALF_OPEN_MAX_CALLS: u32 = 1;
/// Upper bound for any single backoff delay and for the open-circuit wait.
pub const MAX_CLASSIFICATION_WAIT_SECS: u64 = 86_400; // 1 day

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
pub const DEFAULT_DEGRADATION_WINDOW_SECS: i64 = 3_600; // 1 hour
pub const DEFAULT_DEGRADATION_MAX_EVENTS: usize = 3;
pub const DEFAULT_DEGRADATION_CRITICAL_AFTER_SECS: i64 = 86_400; // 24 hours
pub const MAX_DEGRADATION_SPAN_SECS: i64 = 2_592_000; // 30 days
