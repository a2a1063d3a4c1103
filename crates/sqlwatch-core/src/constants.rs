/// sqlwatch version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Durations at or above this many seconds are always CRITICAL, whatever the
/// configured severity thresholds say.
pub const CRITICAL_FLOOR_SECS: f64 = 60.0;

/// Display-level CRITICAL cut-off in seconds.
pub const DISPLAY_CRITICAL_SECS: f64 = 5.0;

/// Templates whose sightings span more than this many days are re-analyzed.
pub const REANALYZE_AFTER_DAYS: i64 = 7;

/// Valid range for the notification severity threshold (seconds).
pub const SEVERITY_THRESHOLD_RANGE: (f64, f64) = (1.0, 10.0);

/// Valid range for the notification cooldown (hours).
pub const COOLDOWN_HOURS_RANGE: (u32, u32) = (1, 168);

/// Valid range for the degradation multiplier.
pub const DEGRADATION_MULTIPLIER_RANGE: (f64, f64) = (1.1, 10.0);

/// Mask character used by every masking replacement.
pub const MASK_CHAR: char = '*';

/// Length of a template fingerprint in hex characters (128 bits).
pub const FINGERPRINT_HEX_LEN: usize = 32;

/// Log filter env var read by the tracing setup.
pub const LOG_ENV_VAR: &str = "SQLWATCH_LOG";
