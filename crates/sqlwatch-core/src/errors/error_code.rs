//! Stable error codes shared by every error enum.

/// Structured error code for log fields and caller-facing strings.
pub trait SqlwatchErrorCode {
    /// Returns the stable code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the tagged error string: `[ERROR_CODE] message`.
    fn tagged(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CLASSIFICATION_ERROR: &str = "CLASSIFICATION_ERROR";
pub const CIRCUIT_OPEN: &str = "CIRCUIT_OPEN";
pub const NOTIFICATION_ERROR: &str = "NOTIFICATION_ERROR";
pub const ILLEGAL_TRANSITION: &str = "ILLEGAL_TRANSITION";
pub const SEND_FAILED: &str = "SEND_FAILED";
pub const STORE_ERROR: &str = "STORE_ERROR";
pub const ALERT_ERROR: &str = "ALERT_ERROR";
pub const INVALID_RULE: &str = "INVALID_RULE";
pub const SINK_FAILED: &str = "SINK_FAILED";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
pub const DEGRADED_MODE: &str = "DEGRADED_MODE";
