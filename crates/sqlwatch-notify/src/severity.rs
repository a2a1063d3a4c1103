use sqlwatch_core::config::SeverityThresholds;
use sqlwatch_core::constants::{CRITICAL_FLOOR_SECS, DISPLAY_CRITICAL_SECS};
use sqlwatch_core::models::{DisplaySeverity, Severity};

/// Bucket an average query time (seconds). Monotonic in `avg_secs`; anything
/// at or above [`CRITICAL_FLOOR_SECS`] is critical whatever the thresholds.
pub fn severity_for(avg_secs: f64, thresholds: &SeverityThresholds) -> Severity {
    if avg_secs.is_nan() {
        return Severity::Low;
    }
    if avg_secs >= CRITICAL_FLOOR_SECS || avg_secs >= thresholds.critical {
        Severity::Critical
    } else if avg_secs >= thresholds.high {
        Severity::High
    } else if avg_secs >= thresholds.medium {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Dashboard level: warning from the configured threshold, critical from
/// [`DISPLAY_CRITICAL_SECS`].
pub fn display_severity(avg_secs: f64, severity_threshold: f64) -> DisplaySeverity {
    if avg_secs >= DISPLAY_CRITICAL_SECS {
        DisplaySeverity::Critical
    } else if avg_secs >= severity_threshold {
        DisplaySeverity::Warning
    } else {
        DisplaySeverity::Normal
    }
}
