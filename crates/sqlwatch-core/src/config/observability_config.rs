use serde::{Deserialize, Serialize};

use super::defaults;
use super::validate::check_range;
use crate::errors::ConfigError;

/// Observability subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub log_level: String,
    /// Emit JSON log lines instead of the human-readable format.
    pub json_logs: bool,
    /// Window for counting degradation events per component.
    pub degradation_window_secs: i64,
    /// More events than this inside the window raise a warning.
    pub degradation_max_events: usize,
    /// Continuous degradation longer than this raises a critical alert.
    pub degradation_critical_after_secs: i64,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::DEFAULT_LOG_LEVEL.to_string(),
            json_logs: defaults::DEFAULT_JSON_LOGS,
            degradation_window_secs: defaults::DEFAULT_DEGRADATION_WINDOW_SECS,
            degradation_max_events: defaults::DEFAULT_DEGRADATION_MAX_EVENTS,
            degradation_critical_after_secs: defaults::DEFAULT_DEGRADATION_CRITICAL_AFTER_SECS,
        }
    }
}

impl ObservabilityConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "observability.degradation_window_secs",
            self.degradation_window_secs as f64,
            1.0,
            defaults::MAX_DEGRADATION_SPAN_SECS as f64,
        )?;
        check_range(
            "observability.degradation_critical_after_secs",
            self.degradation_critical_after_secs as f64,
            1.0,
            defaults::MAX_DEGRADATION_SPAN_SECS as f64,
        )
    }
}
