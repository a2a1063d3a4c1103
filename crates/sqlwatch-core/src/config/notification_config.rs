use serde::{Deserialize, Serialize};

use super::defaults;
use super::validate::{check_positive, check_range};
use crate::constants;
use crate::errors::ConfigError;
use crate::models::Severity;

/// Duration cut-offs (seconds) for severity bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityThresholds {
    pub medium: f64,
    pub high: f64,
    pub critical: f64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            medium: defaults::DEFAULT_SEVERITY_MEDIUM_SECS,
            high: defaults::DEFAULT_SEVERITY_HIGH_SECS,
            critical: defaults::DEFAULT_SEVERITY_CRITICAL_SECS,
        }
    }
}

impl SeverityThresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("notification.severity_thresholds.medium", self.medium)?;
        if self.high < self.medium {
            return Err(ConfigError::invalid(
                "notification.severity_thresholds.high",
                format!("must be >= medium ({})", self.medium),
            ));
        }
        if self.critical < self.high {
            return Err(ConfigError::invalid(
                "notification.severity_thresholds.critical",
                format!("must be >= high ({})", self.high),
            ));
        }
        Ok(())
    }
}

/// Template notification gating configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Display WARNING threshold in seconds (1.0 to 10.0).
    pub severity_threshold: f64,
    /// Minimum hours between notifications for one template (1 to 168).
    pub cooldown_hours: u32,
    /// Current/last-notified average ratio that bypasses cooldown (1.1 to 10.0).
    pub degradation_multiplier: f64,
    /// Templates below this severity are never notified.
    pub notify_min_severity: Severity,
    pub severity_thresholds: SeverityThresholds,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            severity_threshold: defaults::DEFAULT_SEVERITY_THRESHOLD_SECS,
            cooldown_hours: defaults::DEFAULT_COOLDOWN_HOURS,
            degradation_multiplier: defaults::DEFAULT_DEGRADATION_MULTIPLIER,
            notify_min_severity: Severity::Medium,
            severity_thresholds: SeverityThresholds::default(),
        }
    }
}

impl NotificationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_gate_parameters(
            self.severity_threshold,
            self.cooldown_hours,
            self.degradation_multiplier,
        )?;
        self.severity_thresholds.validate()
    }
}

/// Range checks shared by every holder of the three gate parameters.
pub fn validate_gate_parameters(
    severity_threshold: f64,
    cooldown_hours: u32,
    degradation_multiplier: f64,
) -> Result<(), ConfigError> {
    let (lo, hi) = constants::SEVERITY_THRESHOLD_RANGE;
    check_range("severity_threshold", severity_threshold, lo, hi)?;
    let (lo, hi) = constants::COOLDOWN_HOURS_RANGE;
    check_range("cooldown_hours", f64::from(cooldown_hours), f64::from(lo), f64::from(hi))?;
    let (lo, hi) = constants::DEGRADATION_MULTIPLIER_RANGE;
    check_range("degradation_multiplier", degradation_multiplier, lo, hi)
}
