//! Alert thresholds: too many degradations in a window → warning, continuously degraded too long → critical.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlwatch_core::config::ObservabilityConfig;

use super::tracker::DegradationTracker;

/// Alert severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    None,
    Warning,
    Critical,
}

/// A degradation alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DegradationAlert {
    pub level: AlertLevel,
    pub component: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegradationThresholds {
    pub window_secs: i64,
    /// More events than this inside the window → warning.
    pub max_events: usize,
    pub critical_after: Duration,
}

impl Default for DegradationThresholds {
    fn default() -> Self {
        Self::from(&ObservabilityConfig::default())
    }
}

impl From<&ObservabilityConfig> for DegradationThresholds {
    fn from(config: &ObservabilityConfig) -> Self {
        Self {
            window_secs: config.degradation_window_secs,
            max_events: config.degradation_max_events,
            critical_after: Duration::seconds(config.degradation_critical_after_secs),
        }
    }
}

/// Evaluate alerts with default thresholds at the current time.
pub fn evaluate_alerts(tracker: &DegradationTracker) -> Vec<DegradationAlert> {
    evaluate_alerts_at(tracker, &DegradationThresholds::default(), Utc::now())
}

/// At most one alert per component; critical wins over warning.
pub fn evaluate_alerts_at(
    tracker: &DegradationTracker,
    thresholds: &DegradationThresholds,
    now: DateTime<Utc>,
) -> Vec<DegradationAlert> {
    let mut alerts = Vec::new();

    for component in tracker.components() {
        if let Some(duration) = tracker.degraded_duration_at(component, now) {
            if duration > thresholds.critical_after {
                alerts.push(DegradationAlert {
                    level: AlertLevel::Critical,
                    component: component.to_string(),
                    message: format!(
                        "{component} has been degraded for over {} hours",
                        thresholds.critical_after.num_hours()
                    ),
                });
                continue;
            }
        }

        let recent_count = tracker.count_recent_at(component, thresholds.window_secs, now);
        if recent_count > thresholds.max_events {
            alerts.push(DegradationAlert {
                level: AlertLevel::Warning,
                component: component.to_string(),
                message: format!(
                    "{component} has {recent_count} degradation events in the last {}s",
                    thresholds.window_secs
                ),
            });
        }
    }

    alerts
}
