use serde::{Deserialize, Serialize};
use sqlwatch_core::config::{validate_gate_parameters, NotificationConfig};
use sqlwatch_core::errors::ConfigError;

/// The three gate parameters, validated as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Seconds, 1.0 to 10.0.
    pub severity_threshold: f64,
    /// Hours, 1 to 168.
    pub cooldown_hours: u32,
    /// 1.1 to 10.0.
    pub degradation_multiplier: f64,
}

impl NotificationSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_gate_parameters(
            self.severity_threshold,
            self.cooldown_hours,
            self.degradation_multiplier,
        )
    }
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self::from(&NotificationConfig::default())
    }
}

impl From<&NotificationConfig> for NotificationSettings {
    fn from(config: &NotificationConfig) -> Self {
        Self {
            severity_threshold: config.severity_threshold,
            cooldown_hours: config.cooldown_hours,
            degradation_multiplier: config.degradation_multiplier,
        }
    }
}
