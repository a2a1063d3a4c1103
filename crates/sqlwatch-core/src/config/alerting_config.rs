use serde::{Deserialize, Serialize};

use super::defaults;
use super::validate::check_non_zero;
use crate::errors::ConfigError;

/// Alert rule engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertingConfig {
    /// Cooldown applied to rules that do not set their own.
    pub default_cooldown_minutes: u32,
    /// An evaluation pass slower than this is logged at warn.
    pub evaluation_budget_ms: u64,
    /// Fire-state entries older than this are dropped by `cleanup_expired`.
    pub fire_state_retention_minutes: u32,
}

impl Default for AlertingConfig {
    fn default() -> Self {
        Self {
            default_cooldown_minutes: defaults::DEFAULT_RULE_COOLDOWN_MINUTES,
            evaluation_budget_ms: defaults::DEFAULT_EVALUATION_BUDGET_MS,
            fire_state_retention_minutes: defaults::DEFAULT_FIRE_STATE_RETENTION_MINUTES,
        }
    }
}

impl AlertingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_zero("alerting.evaluation_budget_ms", self.evaluation_budget_ms)?;
        check_non_zero(
            "alerting.fire_state_retention_minutes",
            u64::from(self.fire_state_retention_minutes),
        )
    }
}
