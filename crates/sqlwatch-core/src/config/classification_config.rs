use serde::{Deserialize, Serialize};

use super::defaults;
use super::validate::{check_at_most, check_non_zero, check_range};
use crate::errors::ConfigError;

/// Retry policy and circuit breaker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    pub retry_max_attempts: u32,
    pub retry_initial_delay_secs: u64,
    /// Backoff growth factor between attempts.
    pub retry_multiplier: f64,
    /// Upper bound for a single backoff delay.
    pub retry_max_delay_secs: u64,
    /// Consecutive failures that open a circuit.
    pub circuit_failure_threshold: u32,
    /// Seconds an open circuit waits before allowing a probe.
    pub circuit_open_timeout_secs: u64,
    pub circuit_half_open_max_calls: u32,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            retry_max_attempts: defaults::DEFAULT_RETRY_MAX_ATTEMPTS,
            retry_initial_delay_secs: defaults::DEFAULT_RETRY_INITIAL_DELAY_SECS,
            retry_multiplier: defaults::DEFAULT_RETRY_MULTIPLIER,
            retry_max_delay_secs: defaults::DEFAULT_RETRY_MAX_DELAY_SECS,
            circuit_failure_threshold: defaults::DEFAULT_CIRCUIT_FAILURE_THRESHOLD,
            circuit_open_timeout_secs: defaults::DEFAULT_CIRCUIT_OPEN_TIMEOUT_SECS,
            circuit_half_open_max_calls: defaults::DEFAULT_CIRCUIT_HALF_OPEN_MAX_CALLS,
        }
    }
}

impl ClassificationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("classification.retry_multiplier", self.retry_multiplier, 1.0, 10.0)?;
        check_at_most(
            "classification.retry_max_delay_secs",
            self.retry_max_delay_secs,
            defaults::MAX_CLASSIFICATION_WAIT_SECS,
        )?;
        check_at_most(
            "classification.circuit_open_timeout_secs",
            self.circuit_open_timeout_secs,
            defaults::MAX_CLASSIFICATION_WAIT_SECS,
        )?;
        if self.retry_max_delay_secs < self.retry_initial_delay_secs {
            return Err(ConfigError::invalid(
                "classification.retry_max_delay_secs",
                "must be >= retry_initial_delay_secs",
            ));
        }
        check_non_zero(
            "classification.circuit_failure_threshold",
            u64::from(self.circuit_failure_threshold),
        )?;
        check_non_zero(
            "classification.circuit_half_open_max_calls",
            u64::from(self.circuit_half_open_max_calls),
        )
    }
}
