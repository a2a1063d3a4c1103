use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlwatch_core::config::ClassificationConfig;
use sqlwatch_core::models::ErrorClassification;

/// Bounded exponential backoff for TRANSIENT failures.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub multiplier: f64,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&ClassificationConfig::default())
    }
}

impl From<&ClassificationConfig> for RetryPolicy {
    fn from(config: &ClassificationConfig) -> Self {
        Self {
            max_attempts: config.retry_max_attempts,
            initial_delay: Duration::from_secs(config.retry_initial_delay_secs),
            multiplier: config.retry_multiplier,
            max_delay: Duration::from_secs(config.retry_max_delay_secs),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based), capped at `max_delay`.
    /// Attempt 0 waits nothing.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
        let secs = self.initial_delay.as_secs_f64() * self.multiplier.powi(exponent);
        let capped = secs.min(self.max_delay.as_secs_f64());
        Duration::try_from_secs_f64(capped).unwrap_or(self.max_delay)
    }

    /// Whether a failure classified as `classification` gets retry number
    /// `attempt`. Bounded by both the policy and the strategy's own budget.
    pub fn should_retry(&self, classification: &ErrorClassification, attempt: u32) -> bool {
        classification.retryable
            && attempt <= self.max_attempts
            && attempt <= classification.max_retries
    }

    /// When retry number `attempt` is due, counting every earlier delay.
    /// Saturates at `first_failed_at` when the total does not fit.
    pub fn next_retry_at(&self, first_failed_at: DateTime<Utc>, attempt: u32) -> DateTime<Utc> {
        self.total_delay(attempt)
            .and_then(|total| chrono::Duration::from_std(total).ok())
            .and_then(|d| first_failed_at.checked_add_signed(d))
            .unwrap_or(first_failed_at)
    }

    /// Sum of the delays for attempts `1..=attempt`. Once the cap is reached
    /// the remaining attempts are added as one multiple of `max_delay`.
    fn total_delay(&self, attempt: u32) -> Option<Duration> {
        let mut total = Duration::ZERO;
        for n in 1..=attempt {
            let delay = self.delay_for_attempt(n);
            if delay >= self.max_delay {
                let rest = self.max_delay.checked_mul(attempt - n + 1)?;
                return total.checked_add(rest);
            }
            total = total.checked_add(delay)?;
        }
        Some(total)
    }
}
