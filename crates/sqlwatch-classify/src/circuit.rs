//! Per-component circuit breaker.
//!
//! CLOSED counts consecutive failures and opens at the threshold. OPEN
//! rejects until the open timeout has passed, then lets a limited number
//! of probes through as HALF_OPEN. A probe success closes the circuit; a
//! probe failure reopens it. A BLOCKING classification opens immediately.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use sqlwatch_core::config::ClassificationConfig;
use sqlwatch_core::errors::ClassificationError;
use sqlwatch_core::models::ErrorClassification;
use sqlwatch_observability::tracing_setup::events;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

impl CircuitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Closed => "CLOSED",
            Self::Open => "OPEN",
            Self::HalfOpen => "HALF_OPEN",
        }
    }
}

impl fmt::Display for CircuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Largest open timeout `chrono::Duration` represents.
const MAX_TIMEOUT_SECS: i64 = i64::MAX / 1000;

/// Failure bookkeeping for one key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircuitStats {
    pub state: CircuitState,
    pub consecutive_failures: u32,
    pub blocking_failures: u32,
    pub last_failure_at: Option<DateTime<Utc>>,
    pub half_open_calls: u32,
}

impl Default for CircuitStats {
    fn default() -> Self {
        Self {
            state: CircuitState::Closed,
            consecutive_failures: 0,
            blocking_failures: 0,
            last_failure_at: None,
            half_open_calls: 0,
        }
    }
}

impl CircuitStats {
    fn open(&mut self) {
        self.state = CircuitState::Open;
        self.half_open_calls = 0;
    }
}

/// Circuit breakers keyed by component name.
#[derive(Debug)]
pub struct CircuitBreaker {
    failure_threshold: u32,
    open_timeout: Duration,
    half_open_max_calls: u32,
    stats: DashMap<String, CircuitStats>,
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(&ClassificationConfig::default())
    }
}

impl CircuitBreaker {
    pub fn new(config: &ClassificationConfig) -> Self {
        Self {
            failure_threshold: config.circuit_failure_threshold.max(1),
            open_timeout: Duration::seconds(
                i64::try_from(config.circuit_open_timeout_secs)
                    .unwrap_or(i64::MAX)
                    .min(MAX_TIMEOUT_SECS),
            ),
            half_open_max_calls: config.circuit_half_open_max_calls.max(1),
            stats: DashMap::new(),
        }
    }

    pub fn allow_execution(&self, key: &str) -> bool {
        self.allow_execution_at(key, Utc::now())
    }

    /// Whether a call for `key` may run at `now`. Allowed HALF_OPEN probes
    /// are counted against `half_open_max_calls`.
    pub fn allow_execution_at(&self, key: &str, now: DateTime<Utc>) -> bool {
        let Some(mut stats) = self.stats.get_mut(key) else {
            return true;
        };
        match stats.state {
            CircuitState::Closed => true,
            CircuitState::Open => {
                let elapsed = stats.last_failure_at.map(|at| now - at);
                if elapsed.is_some_and(|e| e < self.open_timeout) {
                    tracing::debug!(key = %key, "circuit open, call rejected");
                    return false;
                }
                stats.state = CircuitState::HalfOpen;
                stats.consecutive_failures = 0;
                stats.half_open_calls = 1;
                tracing::info!(key = %key, "circuit half-open, probing");
                true
            }
            CircuitState::HalfOpen => {
                if stats.half_open_calls >= self.half_open_max_calls {
                    return false;
                }
                stats.half_open_calls += 1;
                true
            }
        }
    }

    /// Like [`allow_execution`](Self::allow_execution), as a `Result`.
    pub fn check(&self, key: &str, now: DateTime<Utc>) -> Result<(), ClassificationError> {
        if self.allow_execution_at(key, now) {
            return Ok(());
        }
        let retry_after_secs = self
            .stats
            .get(key)
            .and_then(|s| s.last_failure_at)
            .and_then(|at| self.open_timeout.checked_sub(&(now - at)))
            .map_or(0, |remaining| remaining.num_seconds().max(0));
        Err(ClassificationError::CircuitOpen {
            key: key.to_string(),
            retry_after_secs,
        })
    }

    pub fn record_success(&self, key: &str) {
        if let Some(mut stats) = self.stats.get_mut(key) {
            if stats.state != CircuitState::Closed || stats.consecutive_failures > 0 {
                tracing::info!(key = %key, "circuit closed after success");
            }
            *stats = CircuitStats::default();
        }
    }

    pub fn record_failure(&self, key: &str, classification: &ErrorClassification) {
        self.record_failure_at(key, classification, Utc::now());
    }

    /// Count a failure. Returns the resulting state.
    pub fn record_failure_at(
        &self,
        key: &str,
        classification: &ErrorClassification,
        now: DateTime<Utc>,
    ) -> CircuitState {
        let mut stats = self.stats.entry(key.to_string()).or_default();
        stats.consecutive_failures = stats.consecutive_failures.saturating_add(1);
        stats.last_failure_at = Some(now);
        if classification.circuit_break {
            stats.blocking_failures = stats.blocking_failures.saturating_add(1);
        }

        let should_open = match stats.state {
            CircuitState::HalfOpen => true,
            CircuitState::Open => false,
            CircuitState::Closed => {
                classification.circuit_break
                    || stats.consecutive_failures >= self.failure_threshold
            }
        };
        if should_open {
            stats.open();
            events::circuit_opened(key, stats.consecutive_failures);
        }
        stats.state
    }

    /// Current state; unknown keys are CLOSED.
    pub fn state(&self, key: &str) -> CircuitState {
        self.stats
            .get(key)
            .map_or(CircuitState::Closed, |s| s.state)
    }

    pub fn stats(&self, key: &str) -> Option<CircuitStats> {
        self.stats.get(key).map(|s| s.clone())
    }

    pub fn reset(&self, key: &str) {
        if self.stats.remove(key).is_some() {
            tracing::info!(key = %key, "circuit reset");
        }
    }

    pub fn reset_all(&self) {
        self.stats.clear();
        tracing::info!("all circuits reset");
    }

    /// Keys whose circuit is not CLOSED.
    pub fn open_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .stats
            .iter()
            .filter(|e| e.value().state != CircuitState::Closed)
            .map(|e| e.key().clone())
            .collect();
        keys.sort();
        keys
    }
}
