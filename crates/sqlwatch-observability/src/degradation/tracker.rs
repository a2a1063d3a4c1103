//! In-memory degradation history for the decision core's components
//! (masking, fingerprint, notifier).

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlwatch_core::models::DegradationEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    /// Component is still running on its fallback.
    Active,
    Recovered,
}

/// One fallback episode plus whether the component has come back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedDegradation {
    pub event: DegradationEvent,
    pub recovery_status: RecoveryStatus,
    pub recovered_at: Option<DateTime<Utc>>,
}

impl TrackedDegradation {
    fn is_active_for(&self, component: &str) -> bool {
        self.recovery_status == RecoveryStatus::Active && self.event.component == component
    }
}

#[derive(Debug, Clone, Default)]
pub struct DegradationTracker {
    events: Vec<TrackedDegradation>,
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs `degradation_triggered` and stores the event as active.
    pub fn record(&mut self, event: DegradationEvent) {
        crate::tracing_setup::events::degradation_triggered(
            &event.component,
            &event.failure,
            &event.fallback_used,
        );
        self.events.push(TrackedDegradation {
            event,
            recovery_status: RecoveryStatus::Active,
            recovered_at: None,
        });
    }

    pub fn mark_recovered(&mut self, component: &str) {
        self.mark_recovered_at(component, Utc::now());
    }

    /// Closes every open episode of `component`; returns how many were closed.
    pub fn mark_recovered_at(&mut self, component: &str, now: DateTime<Utc>) -> usize {
        let mut closed = 0;
        for tracked in self.events.iter_mut().filter(|t| t.is_active_for(component)) {
            tracked.recovery_status = RecoveryStatus::Recovered;
            tracked.recovered_at = Some(now);
            closed += 1;
        }
        if closed > 0 {
            tracing::info!(event = "degradation_recovered", component, episodes = closed);
        }
        closed
    }

    pub fn events(&self) -> &[TrackedDegradation] {
        &self.events
    }

    /// Distinct component names seen so far, sorted.
    pub fn components(&self) -> BTreeSet<&str> {
        self.events
            .iter()
            .map(|t| t.event.component.as_str())
            .collect()
    }

    pub fn active_degradations(&self) -> Vec<&TrackedDegradation> {
        self.events
            .iter()
            .filter(|t| t.recovery_status == RecoveryStatus::Active)
            .collect()
    }

    pub fn is_degraded(&self, component: &str) -> bool {
        self.events.iter().any(|t| t.is_active_for(component))
    }

    /// Events for `component`, recovered or not, newer than `now - window_secs`.
    pub fn count_recent_at(&self, component: &str, window_secs: i64, now: DateTime<Utc>) -> usize {
        let cutoff = now - Duration::seconds(window_secs);
        self.events
            .iter()
            .filter(|t| t.event.component == component && t.event.timestamp > cutoff)
            .count()
    }

    /// Time since the oldest still-open episode of `component`.
    pub fn degraded_duration_at(&self, component: &str, now: DateTime<Utc>) -> Option<Duration> {
        self.events
            .iter()
            .filter(|t| t.is_active_for(component))
            .map(|t| t.event.timestamp)
            .min()
            .map(|since| now - since)
    }

    /// Drops recovered events whose recovery is older than `retention`.
    pub fn prune_recovered(&mut self, retention: Duration, now: DateTime<Utc>) -> usize {
        let before = self.events.len();
        self.events
            .retain(|t| t.recovered_at.map_or(true, |at| now - at <= retention));
        before - self.events.len()
    }
}
