//! Last-fired cache keyed by rule id.

use chrono::{DateTime, Duration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use sqlwatch_core::errors::AlertError;
use sqlwatch_core::models::AlertRule;

/// Outcome of [`RuleFireState::fire_if`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireCheck {
    CoolingDown,
    NotTriggered,
    Fired,
}

/// In-memory and never persisted; losing it only lets a rule fire early once.
#[derive(Debug, Default)]
pub struct RuleFireState {
    last_fired: DashMap<u64, DateTime<Utc>>,
}

impl RuleFireState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check cooldown, run `condition`, and record the fire, all while the
    /// rule's map entry is locked. Two concurrent callers cannot both fire.
    pub fn fire_if<F>(
        &self,
        rule_id: u64,
        cooldown: Duration,
        now: DateTime<Utc>,
        condition: F,
    ) -> Result<FireCheck, AlertError>
    where
        F: FnOnce() -> Result<bool, AlertError>,
    {
        match self.last_fired.entry(rule_id) {
            Entry::Occupied(mut entry) => {
                if now < *entry.get() + cooldown {
                    return Ok(FireCheck::CoolingDown);
                }
                if !condition()? {
                    return Ok(FireCheck::NotTriggered);
                }
                entry.insert(now);
                Ok(FireCheck::Fired)
            }
            Entry::Vacant(entry) => {
                if !condition()? {
                    return Ok(FireCheck::NotTriggered);
                }
                entry.insert(now);
                Ok(FireCheck::Fired)
            }
        }
    }

    pub fn last_fired(&self, rule_id: u64) -> Option<DateTime<Utc>> {
        self.last_fired.get(&rule_id).map(|e| *e.value())
    }

    pub fn in_cooldown(&self, rule: &AlertRule, now: DateTime<Utc>) -> bool {
        self.last_fired(rule.id)
            .is_some_and(|last| now < last + rule.cooldown())
    }

    pub fn len(&self) -> usize {
        self.last_fired.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_fired.is_empty()
    }

    pub fn clear(&self) {
        self.last_fired.clear();
    }

    /// Drop entries for rules that are gone or disabled, and entries whose
    /// cooldown ended more than one cooldown ago. Returns how many went.
    pub fn cleanup(&self, rules: &[AlertRule], now: DateTime<Utc>) -> usize {
        let before = self.last_fired.len();
        self.last_fired.retain(|id, last| {
            rules
                .iter()
                .find(|r| r.id == *id)
                .filter(|r| r.enabled)
                .is_some_and(|r| now < *last + r.cooldown() + r.cooldown())
        });
        before.saturating_sub(self.last_fired.len())
    }

    /// Drop entries older than `retention`, for callers without the rule set.
    pub fn cleanup_expired(&self, retention: Duration, now: DateTime<Utc>) -> usize {
        let before = self.last_fired.len();
        self.last_fired.retain(|_, last| now - *last < retention);
        before.saturating_sub(self.last_fired.len())
    }
}
