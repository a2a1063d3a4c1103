//! In-memory template registry.
//!
//! One `Mutex` per fingerprint inside a `DashMap`. The map shard lock is held
//! only long enough to clone the slot's `Arc`; all template work happens under
//! the per-fingerprint mutex, so different fingerprints never contend.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use sqlwatch_core::errors::{NotificationError, SqlwatchResult};
use sqlwatch_core::models::{QueryTemplate, TemplateStatus};
use sqlwatch_observability::tracing_setup::events;

use crate::gate::{GateDecision, TemplateNotificationGate};
use crate::housekeeping;
use crate::lifecycle;
use crate::settings::NotificationSettings;

type Slot = Arc<Mutex<QueryTemplate>>;

/// Result of [`TemplateRegistry::observe`].
#[derive(Debug, Clone)]
pub struct Observation {
    pub is_new: bool,
    /// The template after this sighting was recorded.
    pub template: QueryTemplate,
}

/// Result of [`TemplateRegistry::evaluate_and_mark`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateOutcome {
    pub decision: GateDecision,
    /// The send callback ran and succeeded.
    pub sent: bool,
    /// Average the gate compared against.
    pub avg_query_time: f64,
}

#[derive(Default)]
pub struct TemplateRegistry {
    templates: DashMap<String, Slot>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load or replace a template, e.g. from a persistent store.
    pub fn insert(&self, template: QueryTemplate) {
        self.templates
            .insert(template.fingerprint.clone(), Arc::new(Mutex::new(template)));
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn contains(&self, fingerprint: &str) -> bool {
        self.templates.contains_key(fingerprint)
    }

    pub fn fingerprints(&self) -> Vec<String> {
        let mut fps: Vec<String> = self.templates.iter().map(|e| e.key().clone()).collect();
        fps.sort();
        fps
    }

    /// Snapshot of one template.
    pub fn get(&self, fingerprint: &str) -> Result<Option<QueryTemplate>, NotificationError> {
        let Some(slot) = self.templates.get(fingerprint).map(|e| Arc::clone(e.value())) else {
            return Ok(None);
        };
        let guard = lock(&slot, fingerprint)?;
        Ok(Some(guard.clone()))
    }

    pub fn observe(
        &self,
        fingerprint: &str,
        template_text: &str,
        query_time: f64,
    ) -> Result<Observation, NotificationError> {
        self.observe_at(fingerprint, template_text, query_time, Utc::now())
    }

    /// Create the template on first sighting, then record the execution.
    pub fn observe_at(
        &self,
        fingerprint: &str,
        template_text: &str,
        query_time: f64,
        at: DateTime<Utc>,
    ) -> Result<Observation, NotificationError> {
        let (slot, is_new) = match self.templates.entry(fingerprint.to_string()) {
            Entry::Occupied(e) => (Arc::clone(e.get()), false),
            Entry::Vacant(e) => {
                let slot = Arc::new(Mutex::new(QueryTemplate::new(
                    fingerprint,
                    template_text,
                    at,
                )));
                e.insert(Arc::clone(&slot));
                (slot, true)
            }
        };
        if is_new {
            events::template_first_seen(fingerprint, template_text);
        }

        let mut guard = lock(&slot, fingerprint)?;
        guard.record_sighting(query_time, at);
        Ok(Observation {
            is_new,
            template: guard.clone(),
        })
    }

    /// Move a template through the lifecycle.
    pub fn advance(
        &self,
        fingerprint: &str,
        to: TemplateStatus,
    ) -> Result<TemplateStatus, NotificationError> {
        let slot = self.slot(fingerprint)?;
        let mut guard = lock(&slot, fingerprint)?;
        guard.status = lifecycle::transition(guard.status, to)?;
        Ok(guard.status)
    }

    pub fn evaluate_and_mark<F>(
        &self,
        fingerprint: &str,
        settings: &NotificationSettings,
        current_avg_time: f64,
        send: F,
    ) -> SqlwatchResult<GateOutcome>
    where
        F: FnOnce(&QueryTemplate, GateDecision) -> SqlwatchResult<()>,
    {
        self.evaluate_and_mark_at(fingerprint, settings, current_avg_time, Utc::now(), send)
    }

    /// Decide, send and record under the fingerprint's lock.
    ///
    /// Notification info is updated only when `send` returns `Ok`. A send
    /// error is returned unchanged and leaves the template as it was, so a
    /// Waiting template keeps waiting. A Waiting template moves to Sent.
    pub fn evaluate_and_mark_at<F>(
        &self,
        fingerprint: &str,
        settings: &NotificationSettings,
        current_avg_time: f64,
        now: DateTime<Utc>,
        send: F,
    ) -> SqlwatchResult<GateOutcome>
    where
        F: FnOnce(&QueryTemplate, GateDecision) -> SqlwatchResult<()>,
    {
        let _span = sqlwatch_observability::gate_span!(fingerprint).entered();
        let slot = self.slot(fingerprint)?;
        let mut guard = lock(&slot, fingerprint)?;
        mark_locked(&mut guard, settings, current_avg_time, now, send)
    }

    /// Same as [`evaluate_and_mark_at`](Self::evaluate_and_mark_at), with the
    /// average read from the template itself under the lock, so a concurrent
    /// sighting cannot slip in between reading it and recording it.
    ///
    /// `admit` sees the locked template first; `false` skips the gate and
    /// returns `None` without touching the template.
    pub fn evaluate_current_and_mark_at<A, F>(
        &self,
        fingerprint: &str,
        settings: &NotificationSettings,
        now: DateTime<Utc>,
        admit: A,
        send: F,
    ) -> SqlwatchResult<Option<GateOutcome>>
    where
        A: FnOnce(&QueryTemplate) -> bool,
        F: FnOnce(&QueryTemplate, GateDecision) -> SqlwatchResult<()>,
    {
        let _span = sqlwatch_observability::gate_span!(fingerprint).entered();
        let slot = self.slot(fingerprint)?;
        let mut guard = lock(&slot, fingerprint)?;
        if !admit(&guard) {
            return Ok(None);
        }
        let avg = guard.avg_query_time();
        mark_locked(&mut guard, settings, avg, now, send).map(Some)
    }

    /// Restart housekeeping over every registered template.
    pub fn abandon_in_flight(&self) -> Result<usize, NotificationError> {
        let slots: Vec<(String, Slot)> = self
            .templates
            .iter()
            .map(|e| (e.key().clone(), Arc::clone(e.value())))
            .collect();
        let mut count = 0;
        for (fingerprint, slot) in slots {
            let mut guard = lock(&slot, &fingerprint)?;
            count += housekeeping::abandon_in_flight(std::slice::from_mut(&mut *guard));
        }
        Ok(count)
    }

    fn slot(&self, fingerprint: &str) -> Result<Slot, NotificationError> {
        self.templates
            .get(fingerprint)
            .map(|e| Arc::clone(e.value()))
            .ok_or_else(|| NotificationError::TemplateNotFound {
                fingerprint: fingerprint.to_string(),
            })
    }
}

fn mark_locked<F>(
    template: &mut QueryTemplate,
    settings: &NotificationSettings,
    current_avg_time: f64,
    now: DateTime<Utc>,
    send: F,
) -> SqlwatchResult<GateOutcome>
where
    F: FnOnce(&QueryTemplate, GateDecision) -> SqlwatchResult<()>,
{
    let decision = TemplateNotificationGate::decide_at(
        template,
        settings.cooldown_hours,
        settings.degradation_multiplier,
        current_avg_time,
        now,
    );
    let mut outcome = GateOutcome {
        decision,
        sent: false,
        avg_query_time: current_avg_time,
    };
    if !decision.should_notify() {
        return Ok(outcome);
    }

    send(template, decision)?;

    TemplateNotificationGate::update_notification_info_at(template, current_avg_time, now);
    if template.status == TemplateStatus::Waiting {
        template.status = lifecycle::transition(template.status, TemplateStatus::Sent)?;
    }
    outcome.sent = true;
    Ok(outcome)
}

fn lock<'a>(
    slot: &'a Mutex<QueryTemplate>,
    fingerprint: &str,
) -> Result<MutexGuard<'a, QueryTemplate>, NotificationError> {
    slot.lock().map_err(|_| NotificationError::LockPoisoned {
        fingerprint: fingerprint.to_string(),
    })
}
