//! In-memory implementations of the collaborator traits.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use sqlwatch_core::errors::{AlertError, NotificationError, SqlwatchResult};
use sqlwatch_core::models::{FiredAlert, NotificationRequest, QueryTemplate};
use sqlwatch_core::traits::{AlertHistorySink, INotifier, ITemplateStore};

/// Template store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryTemplateStore {
    templates: Mutex<HashMap<String, QueryTemplate>>,
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_templates(templates: impl IntoIterator<Item = QueryTemplate>) -> Self {
        let store = Self::new();
        if let Ok(mut map) = store.templates.lock() {
            for t in templates {
                map.insert(t.fingerprint.clone(), t);
            }
        }
        store
    }

    pub fn all(&self) -> Vec<QueryTemplate> {
        self.templates
            .lock()
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default()
    }
}

fn poisoned() -> NotificationError {
    NotificationError::StoreFailed {
        reason: "store lock poisoned".to_string(),
    }
}

impl ITemplateStore for InMemoryTemplateStore {
    fn get(&self, fingerprint: &str) -> SqlwatchResult<Option<QueryTemplate>> {
        let map = self.templates.lock().map_err(|_| poisoned())?;
        Ok(map.get(fingerprint).cloned())
    }

    fn upsert(&self, template: &QueryTemplate) -> SqlwatchResult<()> {
        let mut map = self.templates.lock().map_err(|_| poisoned())?;
        map.insert(template.fingerprint.clone(), template.clone());
        Ok(())
    }

    fn list_in_flight(&self) -> SqlwatchResult<Vec<QueryTemplate>> {
        let map = self.templates.lock().map_err(|_| poisoned())?;
        Ok(map
            .values()
            .filter(|t| t.status.is_in_flight())
            .cloned()
            .collect())
    }
}

/// Alert sink that keeps every recorded alert; optionally fails every call.
#[derive(Debug, Default)]
pub struct RecordingSink {
    alerts: Mutex<Vec<FiredAlert>>,
    fail: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            alerts: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn alerts(&self) -> Vec<FiredAlert> {
        self.alerts.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

impl AlertHistorySink for RecordingSink {
    fn record(&self, alert: &FiredAlert) -> SqlwatchResult<()> {
        if self.fail {
            return Err(AlertError::SinkFailed {
                reason: "sink unavailable".to_string(),
            }
            .into());
        }
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(alert.clone());
        }
        Ok(())
    }
}

/// Notifier that records requests; fails the first `fail_first` sends.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<NotificationRequest>>,
    attempts: AtomicUsize,
    fail_first: usize,
    failure_message: String,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the first `n` sends with `message`, then succeeds.
    pub fn failing_first(n: usize, message: &str) -> Self {
        Self {
            fail_first: n,
            failure_message: message.to_string(),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<NotificationRequest> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl INotifier for RecordingNotifier {
    fn send(&self, request: &NotificationRequest) -> SqlwatchResult<()> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.fail_first {
            return Err(NotificationError::SendFailed {
                reason: self.failure_message.clone(),
            }
            .into());
        }
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(request.clone());
        }
        Ok(())
    }
}
