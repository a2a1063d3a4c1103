use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a failure happened. Passed by argument to every classification
/// call that needs it; nothing is kept per thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationContext {
    /// Circuit breaker key: a tool, datasource, or collaborator name.
    pub component: String,
    pub operation: Option<String>,
    /// 1-based attempt number of the call that failed.
    pub attempt: u32,
    pub first_failed_at: Option<DateTime<Utc>>,
}

impl ClassificationContext {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            operation: None,
            attempt: 1,
            first_failed_at: None,
        }
    }

    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    pub fn with_attempt(mut self, attempt: u32) -> Self {
        self.attempt = attempt.max(1);
        self
    }

    pub fn with_first_failed_at(mut self, at: DateTime<Utc>) -> Self {
        self.first_failed_at = Some(at);
        self
    }
}
