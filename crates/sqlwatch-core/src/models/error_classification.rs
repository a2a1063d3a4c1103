use serde::{Deserialize, Serialize};

use super::{ErrorCategory, ErrorKind, RecoveryStrategy};

/// Structured decision for one failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorClassification {
    pub kind: ErrorKind,
    pub category: ErrorCategory,
    pub strategy: RecoveryStrategy,
    pub max_retries: u32,
    pub retryable: bool,
    pub circuit_break: bool,
    pub user_message: String,
}

impl ErrorClassification {
    /// Classification for a known kind. Strategy and flags derive from the
    /// kind's category only.
    pub fn for_kind(kind: ErrorKind, message_args: &[&str]) -> Self {
        let category = kind.category();
        let strategy = category.recovery_strategy();
        Self {
            kind,
            category,
            strategy,
            max_retries: strategy.max_retries(),
            retryable: category.is_retryable(),
            circuit_break: category.should_circuit_break(),
            user_message: kind.format_user_message(message_args),
        }
    }

    pub fn unknown(message: &str) -> Self {
        Self::for_kind(ErrorKind::Unknown, &[message])
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn is_blocking(&self) -> bool {
        self.category == ErrorCategory::Blocking
    }
}
