//! Template lifecycle and notification errors.

use super::error_code::{self, SqlwatchErrorCode};

/// Errors from the template state machine, the registry, and notifier collaborators.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("illegal template transition {from} -> {to}")]
    IllegalTransition { from: String, to: String },

    #[error("unknown template status: {value}")]
    UnknownStatus { value: String },

    #[error("template not found: {fingerprint}")]
    TemplateNotFound { fingerprint: String },

    #[error("template lock poisoned: {fingerprint}")]
    LockPoisoned { fingerprint: String },

    #[error("notification send failed: {reason}")]
    SendFailed { reason: String },

    #[error("template store failed: {reason}")]
    StoreFailed { reason: String },
}

impl SqlwatchErrorCode for NotificationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::IllegalTransition { .. } => error_code::ILLEGAL_TRANSITION,
            Self::SendFailed { .. } => error_code::SEND_FAILED,
            Self::StoreFailed { .. } => error_code::STORE_ERROR,
            _ => error_code::NOTIFICATION_ERROR,
        }
    }
}
