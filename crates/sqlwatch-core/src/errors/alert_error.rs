//! Alert rule errors.

use super::error_code::{self, SqlwatchErrorCode};

/// Errors from alert rule parsing, validation, and history sinks.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("invalid alert rule '{rule}': {reason}")]
    InvalidRule { rule: String, reason: String },

    #[error("duplicate alert rule name: {name}")]
    DuplicateRuleName { name: String },

    /// Fire state is keyed by id, so two rules sharing one would share a cooldown.
    #[error("duplicate alert rule id: {id}")]
    DuplicateRuleId { id: u64 },

    #[error("unknown comparison operator: {value}")]
    UnknownOperator { value: String },

    #[error("unknown rule type: {value}")]
    UnknownRuleType { value: String },

    #[error("unknown alert severity: {value}")]
    UnknownSeverity { value: String },

    #[error("alert history sink failed: {reason}")]
    SinkFailed { reason: String },
}

impl SqlwatchErrorCode for AlertError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRule { .. }
            | Self::DuplicateRuleName { .. }
            | Self::DuplicateRuleId { .. } => error_code::INVALID_RULE,
            Self::SinkFailed { .. } => error_code::SINK_FAILED,
            _ => error_code::ALERT_ERROR,
        }
    }
}
