//! Error-classification errors.

use super::error_code::{self, SqlwatchErrorCode};

/// Errors raised around classification and the circuit breaker.
#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    #[error("unknown error category: {value}")]
    UnknownCategory { value: String },

    #[error("unknown recovery strategy: {value}")]
    UnknownStrategy { value: String },

    #[error("unknown error kind code: {value}")]
    UnknownKind { value: String },

    #[error("circuit open for {key}, retry after {retry_after_secs}s")]
    CircuitOpen { key: String, retry_after_secs: i64 },
}

impl SqlwatchErrorCode for ClassificationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::CircuitOpen { .. } => error_code::CIRCUIT_OPEN,
            _ => error_code::CLASSIFICATION_ERROR,
        }
    }
}
