use super::error_code::{self, SqlwatchErrorCode};
use super::{AlertError, ClassificationError, ConfigError, NotificationError};

/// Top-level error type for the sqlwatch workspace.
#[derive(Debug, thiserror::Error)]
pub enum SqlwatchError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("classification error: {0}")]
    Classification(#[from] ClassificationError),

    #[error("notification error: {0}")]
    Notification(#[from] NotificationError),

    #[error("alert error: {0}")]
    Alert(#[from] AlertError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("degraded mode: {component} using fallback: {fallback}")]
    DegradedMode { component: String, fallback: String },
}

impl SqlwatchErrorCode for SqlwatchError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Classification(e) => e.error_code(),
            Self::Notification(e) => e.error_code(),
            Self::Alert(e) => e.error_code(),
            Self::Serialization(_) => error_code::SERIALIZATION_ERROR,
            Self::DegradedMode { .. } => error_code::DEGRADED_MODE,
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type SqlwatchResult<T> = Result<T, SqlwatchError>;
