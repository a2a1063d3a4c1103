//! Error handling for sqlwatch.
//! One error enum per subsystem, `thiserror` only.

pub mod alert_error;
pub mod classification_error;
pub mod config_error;
pub mod error_code;
pub mod notification_error;
pub mod sqlwatch_error;

pub use alert_error::AlertError;
pub use classification_error::ClassificationError;
pub use config_error::ConfigError;
pub use error_code::SqlwatchErrorCode;
pub use notification_error::NotificationError;
pub use sqlwatch_error::{SqlwatchError, SqlwatchResult};
