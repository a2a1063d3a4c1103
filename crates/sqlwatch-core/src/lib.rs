//! # sqlwatch-core
//!
//! Foundation crate for the sqlwatch slow-query decision core.
//! Defines the shared types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::SqlwatchConfig;
pub use errors::{SqlwatchError, SqlwatchResult};
pub use models::{
    AlertRule, ErrorCategory, ErrorClassification, ErrorKind, FiredAlert, MetricSnapshot,
    QueryTemplate, RecoveryStrategy, Severity, TemplateStatus,
};
