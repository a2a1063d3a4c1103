//! # sqlwatch-classify
//!
//! Turns a failure into a decision. A diagnostic code or message maps to an
//! [`ErrorKind`](sqlwatch_core::models::ErrorKind), whose category alone
//! decides the recovery strategy. [`RetryPolicy`] spaces out TRANSIENT
//! retries and [`CircuitBreaker`] stops calling a component that keeps failing.

pub mod circuit;
pub mod classifier;
pub mod context;
pub mod retry;
pub mod tables;

pub use circuit::{CircuitBreaker, CircuitState, CircuitStats};
pub use classifier::ErrorClassifier;
pub use context::ClassificationContext;
pub use retry::RetryPolicy;

use sqlwatch_core::models::ErrorClassification;

/// Classify with the default classifier.
pub fn classify(diagnostic_code: Option<&str>, message: &str) -> ErrorClassification {
    ErrorClassifier::new().classify(diagnostic_code, message)
}
