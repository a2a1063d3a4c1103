//! # sqlwatch-masking
//!
//! Masks sensitive values in SQL text before it is stored or displayed:
//! phone numbers, national IDs, landlines, IPv4 addresses, emails, bank
//! cards, passwords, tokens, and connection hosts. Patterns run in a fixed
//! order and each replacement keeps a recognizable prefix or suffix.

pub mod degradation;
pub mod engine;
pub mod patterns;

pub use degradation::{DegradationTracker, FailureStage, PatternFailure};
pub use engine::{MaskOutcome, SqlMasker};

/// Mask with the default configuration.
pub fn mask(sql: &str) -> String {
    SqlMasker::new().mask(sql)
}

/// Quick subset (phone, IPv4, email) with the default configuration.
pub fn quick_mask(sql: &str) -> String {
    SqlMasker::new().quick_mask(sql)
}

pub fn contains_sensitive(sql: &str) -> bool {
    SqlMasker::new().contains_sensitive(sql)
}
