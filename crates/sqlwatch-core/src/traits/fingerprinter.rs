use crate::models::Fingerprint;

/// Structural identity for SQL text. Always produces a result.
pub trait IFingerprinter: Send + Sync {
    fn fingerprint(&self, raw_sql: &str) -> Fingerprint;
}
