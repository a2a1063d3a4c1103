use sqlwatch_core::models::Fingerprint;
use sqlwatch_core::traits::IFingerprinter;
use sqlwatch_observability::tracing_setup::events;

use crate::hash::hash_text;
use crate::lexer::tokenize;
use crate::normalize;

/// SQL fingerprinting engine.
///
/// Stateless and `Send + Sync`. Implements `IFingerprinter` from sqlwatch-core.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlFingerprinter;

impl SqlFingerprinter {
    pub fn new() -> Self {
        Self
    }

    /// Template and hash for `raw_sql`. Blank input yields an empty fingerprint.
    pub fn fingerprint(&self, raw_sql: &str) -> Fingerprint {
        self.fingerprint_with_status(raw_sql).0
    }

    /// Like [`fingerprint`](Self::fingerprint), also reporting whether the
    /// raw-text fallback was used.
    pub fn fingerprint_with_status(&self, raw_sql: &str) -> (Fingerprint, bool) {
        if raw_sql.trim().is_empty() {
            return (Fingerprint::default(), false);
        }
        let _span = sqlwatch_observability::fingerprint_span!(raw_sql.len()).entered();

        match tokenize(raw_sql) {
            Ok(tokens) => {
                let template = normalize::normalize(&tokens);
                let hash = hash_text(&template);
                (Fingerprint::new(template, hash), false)
            }
            Err(e) => {
                events::fingerprint_fallback(&e.to_string(), raw_sql.len());
                let template = collapse_whitespace(raw_sql);
                (Fingerprint::new(template, hash_text(raw_sql)), true)
            }
        }
    }

    /// Comments stripped, whitespace collapsed, nothing parameterized.
    pub fn clean(&self, raw_sql: &str) -> String {
        match tokenize(raw_sql) {
            Ok(tokens) => normalize::clean(&tokens),
            Err(_) => collapse_whitespace(raw_sql),
        }
    }

    /// Equal non-empty hashes.
    pub fn is_similar(&self, a: &str, b: &str) -> bool {
        let fa = self.fingerprint(a);
        !fa.is_empty() && fa.hash == self.fingerprint(b).hash
    }
}

impl IFingerprinter for SqlFingerprinter {
    fn fingerprint(&self, raw_sql: &str) -> Fingerprint {
        SqlFingerprinter::fingerprint(self, raw_sql)
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
