//! # sqlwatch-fingerprint
//!
//! Reduces SQL text to its structural shape: comments dropped, whitespace
//! collapsed, keywords uppercased, literals replaced by `?`. The shape is
//! hashed with BLAKE3 (truncated to 128 bits) to key query templates.
//!
//! Fingerprinting never fails. Text the lexer cannot handle is hashed raw.

pub mod engine;
pub mod hash;
pub mod lexer;
pub mod normalize;

pub use engine::SqlFingerprinter;
pub use hash::hash_text;
pub use lexer::{tokenize, LexError, Token, TokenKind};

use sqlwatch_core::models::Fingerprint;

/// Fingerprint with the default engine.
pub fn fingerprint(raw_sql: &str) -> Fingerprint {
    SqlFingerprinter::new().fingerprint(raw_sql)
}

/// Normalized template text only.
pub fn extract_template(raw_sql: &str) -> String {
    SqlFingerprinter::new().fingerprint(raw_sql).template
}

/// Comments stripped and whitespace collapsed; literals and case untouched.
pub fn clean_sql(raw_sql: &str) -> String {
    SqlFingerprinter::new().clean(raw_sql)
}

/// Whether two statements share a structural shape.
pub fn is_similar(a: &str, b: &str) -> bool {
    SqlFingerprinter::new().is_similar(a, b)
}
