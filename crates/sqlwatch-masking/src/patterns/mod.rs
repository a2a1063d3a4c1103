//! The ordered pattern table.
//!
//! Order matters: identity numbers go before the generic digit runs
//! (bank card) that would otherwise swallow them, and IPv4 goes before the
//! host-field pattern, which accepts an already-masked last octet.

use regex::{Captures, Regex};
use std::sync::LazyLock;

macro_rules! mask_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

pub mod connection;
pub mod pii;
pub mod secrets;

/// How a match is rewritten.
#[derive(Clone, Copy)]
pub enum Replacement {
    /// `regex` expansion syntax (`${1}`).
    Template(&'static str),
    /// Computed from the captures.
    With(fn(&Captures<'_>) -> String),
}

impl Replacement {
    pub fn render(&self, caps: &Captures<'_>) -> String {
        match self {
            Self::Template(template) => {
                let mut out = String::new();
                caps.expand(template, &mut out);
                out
            }
            Self::With(f) => f(caps),
        }
    }
}

impl std::fmt::Debug for Replacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Template(t) => f.debug_tuple("Template").field(t).finish(),
            Self::With(_) => f.write_str("With(..)"),
        }
    }
}

/// A compiled masking pattern.
#[derive(Debug, Clone, Copy)]
pub struct MaskPattern {
    pub name: &'static str,
    /// Group name used in degradation reports: `pii`, `secret`, `connection`.
    pub category: &'static str,
    pub regex: &'static LazyLock<Option<Regex>>,
    pub replacement: Replacement,
    /// Capture group holding the secret value. A value made only of `*`
    /// was already masked and does not count as sensitive.
    pub value_group: Option<usize>,
}

impl MaskPattern {
    /// The compiled regex, or `None` if it failed to compile.
    pub fn compiled(&self) -> Option<&'static Regex> {
        let regex: &'static Option<Regex> = self.regex;
        regex.as_ref()
    }
}

/// Full table, in application order.
pub fn all_patterns() -> Vec<MaskPattern> {
    let mut patterns = Vec::with_capacity(9);
    patterns.extend(pii::all_patterns());
    patterns.extend(secrets::all_patterns());
    patterns.extend(connection::all_patterns());
    patterns
}

/// Phone, IPv4 and email only.
pub fn quick_patterns() -> Vec<MaskPattern> {
    select(&[pii::PHONE, pii::IPV4, pii::EMAIL])
}

/// Patterns consulted by detection.
pub fn detection_patterns() -> Vec<MaskPattern> {
    select(&[
        pii::PHONE,
        pii::ID_CARD,
        pii::IPV4,
        pii::EMAIL,
        secrets::PASSWORD,
        secrets::TOKEN,
    ])
}

fn select(names: &[&str]) -> Vec<MaskPattern> {
    all_patterns()
        .into_iter()
        .filter(|p| names.contains(&p.name))
        .collect()
}

/// Whether a captured secret value was already masked.
pub fn is_masked_value(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b == b'*')
}
