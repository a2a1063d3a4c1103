use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::{MaskPattern, Replacement};

pub const PHONE: &str = "phone";
pub const ID_CARD: &str = "id_card";
pub const LANDLINE: &str = "landline";
pub const IPV4: &str = "ipv4";
pub const EMAIL: &str = "email";
pub const BANK_CARD: &str = "bank_card";

// ── Mobile phone (11 digits, 13x to 19x) ───────────────────────────────────
mask_pattern!(RE_PHONE, r"\b(1[3-9]\d)\d{4}(\d{4})\b");

// ── National ID (18 chars, embedded birth date) ────────────────────────────
mask_pattern!(
    RE_ID_CARD,
    r"\b(\d{6})(?:18|19|20)\d{2}(?:0[1-9]|1[0-2])(?:0[1-9]|[12]\d|3[01])(\d{3}[\dXx])\b"
);

// ── Landline (area code, optional dash, 7 or 8 digits) ─────────────────────
mask_pattern!(RE_LANDLINE, r"\b(0\d{2,3}-?)\d{3,4}(\d{4})\b");

// ── IPv4 ───────────────────────────────────────────────────────────────────
mask_pattern!(RE_IPV4, r"\b(\d{1,3}\.\d{1,3}\.\d{1,3})\.\d{1,3}\b");

// ── Email ──────────────────────────────────────────────────────────────────
mask_pattern!(
    RE_EMAIL,
    r"\b([A-Za-z0-9])[A-Za-z0-9._%+-]*@([A-Za-z0-9.-]+\.[A-Za-z]{2,})\b"
);

// ── Bank card (16 to 19 digits) ────────────────────────────────────────────
mask_pattern!(RE_BANK_CARD, r"\b(\d{6})\d{6,9}(\d{4})\b");

/// Keep the first 6 and last 4 digits, one `*` per hidden digit.
fn mask_bank_card(caps: &Captures<'_>) -> String {
    let whole = caps.get(0).map_or("", |m| m.as_str());
    let head = caps.get(1).map_or("", |m| m.as_str());
    let tail = caps.get(2).map_or("", |m| m.as_str());
    let hidden = whole.len().saturating_sub(head.len() + tail.len());
    format!("{head}{}{tail}", "*".repeat(hidden))
}

pub fn all_patterns() -> Vec<MaskPattern> {
    vec![
        pattern(PHONE, &RE_PHONE, Replacement::Template("${1}****${2}")),
        pattern(ID_CARD, &RE_ID_CARD, Replacement::Template("${1}********${2}")),
        pattern(LANDLINE, &RE_LANDLINE, Replacement::Template("${1}****${2}")),
        pattern(IPV4, &RE_IPV4, Replacement::Template("${1}.***")),
        pattern(EMAIL, &RE_EMAIL, Replacement::Template("${1}***@${2}")),
        pattern(BANK_CARD, &RE_BANK_CARD, Replacement::With(mask_bank_card)),
    ]
}

fn pattern(
    name: &'static str,
    regex: &'static LazyLock<Option<Regex>>,
    replacement: Replacement,
) -> MaskPattern {
    MaskPattern {
        name,
        category: "pii",
        regex,
        replacement,
        value_group: None,
    }
}
