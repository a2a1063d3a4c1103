use regex::Regex;
use std::sync::LazyLock;

use super::{MaskPattern, Replacement};

pub const PASSWORD: &str = "password";
pub const TOKEN: &str = "token";

// ── password = 'value' ─────────────────────────────────────────────────────
mask_pattern!(
    RE_PASSWORD,
    r#"(?i)(password|pwd|passwd)(\s*[=:]\s*)(['"])([^'"]+)['"]"#
);

// ── token / api key / secret assignments, value of 8+ chars ────────────────
mask_pattern!(
    RE_TOKEN,
    r#"(?i)\b(access_token|secret_key|api_key|apikey|token|secret)(\s*[=:]\s*)(['"]?)([A-Za-z0-9_\-.]{8,})(['"]?)"#
);

pub fn all_patterns() -> Vec<MaskPattern> {
    vec![
        MaskPattern {
            name: PASSWORD,
            category: "secret",
            regex: &RE_PASSWORD,
            replacement: Replacement::Template("${1}${2}${3}******${3}"),
            value_group: Some(4),
        },
        MaskPattern {
            name: TOKEN,
            category: "secret",
            regex: &RE_TOKEN,
            replacement: Replacement::Template("${1}${2}${3}******${5}"),
            value_group: Some(4),
        },
    ]
}
