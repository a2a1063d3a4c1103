use regex::Regex;
use std::sync::LazyLock;

use super::{MaskPattern, Replacement};

pub const HOST: &str = "host";

// ── host/server field holding an IPv4, last octet possibly masked already ──
mask_pattern!(
    RE_HOST,
    r#"(?i)\b(host|server|hostname)(\s*[=:]\s*)['"]?\d{1,3}\.\d{1,3}\.\d{1,3}\.(?:\d{1,3}|\*{3})['"]?"#
);

pub fn all_patterns() -> Vec<MaskPattern> {
    vec![MaskPattern {
        name: HOST,
        category: "connection",
        regex: &RE_HOST,
        replacement: Replacement::Template("${1}${2}'***.***.***.***'"),
        value_group: None,
    }]
}
