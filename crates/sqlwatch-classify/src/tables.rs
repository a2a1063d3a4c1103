//! Lookup tables: diagnostic codes and message keyword groups.
//!
//! Both tables are scanned in order and the first match wins.

use sqlwatch_core::models::ErrorKind;

use ErrorKind as K;

/// SQLSTATE-style code to kind. `42000` is absent: it is shared by access,
/// database, and syntax errors and is resolved from the message.
#[rustfmt::skip]
pub const DIAGNOSTIC_CODES: &[(&str, ErrorKind)] = &[
    ("42S02", K::TableNotFound),
    ("42P01", K::TableNotFound),
    ("42S22", K::ColumnNotFound),
    ("42703", K::ColumnNotFound),
    ("3D000", K::DatabaseNotFound),
    ("28000", K::AccessDenied),
    ("42501", K::PrivilegeNotEnough),
    ("42601", K::SyntaxError),
    ("23000", K::DuplicateKey),
    ("23505", K::DuplicateKey),
    ("08S01", K::ConnectionLost),
    ("08001", K::ConnectionLost),
    ("08006", K::ConnectionLost),
    ("HYT00", K::QueryTimeout),
    ("57014", K::QueryTimeout),
    ("40001", K::SerializationFailure),
];

/// SQLSTATE class prefixes consulted after exact codes.
pub const DIAGNOSTIC_CLASSES: &[(&str, ErrorKind)] = &[("22", K::DataFormat)];

/// Code that needs the message to decide.
pub const AMBIGUOUS_CODE: &str = "42000";

/// How `42000` splits by message; anything else is a syntax error.
pub const AMBIGUOUS_CODE_MESSAGES: &[(&str, ErrorKind)] = &[
    ("command denied", K::PrivilegeNotEnough),
    ("access denied", K::AccessDenied),
    ("unknown database", K::DatabaseNotFound),
];

/// A case-insensitive keyword rule over the failure message.
#[derive(Debug, Clone, Copy)]
pub struct KeywordGroup {
    pub name: &'static str,
    pub kind: ErrorKind,
    /// At least one must appear.
    pub any: &'static [&'static str],
    /// When non-empty, at least one of these must appear as well.
    pub with_any: &'static [&'static str],
}

impl KeywordGroup {
    /// `lowered` must already be lowercase.
    pub fn matches(&self, lowered: &str) -> bool {
        let hit = |words: &[&str]| words.iter().any(|w| lowered.contains(w));
        hit(self.any) && (self.with_any.is_empty() || hit(self.with_any))
    }
}

const fn group(
    name: &'static str,
    kind: ErrorKind,
    any: &'static [&'static str],
    with_any: &'static [&'static str],
) -> KeywordGroup {
    KeywordGroup {
        name,
        kind,
        any,
        with_any,
    }
}

const NOT_EXIST: &[&str] = &["doesn't exist", "does not exist", "not found"];

/// Database groups first, then the analysis-service and transport groups.
#[rustfmt::skip]
pub const KEYWORD_GROUPS: &[KeywordGroup] = &[
    // ── database objects ──
    group("unknown_database", K::DatabaseNotFound, &["unknown database"], &[]),
    group("database_missing", K::DatabaseNotFound, &["database"], NOT_EXIST),
    group("unknown_column", K::ColumnNotFound, &["unknown column"], &[]),
    group("column_missing", K::ColumnNotFound, &["column"], NOT_EXIST),
    group("unknown_table", K::TableNotFound, &["unknown table", "no such table"], &[]),
    group("table_missing", K::TableNotFound, &["table", "relation"], NOT_EXIST),
    group("slow_log_disabled", K::SlowQueryLogDisabled,
        &["slow_query_log", "slow query log", "slow log"], &["disabled", "off", "not enabled"]),
    // ── permissions ──
    group("command_denied", K::PrivilegeNotEnough, &["command denied", "permission denied"], &[]),
    group("access_denied", K::AccessDenied, &["access denied"], &[]),
    // ── statement and data ──
    group("syntax", K::SyntaxError, &["syntax error", "you have an error in your sql syntax"], &[]),
    group("duplicate", K::DuplicateKey, &["duplicate entry", "duplicate key"], &[]),
    group("empty_result", K::EmptyResult, &["empty result", "no rows returned"], &[]),
    group("data_truncated", K::DataFormat, &["data truncated", "out of range value"], &[]),
    group("incorrect_value", K::DataFormat, &["incorrect"], &["value"]),
    // ── analysis service and transport ──
    group("timeout", K::ConnectionTimeout, &["timeout", "timed out"], &[]),
    group("rate_limit", K::AiRateLimited, &["rate limit", "too many requests", "429"], &[]),
    group("network", K::ConnectionLost,
        &["connection", "network", "no route to host", "communications link failure"], &[]),
    group("auth", K::AiAuthFailed,
        &["401", "403", "unauthorized", "forbidden", "invalid api key"], &[]),
    group("config", K::AiModelUnavailable, &["404", "not found", "invalid model"], &[]),
    group("token_limit", K::AiTokenLimit, &["token"], &["exceed", "limit", "too long"]),
    group("content_filter", K::AiContentFiltered,
        &["content filter", "safety", "policy violation"], &[]),
    group("server_error", K::AiServerError,
        &["500", "502", "503", "internal server error"], &[]),
];
