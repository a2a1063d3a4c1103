//! Error taxonomy: categories, recovery strategies, and the kind table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ClassificationError;

/// Broad class of a failure, which alone decides how it is recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    /// Environment or permission problem; needs a human fix.
    Blocking,
    /// Temporary problem; retry with backoff.
    Transient,
    /// Will fail the same way again; no retry.
    Permanent,
    /// Not an error.
    None,
}

impl ErrorCategory {
    pub const ALL: [ErrorCategory; 4] = [
        Self::Blocking,
        Self::Transient,
        Self::Permanent,
        Self::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blocking => "BLOCKING",
            Self::Transient => "TRANSIENT",
            Self::Permanent => "PERMANENT",
            Self::None => "NONE",
        }
    }

    /// Category to strategy, through [`CATEGORY_STRATEGIES`].
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        CATEGORY_STRATEGIES
            .iter()
            .find(|(category, _)| category == self)
            .map(|(_, strategy)| *strategy)
            .unwrap_or(RecoveryStrategy::Continue)
    }

    pub fn is_retryable(&self) -> bool {
        *self == Self::Transient
    }

    pub fn should_circuit_break(&self) -> bool {
        *self == Self::Blocking
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCategory {
    type Err = ClassificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ClassificationError::UnknownCategory {
                value: s.to_string(),
            })
    }
}

/// What the caller should do about a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecoveryStrategy {
    Continue,
    Retry,
    Fallback,
    Abort,
}

impl RecoveryStrategy {
    pub const ALL: [RecoveryStrategy; 4] =
        [Self::Continue, Self::Retry, Self::Fallback, Self::Abort];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Continue => "CONTINUE",
            Self::Retry => "RETRY",
            Self::Fallback => "FALLBACK",
            Self::Abort => "ABORT",
        }
    }

    /// Retry budget implied by the strategy.
    pub fn max_retries(&self) -> u32 {
        match self {
            Self::Retry => 3,
            _ => 0,
        }
    }
}

impl fmt::Display for RecoveryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecoveryStrategy {
    type Err = ClassificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ClassificationError::UnknownStrategy {
                value: s.to_string(),
            })
    }
}

/// The single category to strategy mapping.
pub const CATEGORY_STRATEGIES: &[(ErrorCategory, RecoveryStrategy)] = &[
    (ErrorCategory::Blocking, RecoveryStrategy::Abort),
    (ErrorCategory::Transient, RecoveryStrategy::Retry),
    (ErrorCategory::Permanent, RecoveryStrategy::Abort),
    (ErrorCategory::None, RecoveryStrategy::Continue),
];

/// Concrete failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    DatabaseNotFound,
    TableNotFound,
    ColumnNotFound,
    SlowQueryLogDisabled,
    AccessDenied,
    PrivilegeNotEnough,
    ConnectionTimeout,
    ConnectionLost,
    QueryTimeout,
    SerializationFailure,
    EmptyResult,
    DuplicateKey,
    DataFormat,
    SyntaxError,
    AiRateLimited,
    AiModelUnavailable,
    AiAuthFailed,
    AiTokenLimit,
    AiContentFiltered,
    AiServerError,
    Unknown,
}

/// Static behavior of one [`ErrorKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorKindSpec {
    pub kind: ErrorKind,
    /// Stable code, e.g. `ENV_001`.
    pub code: &'static str,
    pub name: &'static str,
    pub category: ErrorCategory,
    /// Remediation text with positional `{}` placeholders.
    pub message_template: &'static str,
}

const fn spec(
    kind: ErrorKind,
    code: &'static str,
    name: &'static str,
    category: ErrorCategory,
    message_template: &'static str,
) -> ErrorKindSpec {
    ErrorKindSpec {
        kind,
        code,
        name,
        category,
        message_template,
    }
}

use ErrorCategory as C;
use ErrorKind as K;

/// Every kind with its code, category, and remediation message.
#[rustfmt::skip]
pub const ERROR_KINDS: &[ErrorKindSpec] = &[
    spec(K::DatabaseNotFound, "ENV_001", "database not found", C::Blocking,
        "Database '{}' does not exist or cannot be reached; check the datasource configuration"),
    spec(K::TableNotFound, "ENV_002", "table not found", C::Blocking,
        "Table '{}' does not exist; verify the schema or refresh datasource metadata"),
    spec(K::ColumnNotFound, "ENV_003", "column not found", C::Blocking,
        "Column '{}' does not exist; verify the schema or refresh datasource metadata"),
    spec(K::SlowQueryLogDisabled, "ENV_004", "slow query log disabled", C::Blocking,
        "The slow query log is disabled on the target database; enable slow_query_log"),
    spec(K::AccessDenied, "PERM_001", "access denied", C::Blocking,
        "Access denied for the monitoring user; grant it access to the database"),
    spec(K::PrivilegeNotEnough, "PERM_002", "privilege not enough", C::Blocking,
        "The monitoring user lacks the privilege for '{}'; grant the required privilege"),
    spec(K::ConnectionTimeout, "NET_001", "connection timeout", C::Transient,
        "Connection timed out; the operation will be retried"),
    spec(K::ConnectionLost, "NET_002", "connection lost", C::Transient,
        "Connection lost; the operation will be retried"),
    spec(K::QueryTimeout, "NET_003", "query timeout", C::Transient,
        "Query execution timed out; the operation will be retried"),
    spec(K::SerializationFailure, "NET_004", "serialization failure", C::Transient,
        "Transaction serialization failure; the operation will be retried"),
    spec(K::EmptyResult, "DATA_001", "empty result", C::None,
        "Query returned no rows"),
    spec(K::DuplicateKey, "DATA_002", "duplicate key", C::None,
        "Record already exists; nothing to do"),
    spec(K::DataFormat, "DATA_003", "data format", C::Permanent,
        "Value has an invalid format: {}"),
    spec(K::SyntaxError, "SQL_001", "syntax error", C::Permanent,
        "SQL syntax error: {}"),
    spec(K::AiRateLimited, "AI_001", "ai rate limited", C::Transient,
        "Analysis service rate limit reached; the request will be retried"),
    spec(K::AiModelUnavailable, "AI_002", "ai model unavailable", C::Blocking,
        "Analysis model '{}' is unavailable; check the model name and endpoint"),
    spec(K::AiAuthFailed, "AI_004", "ai auth failed", C::Blocking,
        "Analysis service rejected the credentials; check the API key"),
    spec(K::AiTokenLimit, "AI_005", "ai token limit", C::Permanent,
        "Prompt exceeds the analysis model's token limit"),
    spec(K::AiContentFiltered, "AI_006", "ai content filtered", C::Permanent,
        "Analysis request was rejected by the content filter"),
    spec(K::AiServerError, "AI_007", "ai server error", C::Transient,
        "Analysis service returned a server error; the request will be retried"),
    spec(K::Unknown, "UNKNOWN", "unknown", C::None,
        "Unrecognized error: {}"),
];

const UNKNOWN_SPEC: ErrorKindSpec = spec(K::Unknown, "UNKNOWN", "unknown", C::None, "{}");

impl ErrorKind {
    pub fn spec(&self) -> &'static ErrorKindSpec {
        ERROR_KINDS
            .iter()
            .find(|s| s.kind == *self)
            .unwrap_or(&UNKNOWN_SPEC)
    }

    pub fn code(&self) -> &'static str {
        self.spec().code
    }

    pub fn category(&self) -> ErrorCategory {
        self.spec().category
    }

    pub fn message_template(&self) -> &'static str {
        self.spec().message_template
    }

    /// Look a kind up by its stable code.
    pub fn from_code(code: &str) -> Result<Self, ClassificationError> {
        ERROR_KINDS
            .iter()
            .find(|s| s.code.eq_ignore_ascii_case(code.trim()))
            .map(|s| s.kind)
            .ok_or_else(|| ClassificationError::UnknownKind {
                value: code.to_string(),
            })
    }

    /// Substitute positional args into the message template. Placeholders
    /// without a matching arg are left as `{}`.
    pub fn format_user_message(&self, args: &[&str]) -> String {
        format_template(self.message_template(), args)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

fn format_template(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;
    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        match args.next() {
            Some(arg) => out.push_str(arg),
            None => out.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_a_strategy() {
        for category in ErrorCategory::ALL {
            assert!(CATEGORY_STRATEGIES.iter().any(|(c, _)| *c == category));
        }
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<_> = ERROR_KINDS.iter().map(|s| s.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), ERROR_KINDS.len());
    }

    #[test]
    fn format_template_leaves_unmatched_placeholders() {
        assert_eq!(format_template("a {} b {}", &["x"]), "a x b {}");
        assert_eq!(format_template("none", &["x"]), "none");
        assert_eq!(format_template("{}{}", &["1", "2"]), "12");
    }
}
