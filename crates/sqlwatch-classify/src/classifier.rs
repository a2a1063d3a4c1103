use sqlwatch_core::models::{ErrorClassification, ErrorKind};
use sqlwatch_observability::tracing_setup::events;

use crate::tables::{
    AMBIGUOUS_CODE, AMBIGUOUS_CODE_MESSAGES, DIAGNOSTIC_CLASSES, DIAGNOSTIC_CODES, KEYWORD_GROUPS,
};

/// Maps `(diagnostic code, message)` to a structured decision.
///
/// Stateless. The diagnostic code is consulted first, then the message
/// keyword groups in priority order; nothing matched means `Unknown`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, diagnostic_code: Option<&str>, message: &str) -> ErrorClassification {
        let kind = self.resolve_kind(diagnostic_code, message);
        let args = message_args(kind, message);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let classification = ErrorClassification::for_kind(kind, &args);
        events::error_classified(
            classification.code(),
            classification.category.as_str(),
            classification.strategy.as_str(),
        );
        classification
    }

    /// The kind alone, without building the user message or logging.
    pub fn resolve_kind(&self, diagnostic_code: Option<&str>, message: &str) -> ErrorKind {
        let lowered = message.to_lowercase();
        diagnostic_code
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .and_then(|code| kind_for_code(code, &lowered))
            .or_else(|| kind_for_message(&lowered))
            .unwrap_or(ErrorKind::Unknown)
    }

    /// Name of the keyword group a message falls into, if any.
    pub fn matched_group(&self, message: &str) -> Option<&'static str> {
        let lowered = message.to_lowercase();
        KEYWORD_GROUPS
            .iter()
            .find(|g| g.matches(&lowered))
            .map(|g| g.name)
    }
}

fn kind_for_code(code: &str, lowered: &str) -> Option<ErrorKind> {
    if code.eq_ignore_ascii_case(AMBIGUOUS_CODE) {
        let kind = AMBIGUOUS_CODE_MESSAGES
            .iter()
            .find(|(needle, _)| lowered.contains(needle))
            .map_or(ErrorKind::SyntaxError, |(_, kind)| *kind);
        return Some(kind);
    }
    DIAGNOSTIC_CODES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .or_else(|| {
            DIAGNOSTIC_CLASSES
                .iter()
                .find(|(class, _)| code.len() == 5 && code.starts_with(class))
        })
        .map(|(_, kind)| *kind)
}

fn kind_for_message(lowered: &str) -> Option<ErrorKind> {
    KEYWORD_GROUPS
        .iter()
        .find(|g| g.matches(lowered))
        .map(|g| g.kind)
}

/// Arguments for the kind's message template: the first quoted name in the
/// message for object and privilege kinds, the message itself otherwise.
fn message_args(kind: ErrorKind, message: &str) -> Vec<String> {
    match kind {
        ErrorKind::DatabaseNotFound
        | ErrorKind::TableNotFound
        | ErrorKind::ColumnNotFound
        | ErrorKind::PrivilegeNotEnough
        | ErrorKind::AiModelUnavailable => {
            vec![first_quoted(message).unwrap_or(message.trim()).to_string()]
        }
        _ => vec![message.trim().to_string()],
    }
}

/// Text inside the first pair of `'`, `"` or `` ` `` quotes.
fn first_quoted(message: &str) -> Option<&str> {
    let (start, quote) = message
        .char_indices()
        .find(|(_, c)| matches!(c, '\'' | '"' | '`'))?;
    let rest = &message[start + quote.len_utf8()..];
    let end = rest.find(quote)?;
    let inner = &rest[..end];
    (!inner.is_empty()).then_some(inner)
}
