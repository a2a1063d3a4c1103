//! Token stream to template text.

use crate::lexer::{Token, TokenKind};

/// Placeholder written for every literal.
pub const PLACEHOLDER: &str = "?";

/// Words after which `(` keeps its leading space and `-` is unary.
const KEYWORDS: &[&str] = &[
    "ALL", "AND", "ANY", "AS", "ASC", "BETWEEN", "BY", "CASE", "CROSS", "DELETE", "DESC",
    "DISTINCT", "DIV", "ELSE", "END", "EXISTS", "FROM", "GROUP", "HAVING", "IN", "INNER",
    "INSERT", "INTERVAL", "INTO", "IS", "JOIN", "LEFT", "LIKE", "LIMIT", "MOD", "NOT", "OFFSET",
    "ON", "OR", "ORDER", "OUTER", "REGEXP", "REPLACE", "RETURN", "RIGHT", "RLIKE", "SELECT",
    "SET", "SOME", "THEN", "UNION", "UPDATE", "USING", "VALUES", "WHEN", "WHERE", "WITH", "XOR",
];

const LITERAL_WORDS: &[&str] = &["NULL", "TRUE", "FALSE"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Keyword,
    Ident,
    Literal,
    Op,
    LParen,
    RParen,
    Comma,
    Dot,
    Semicolon,
}

#[derive(Debug, Clone)]
struct Part {
    class: Class,
    text: String,
}

impl Part {
    fn literal() -> Self {
        Self {
            class: Class::Literal,
            text: PLACEHOLDER.to_string(),
        }
    }

    fn is_keyword(&self, word: &str) -> bool {
        self.class == Class::Keyword && self.text == word
    }
}

/// Build the parameterized template from lexed tokens.
pub fn normalize(tokens: &[Token<'_>]) -> String {
    let parts = parameterize(tokens);
    let parts = collapse_in_lists(parts);
    join(&parts)
}

/// Rebuild source text with comments dropped and whitespace collapsed.
pub fn clean(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 && token.space_before {
            out.push(' ');
        }
        out.push_str(token.text);
    }
    out
}

fn parameterize(tokens: &[Token<'_>]) -> Vec<Part> {
    let mut parts: Vec<Part> = Vec::with_capacity(tokens.len());
    for (i, token) in tokens.iter().enumerate() {
        let part = match token.kind {
            TokenKind::Number | TokenKind::Str => Part::literal(),
            TokenKind::Word => {
                let upper = token.text.to_uppercase();
                if LITERAL_WORDS.contains(&upper.as_str()) {
                    Part::literal()
                } else {
                    let class = if KEYWORDS.contains(&upper.as_str()) {
                        Class::Keyword
                    } else {
                        Class::Ident
                    };
                    Part { class, text: upper }
                }
            }
            TokenKind::QuotedIdent => Part {
                class: Class::Ident,
                text: unquote_backticks(token.text).to_uppercase(),
            },
            TokenKind::Op if token.text == PLACEHOLDER => Part::literal(),
            TokenKind::Op => {
                let next_is_number = tokens
                    .get(i + 1)
                    .is_some_and(|t| t.kind == TokenKind::Number);
                let signed = matches!(token.text, "-" | "+") && next_is_number;
                if signed && is_unary_position(parts.last()) {
                    continue;
                }
                Part {
                    class: Class::Op,
                    text: token.text.to_string(),
                }
            }
            TokenKind::LParen => punct(Class::LParen, "("),
            TokenKind::RParen => punct(Class::RParen, ")"),
            TokenKind::Comma => punct(Class::Comma, ","),
            TokenKind::Dot => punct(Class::Dot, "."),
            TokenKind::Semicolon => punct(Class::Semicolon, ";"),
        };
        parts.push(part);
    }
    while parts.last().is_some_and(|p| p.class == Class::Semicolon) {
        parts.pop();
    }
    parts
}

fn punct(class: Class, text: &str) -> Part {
    Part {
        class,
        text: text.to_string(),
    }
}

/// A sign is unary at statement start or after an operator, `(`, `,` or keyword.
fn is_unary_position(prev: Option<&Part>) -> bool {
    match prev {
        None => true,
        Some(p) => matches!(
            p.class,
            Class::Op | Class::LParen | Class::Comma | Class::Keyword
        ),
    }
}

fn unquote_backticks(text: &str) -> String {
    let inner = text
        .strip_prefix('`')
        .and_then(|t| t.strip_suffix('`'))
        .unwrap_or(text);
    inner.replace("``", "`")
}

/// `IN (?, ?, ?)` becomes `IN (?)`.
fn collapse_in_lists(parts: Vec<Part>) -> Vec<Part> {
    let mut out = Vec::with_capacity(parts.len());
    let mut i = 0;
    while i < parts.len() {
        if parts[i].is_keyword("IN") {
            if let Some(end) = literal_list_end(&parts, i + 1) {
                out.push(parts[i].clone());
                out.push(punct(Class::LParen, "("));
                out.push(Part::literal());
                out.push(punct(Class::RParen, ")"));
                i = end + 1;
                continue;
            }
        }
        out.push(parts[i].clone());
        i += 1;
    }
    out
}

/// Index of the `)` closing `( ? [, ?]* )` starting at `start`, if that is what's there.
fn literal_list_end(parts: &[Part], start: usize) -> Option<usize> {
    if parts.get(start)?.class != Class::LParen {
        return None;
    }
    let mut i = start + 1;
    loop {
        if parts.get(i)?.class != Class::Literal {
            return None;
        }
        i += 1;
        match parts.get(i)?.class {
            Class::Comma => i += 1,
            Class::RParen => return Some(i),
            _ => return None,
        }
    }
}

fn join(parts: &[Part]) -> String {
    let mut out = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 && needs_space(&parts[i - 1], part) {
            out.push(' ');
        }
        out.push_str(&part.text);
    }
    out
}

fn needs_space(prev: &Part, next: &Part) -> bool {
    if matches!(
        next.class,
        Class::Comma | Class::RParen | Class::Dot | Class::Semicolon
    ) {
        return false;
    }
    if matches!(prev.class, Class::LParen | Class::Dot) {
        return false;
    }
    // Function calls and column lists: `COUNT(*)`, `t(a, b)`.
    !(next.class == Class::LParen && prev.class == Class::Ident)
}
