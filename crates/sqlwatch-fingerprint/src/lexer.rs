//! SQL-aware lexer.
//!
//! Produces significant tokens only. Whitespace and comments are skipped but
//! remembered through `space_before`, so callers can rebuild cleaned text.
//!
//! Runs of two or more `*` are treated as masked digits: `138****5678`,
//! `192.168.1.***` and `****5678` each lex as a single numeric literal. A lone
//! `*` is always an operator (`SELECT *`, `COUNT(*)`, `a*b`).

/// Token classes the normalizer cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Bare identifier, keyword, or `@`/`@@` variable.
    Word,
    /// Backtick-quoted identifier, quotes included in `text`.
    QuotedIdent,
    /// Integer, decimal, exponent, hex, or masked numeric literal.
    Number,
    /// Single- or double-quoted string, quotes included in `text`.
    Str,
    LParen,
    RParen,
    Comma,
    Dot,
    Semicolon,
    /// Any operator or other punctuation, including the `?` placeholder.
    Op,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Raw source slice.
    pub text: &'a str,
    /// Whitespace or a comment preceded this token.
    pub space_before: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("unterminated string literal at byte {offset}")]
    UnterminatedString { offset: usize },

    #[error("unterminated quoted identifier at byte {offset}")]
    UnterminatedIdentifier { offset: usize },

    #[error("unterminated block comment at byte {offset}")]
    UnterminatedComment { offset: usize },
}

const THREE_CHAR_OPS: &[&str] = &["<=>", "->>"];
const TWO_CHAR_OPS: &[&str] = &[
    "<=", ">=", "<>", "!=", ":=", "||", "&&", "<<", ">>", "->",
];

/// Tokenize `sql`, skipping whitespace and comments.
pub fn tokenize(sql: &str) -> Result<Vec<Token<'_>>, LexError> {
    let bytes = sql.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut space_before = false;

    while pos < bytes.len() {
        let b = bytes[pos];

        if b.is_ascii_whitespace() {
            pos += 1;
            space_before = true;
            continue;
        }
        if b == b'#' || (b == b'-' && bytes.get(pos + 1) == Some(&b'-')) {
            pos = skip_line(bytes, pos);
            space_before = true;
            continue;
        }
        if b == b'/' && bytes.get(pos + 1) == Some(&b'*') {
            pos = skip_block_comment(bytes, pos)?;
            space_before = true;
            continue;
        }

        let start = pos;
        let kind = match b {
            b'\'' | b'"' => {
                pos = scan_quoted(bytes, pos, b)?;
                TokenKind::Str
            }
            b'`' => {
                pos = scan_backtick(bytes, pos)?;
                TokenKind::QuotedIdent
            }
            b'0'..=b'9' => {
                let (end, kind) = scan_number(bytes, pos);
                pos = end;
                kind
            }
            b'.' if bytes.get(pos + 1).is_some_and(u8::is_ascii_digit) => {
                let (end, kind) = scan_number(bytes, pos);
                pos = end;
                kind
            }
            b'*' if star_run(bytes, pos) >= 2 => {
                let (end, kind) = scan_number(bytes, pos);
                pos = end;
                kind
            }
            b'(' => {
                pos += 1;
                TokenKind::LParen
            }
            b')' => {
                pos += 1;
                TokenKind::RParen
            }
            b',' => {
                pos += 1;
                TokenKind::Comma
            }
            b'.' => {
                pos += 1;
                TokenKind::Dot
            }
            b';' => {
                pos += 1;
                TokenKind::Semicolon
            }
            b'@' => {
                let mut i = pos + 1;
                if bytes.get(i) == Some(&b'@') {
                    i += 1;
                }
                let end = skip_word(bytes, i);
                if end > i {
                    pos = end;
                    TokenKind::Word
                } else {
                    pos += 1;
                    TokenKind::Op
                }
            }
            _ if is_word_byte(b) => {
                pos = skip_word(bytes, pos);
                TokenKind::Word
            }
            _ => {
                pos += op_len(&sql[pos..]);
                TokenKind::Op
            }
        };

        tokens.push(Token {
            kind,
            text: &sql[start..pos],
            space_before,
        });
        space_before = false;
    }

    Ok(tokens)
}

/// Identifier bytes. Every non-ASCII byte counts, so multi-byte characters
/// are never split.
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

fn skip_word(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && is_word_byte(bytes[i]) {
        i += 1;
    }
    i
}

fn skip_line(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i] != b'\n' {
        i += 1;
    }
    i
}

fn skip_block_comment(bytes: &[u8], start: usize) -> Result<usize, LexError> {
    let mut i = start + 2;
    while i + 1 < bytes.len() {
        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            return Ok(i + 2);
        }
        i += 1;
    }
    Err(LexError::UnterminatedComment { offset: start })
}

/// Quoted string with `''` doubling and backslash escapes.
fn scan_quoted(bytes: &[u8], start: usize, quote: u8) -> Result<usize, LexError> {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => {
                if bytes.get(i + 1) == Some(&quote) {
                    i += 2;
                } else {
                    return Ok(i + 1);
                }
            }
            _ => i += 1,
        }
    }
    Err(LexError::UnterminatedString { offset: start })
}

fn scan_backtick(bytes: &[u8], start: usize) -> Result<usize, LexError> {
    let mut i = start + 1;
    while i < bytes.len() {
        if bytes[i] == b'`' {
            if bytes.get(i + 1) == Some(&b'`') {
                i += 2;
                continue;
            }
            return Ok(i + 1);
        }
        i += 1;
    }
    Err(LexError::UnterminatedIdentifier { offset: start })
}

fn star_run(bytes: &[u8], start: usize) -> usize {
    bytes[start..].iter().take_while(|&&b| b == b'*').count()
}

/// Scan a numeric literal. Digits followed directly by identifier bytes
/// (`1st`, `2fa`) form a word instead.
fn scan_number(bytes: &[u8], start: usize) -> (usize, TokenKind) {
    if bytes[start] == b'0'
        && matches!(bytes.get(start + 1), Some(b'x' | b'X'))
        && bytes.get(start + 2).is_some_and(u8::is_ascii_hexdigit)
    {
        let mut i = start + 2;
        while i < bytes.len() && bytes[i].is_ascii_hexdigit() {
            i += 1;
        }
        return finish_number(bytes, i);
    }

    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => i += 1,
            b'*' => {
                let run = star_run(bytes, i);
                if run < 2 {
                    break;
                }
                i += run;
            }
            b'.' => {
                let next = bytes.get(i + 1).copied();
                let digit_next = next.is_some_and(|n| n.is_ascii_digit());
                let mask_next = next == Some(b'*') && star_run(bytes, i + 1) >= 2;
                if digit_next || mask_next {
                    i += 1;
                } else {
                    break;
                }
            }
            b'e' | b'E' if i > start && bytes[i - 1].is_ascii_digit() => {
                let mut j = i + 1;
                if matches!(bytes.get(j), Some(b'+' | b'-')) {
                    j += 1;
                }
                if bytes.get(j).is_some_and(u8::is_ascii_digit) {
                    i = j;
                } else {
                    break;
                }
            }
            _ => break,
        }
    }
    finish_number(bytes, i)
}

fn finish_number(bytes: &[u8], end: usize) -> (usize, TokenKind) {
    if end < bytes.len() && is_word_byte(bytes[end]) {
        (skip_word(bytes, end), TokenKind::Word)
    } else {
        (end, TokenKind::Number)
    }
}

fn op_len(rest: &str) -> usize {
    if let Some(op) = THREE_CHAR_OPS.iter().find(|op| rest.starts_with(*op)) {
        return op.len();
    }
    if let Some(op) = TWO_CHAR_OPS.iter().find(|op| rest.starts_with(*op)) {
        return op.len();
    }
    rest.chars().next().map_or(1, char::len_utf8)
}
