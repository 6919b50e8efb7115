//! Lexer token types

use std::fmt;

/// Token kinds for the permission clause language.
///
/// The language is `clause (',' clause)*` with `clause = word '=' word`;
/// whitespace is insignificant and never appears in a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Any run of characters other than `=`, `,` and whitespace.
    Word(String),
    Eq,
    Comma,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Word(w) => f.write_str(w),
            TokenKind::Eq => f.write_str("="),
            TokenKind::Comma => f.write_str(","),
            TokenKind::Eof => Ok(()),
        }
    }
}

/// Source location span (byte offsets, 1-based column).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub column: usize,
}

impl Default for Span {
    fn default() -> Self {
        Self {
            start: 0,
            end: 0,
            column: 1,
        }
    }
}

/// A token with its kind and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}
