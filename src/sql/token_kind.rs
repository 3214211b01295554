//! Token kind definitions for the lenient SQL tokenizer.
//!
//! Each `TokenKind` variant represents a syntactic atom discovered during the
//! scanning phase. The tokenizer avoids strict SQL rules; anything unrecognized
//! becomes `Other(char)`, including quote characters, so raw (not yet
//! literal-normalized) text tokenizes without special handling.
//!
//! See `keyword.rs` for the `Keyword` enum and `tokenizer.rs` for tokenization.

use crate::sql::keyword::Keyword;

/// Classification for a token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Table / alias / column / function / numeric word, original casing kept.
    Ident(String),
    /// Recognized SQL keyword.
    Keyword(Keyword),
    /// Comma `,`.
    Comma,
    /// Dot `.` (qualified names like `alias.column`).
    Dot,
    /// Opening parenthesis `(`.
    ParenOpen,
    /// Closing parenthesis `)`.
    ParenClose,
    /// Statement terminator `;`.
    Semicolon,
    /// Any other single symbol we do not specially classify.
    Other(char),
}

impl TokenKind {
    /// True if this token is the given keyword.
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == kw)
    }

    /// Returns the keyword if this token is one.
    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            TokenKind::Keyword(k) => Some(*k),
            _ => None,
        }
    }

    /// Returns the identifier text if this token is an `Ident`.
    pub fn ident(&self) -> Option<&str> {
        match self {
            TokenKind::Ident(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Convenience: returns true if this token represents any identifier.
    pub fn is_ident(&self) -> bool {
        matches!(self, TokenKind::Ident(_))
    }

    /// True for identifiers and keywords alike (a `\w+` run in the source).
    pub fn is_word(&self) -> bool {
        matches!(self, TokenKind::Ident(_) | TokenKind::Keyword(_))
    }
}
