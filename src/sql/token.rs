//! Token model tying a `TokenKind` to its source span.
//!
//! A `Token` is its classification (`kind`) plus byte offsets (`start`, `end`)
//! into the original SQL string. The canonicalizer rewrites text by copying the
//! bytes between token spans verbatim, so offsets must always be exact.
use crate::sql::{keyword::Keyword, token_kind::TokenKind};

/// A lexical token with its inclusive start and exclusive end byte offsets.
///
/// Invariants:
/// - `end >= start`
/// - `[start, end)` is a valid slice range (on char boundaries) of the original input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    /// Construct a new token.
    pub const fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    /// Returns the identifier text if this token is an identifier.
    pub fn ident(&self) -> Option<&str> {
        self.kind.ident()
    }

    /// Returns true if this token represents a given keyword.
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.kind.is_keyword(kw)
    }

    /// The exact source text of this token, original casing included.
    pub fn text<'a>(&self, sql: &'a str) -> &'a str {
        &sql[self.start..self.end]
    }

    /// True if `next` starts exactly where this token ends (no whitespace between).
    pub fn abuts(&self, next: &Token) -> bool {
        self.end == next.start
    }
}
