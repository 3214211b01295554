//! Lightweight, lenient SQL tokenization.
//!
//! This module groups the building blocks the canonicalizer uses to reason about
//! a SQL statement without a full parser:
//!
//! Modules:
//! - `keyword`    : Structural keywords plus the reserved function / type names.
//! - `token_kind` : Classification of lexical atoms (words, punctuation, keywords).
//! - `token`      : Token struct pairing a `TokenKind` with source span offsets.
//! - `tokenizer`  : Single pass O(n) tokenizer producing a `Vec<Token>` from raw SQL.
//!
//! Design Principles:
//! 1. Accept incomplete / syntactically invalid SQL (real corpora are messy).
//! 2. Preserve original identifier casing; spans let callers rebuild the exact text.
//! 3. Keep the vocabulary pragmatic; extend only when a misclassification shows up.
//!
//! Example:
//! ```rust
//! use canonsql::sql::{Keyword, tokenize};
//!
//! let tokens = tokenize("SELECT a, b FROM my_table");
//! assert!(tokens.iter().any(|t| t.is_keyword(Keyword::Select)));
//! assert!(tokens.iter().any(|t| t.ident() == Some("my_table")));
//! ```
//!
//! NOTE: This is **not** a SQL parser and intentionally ignores most grammar.

pub mod keyword;
pub mod token;
pub mod token_kind;
pub mod tokenizer;

pub use keyword::{Keyword, is_reserved_word};
pub use token::Token;
pub use token_kind::TokenKind;
pub use tokenizer::tokenize;
