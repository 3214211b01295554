//! Placeholder vocabulary written into canonical templates.
//!
//! Every token listed here is also treated as reserved by the resolver, so a
//! template fed back through the engine comes out unchanged.

use super::*;

/// Tag written in place of a literal compared against a boolean column.
pub const BOOLEAN_TAG: &str = "boolean";

/// The placeholder spellings used by one canonicalization mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vocabulary {
    pub num: &'static str,
    pub string: &'static str,
    pub date: &'static str,
    pub table: &'static str,
    pub column: &'static str,
    pub table_alias_prefix: &'static str,
    pub column_alias_prefix: &'static str,
}

impl Vocabulary {
    pub const GENERIC: Self = Self {
        num: "NUM",
        string: "STR",
        date: "DATE",
        table: "table_name",
        column: "col_name",
        table_alias_prefix: "table_alias_placeholder",
        column_alias_prefix: "col_alias_placeholder",
    };

    pub const TYPED: Self = Self {
        num: "num",
        string: "string",
        date: "date",
        table: "table_name",
        column: "col_name",
        table_alias_prefix: "table_alias",
        column_alias_prefix: "column_alias",
    };

    pub fn table_alias(&self, index: usize) -> String {
        format!("{}{index}", self.table_alias_prefix)
    }

    pub fn column_alias(&self, index: usize) -> String {
        format!("{}{index}", self.column_alias_prefix)
    }
}

const FIXED_PLACEHOLDERS: &[&str] = &[
    "num",
    "str",
    "string",
    "date",
    "boolean",
    "binary",
    "table_name",
    "col_name",
];

static NUMBERED_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:table_alias_placeholder|col_alias_placeholder|table_alias|column_alias)\d+$")
        .expect("valid placeholder pattern")
});

/// True if `word` is one of the placeholder tokens of any mode (case-insensitive).
pub fn is_placeholder(word: &str) -> bool {
    FIXED_PLACEHOLDERS
        .iter()
        .any(|p| p.eq_ignore_ascii_case(word))
        || NUMBERED_PLACEHOLDER.is_match(word)
}
