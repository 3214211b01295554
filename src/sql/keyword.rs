//! SQL vocabulary recognized by the lenient tokenizer and the identifier resolver.
//!
//! Two tiers are modelled here:
//! - `Keyword`: structural words. The tokenizer classifies these directly, and a
//!   keyword token is never considered a table, alias or bare column.
//! - Reserved words (`is_reserved_word`): built-in function and type names. They
//!   tokenize as plain identifiers (so `t.length` still works as a column) but are
//!   skipped whenever they appear unqualified.
//!
//! Matching is case-insensitive. `from_lower` expects an already lower-cased slice
//! so the tokenizer lowercases each word exactly once.

use std::{collections::HashSet, sync::LazyLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Select,
    From,
    Where,
    Group,
    By,
    Order,
    Having,
    Limit,
    Offset,
    On,
    Using,
    As,
    And,
    Or,
    Not,
    Join,
    Left,
    Right,
    Inner,
    Outer,
    Cross,
    Full,
    Natural,
    With,
    Recursive,
    Union,
    Except,
    Intersect,
    All,
    Any,
    Distinct,
    Null,
    True,
    False,
    Between,
    Like,
    In,
    Is,
    Exists,
    Case,
    When,
    Then,
    Else,
    End,
    Asc,
    Desc,
    Filter,
    Within,
    Over,
    Partition,
    Range,
    Rows,
    Table,
    Into,
    Update,
    Set,
    Values,
    Insert,
    Delete,
    Create,
    Alter,
    Drop,
    Index,
    Primary,
    Key,
    References,
    Lateral,
}

impl Keyword {
    /// Keywords that may directly follow a table reference (or its alias) in a
    /// FROM / JOIN clause. Punctuation terminators (`,` `)` `;`) and end of input
    /// are handled by the resolver.
    pub const CLAUSE_BOUNDARIES: [Self; 19] = [
        Keyword::On,
        Keyword::Using,
        Keyword::Where,
        Keyword::Group,
        Keyword::Order,
        Keyword::Having,
        Keyword::Limit,
        Keyword::Offset,
        Keyword::Join,
        Keyword::Left,
        Keyword::Right,
        Keyword::Inner,
        Keyword::Cross,
        Keyword::Full,
        Keyword::Outer,
        Keyword::Natural,
        Keyword::Union,
        Keyword::Except,
        Keyword::Intersect,
    ];

    /// Attempt to classify a *lower‑cased* word slice into a `Keyword`.
    /// Returns `None` if the word is not a recognized keyword.
    pub fn from_lower(word: &str) -> Option<Self> {
        use Keyword::*;
        let kw = match word {
            "select" => Select,
            "from" => From,
            "where" => Where,
            "group" => Group,
            "by" => By,
            "order" => Order,
            "having" => Having,
            "limit" => Limit,
            "offset" => Offset,
            "on" => On,
            "using" => Using,
            "as" => As,
            "and" => And,
            "or" => Or,
            "not" => Not,
            "join" => Join,
            "left" => Left,
            "right" => Right,
            "inner" => Inner,
            "outer" => Outer,
            "cross" => Cross,
            "full" => Full,
            "natural" => Natural,
            "with" => With,
            "recursive" => Recursive,
            "union" => Union,
            "except" => Except,
            "intersect" => Intersect,
            "all" => All,
            "any" => Any,
            "distinct" => Distinct,
            "null" => Null,
            "true" => True,
            "false" => False,
            "between" => Between,
            "like" => Like,
            "in" => In,
            "is" => Is,
            "exists" => Exists,
            "case" => Case,
            "when" => When,
            "then" => Then,
            "else" => Else,
            "end" => End,
            "asc" => Asc,
            "desc" => Desc,
            "filter" => Filter,
            "within" => Within,
            "over" => Over,
            "partition" => Partition,
            "range" => Range,
            "rows" => Rows,
            "table" => Table,
            "into" => Into,
            "update" => Update,
            "set" => Set,
            "values" => Values,
            "insert" => Insert,
            "delete" => Delete,
            "create" => Create,
            "alter" => Alter,
            "drop" => Drop,
            "index" => Index,
            "primary" => Primary,
            "key" => Key,
            "references" => References,
            "lateral" => Lateral,
            _ => return None,
        };
        Some(kw)
    }

    /// Canonical lowercase string form of the keyword.
    pub const fn as_str(self) -> &'static str {
        use Keyword::*;
        match self {
            Select => "select",
            From => "from",
            Where => "where",
            Group => "group",
            By => "by",
            Order => "order",
            Having => "having",
            Limit => "limit",
            Offset => "offset",
            On => "on",
            Using => "using",
            As => "as",
            And => "and",
            Or => "or",
            Not => "not",
            Join => "join",
            Left => "left",
            Right => "right",
            Inner => "inner",
            Outer => "outer",
            Cross => "cross",
            Full => "full",
            Natural => "natural",
            With => "with",
            Recursive => "recursive",
            Union => "union",
            Except => "except",
            Intersect => "intersect",
            All => "all",
            Any => "any",
            Distinct => "distinct",
            Null => "null",
            True => "true",
            False => "false",
            Between => "between",
            Like => "like",
            In => "in",
            Is => "is",
            Exists => "exists",
            Case => "case",
            When => "when",
            Then => "then",
            Else => "else",
            End => "end",
            Asc => "asc",
            Desc => "desc",
            Filter => "filter",
            Within => "within",
            Over => "over",
            Partition => "partition",
            Range => "range",
            Rows => "rows",
            Table => "table",
            Into => "into",
            Update => "update",
            Set => "set",
            Values => "values",
            Insert => "insert",
            Delete => "delete",
            Create => "create",
            Alter => "alter",
            Drop => "drop",
            Index => "index",
            Primary => "primary",
            Key => "key",
            References => "references",
            Lateral => "lateral",
        }
    }

    /// True for the keywords that introduce a table reference (`FROM t`, `JOIN t`).
    pub const fn introduces_table(self) -> bool {
        matches!(self, Keyword::From | Keyword::Join)
    }

    /// True if this keyword may terminate a FROM / JOIN table item.
    pub fn is_clause_boundary(self) -> bool {
        Self::CLAUSE_BOUNDARIES.contains(&self)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in functions and type names, upper-cased.
const RESERVED_WORDS: &[&str] = &[
    // aggregates / window functions
    "COUNT",
    "SUM",
    "AVG",
    "MIN",
    "MAX",
    "TOTAL",
    "STDDEV",
    "PERCENTILE_CONT",
    "STRING_AGG",
    "GROUP_CONCAT",
    "JSON_BUILD_OBJECT",
    "JSON_OBJECT_AGG",
    "ROW_NUMBER",
    "RANK",
    "DENSE_RANK",
    "NTILE",
    "LAG",
    "LEAD",
    "FIRST_VALUE",
    "LAST_VALUE",
    // scalar functions
    "ABS",
    "ROUND",
    "COALESCE",
    "NULLIF",
    "IFNULL",
    "IIF",
    "CAST",
    "EXTRACT",
    "UNNEST",
    "ARRAY",
    "SUBSTR",
    "SUBSTRING",
    "LENGTH",
    "CONCAT",
    "REPLACE",
    "TRIM",
    "UPPER",
    "LOWER",
    "INSTR",
    // date / time
    "STRFTIME",
    "JULIANDAY",
    "DATETIME",
    "DATE",
    "TIME",
    "TIMESTAMP",
    "INTERVAL",
    "YEAR",
    "MONTH",
    "CURRENT_DATE",
    "CURRENT_TIMESTAMP",
    // type names (CAST targets)
    "INT",
    "INTEGER",
    "BIGINT",
    "SMALLINT",
    "REAL",
    "FLOAT",
    "DOUBLE",
    "DECIMAL",
    "NUMERIC",
    "TEXT",
    "VARCHAR",
    "CHAR",
];

static RESERVED: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| RESERVED_WORDS.iter().copied().collect());

/// True if `word` names a built-in function or type (case-insensitive).
pub fn is_reserved_word(word: &str) -> bool {
    RESERVED.contains(word.to_ascii_uppercase().as_str())
}
