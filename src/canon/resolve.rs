//! Identifier resolution: which words of a query are tables, table aliases,
//! column aliases and columns.
//!
//! The resolver walks the token stream of the whole non-comment text once per
//! rule. Rules run in priority order and a word classified by an earlier rule
//! is never re-classified by a later one.

use super::*;

/// Insertion-ordered set of alias names; the position is the placeholder index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl AliasTable {
    /// Insert `name` if absent; returns its position either way.
    pub fn insert(&mut self, name: &str) -> usize {
        if let Some(&position) = self.positions.get(name) {
            return position;
        }
        let position = self.names.len();
        self.names.push(name.to_string());
        self.positions.insert(name.to_string(), position);
        position
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Everything the resolver learned about a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub tables: BTreeSet<String>,
    pub table_aliases: AliasTable,
    pub column_aliases: AliasTable,
    pub columns: BTreeSet<String>,
    /// Only explicit `FROM t a` / `FROM t AS a` bindings; inferred aliases
    /// have no table.
    pub alias_to_table: HashMap<String, String>,
}

impl Resolution {
    /// True if `word` already has a table, table alias or column alias role.
    pub fn is_known(&self, word: &str) -> bool {
        self.tables.contains(word)
            || self.table_aliases.contains(word)
            || self.column_aliases.contains(word)
    }

    /// The table a qualifier refers to: the bound table of an alias, or the
    /// qualifier itself when it is a table.
    pub fn table_of<'a>(&'a self, qualifier: &'a str) -> Option<&'a str> {
        self.alias_to_table
            .get(qualifier)
            .map(String::as_str)
            .or_else(|| self.tables.contains(qualifier).then_some(qualifier))
    }

    /// Aliases explicitly bound to `table`.
    pub fn aliases_of<'a>(&'a self, table: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.alias_to_table
            .iter()
            .filter(move |(_, t)| t.as_str() == table)
            .map(|(alias, _)| alias.as_str())
    }

    fn bind_alias(&mut self, alias: &str, table: &str) {
        self.table_aliases.insert(alias);
        self.alias_to_table
            .insert(alias.to_string(), table.to_string());
    }
}

/// True for words that look like numbers (`42`, `1e5`), never for identifiers
/// that merely start with a digit and continue with letters.
pub fn looks_numeric(word: &str) -> bool {
    word.starts_with(|c: char| c.is_ascii_digit()) && word.parse::<f64>().is_ok()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    raw: bool,
}

impl Resolver {
    /// `raw`: the text still carries its literals (numbers, quoted strings).
    pub fn new(raw: bool) -> Self {
        Self { raw }
    }

    pub fn resolve(&self, text: &str) -> Resolution {
        let text = if self.raw {
            mask_quoted(text)
        } else {
            text.into()
        };
        let tokens = tokenize(&text);
        let mut scan = Scan {
            text: &text,
            tokens: &tokens,
            raw: self.raw,
            out: Resolution::default(),
        };
        scan.common_table_expressions();
        scan.table_references();
        scan.column_aliases();
        scan.qualified_references();
        scan.bare_columns();
        trace!(
            "Resolved {} tables, {} table aliases, {} column aliases, {} columns",
            scan.out.tables.len(),
            scan.out.table_aliases.len(),
            scan.out.column_aliases.len(),
            scan.out.columns.len()
        );
        scan.out
    }
}

struct Scan<'a> {
    text: &'a str,
    tokens: &'a [Token],
    raw: bool,
    out: Resolution,
}

impl<'a> Scan<'a> {
    fn kind(&self, i: usize) -> Option<&'a TokenKind> {
        self.tokens.get(i).map(|t| &t.kind)
    }

    fn is_keyword(&self, i: usize, kw: Keyword) -> bool {
        self.tokens.get(i).is_some_and(|t| t.is_keyword(kw))
    }

    fn word(&self, i: usize) -> Option<&'a str> {
        self.tokens
            .get(i)
            .filter(|t| t.kind.is_word())
            .map(|t| t.text(self.text))
    }

    fn ident(&self, i: usize) -> Option<&'a str> {
        self.tokens.get(i).and_then(Token::ident)
    }

    /// An identifier that may name something: not reserved, not a
    /// placeholder, not a number.
    fn name(&self, i: usize) -> Option<&'a str> {
        self.ident(i)
            .filter(|w| !is_reserved_word(w) && !is_placeholder(w) && !looks_numeric(w))
    }

    fn abutting_dot(&self, i: usize) -> bool {
        matches!(
            (self.tokens.get(i), self.tokens.get(i + 1), self.tokens.get(i + 2)),
            (Some(q), Some(dot), Some(c))
                if q.kind.is_word() && dot.kind == TokenKind::Dot && c.kind.is_word()
                    && q.abuts(dot) && dot.abuts(c)
        )
    }

    /// End of a FROM / JOIN table item.
    fn ends_table_item(&self, i: usize) -> bool {
        match self.kind(i) {
            None => true,
            Some(TokenKind::Comma | TokenKind::ParenClose | TokenKind::Semicolon) => true,
            Some(TokenKind::Keyword(kw)) => kw.is_clause_boundary(),
            Some(_) => false,
        }
    }

    /// Index just past the parenthesis matching the one at `open`.
    fn skip_parens(&self, open: usize) -> usize {
        let mut depth = 0usize;
        for (i, token) in self.tokens.iter().enumerate().skip(open) {
            match token.kind {
                TokenKind::ParenOpen => depth += 1,
                TokenKind::ParenClose => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return i + 1;
                    }
                }
                _ => {}
            }
        }
        self.tokens.len()
    }

    /// `WITH [RECURSIVE] a AS (...), b AS (...)`
    fn common_table_expressions(&mut self) {
        for i in 0..self.tokens.len() {
            if !self.is_keyword(i, Keyword::With) {
                continue;
            }
            let mut at = i + 1;
            if self.is_keyword(at, Keyword::Recursive) {
                at += 1;
            }
            while let Some(name) = self.name(at) {
                if !self.is_keyword(at + 1, Keyword::As) {
                    break;
                }
                self.out.tables.insert(name.to_string());
                if self.kind(at + 2) != Some(&TokenKind::ParenOpen) {
                    break;
                }
                let next = self.skip_parens(at + 2);
                if self.kind(next) != Some(&TokenKind::Comma) {
                    break;
                }
                at = next + 1;
            }
        }
    }

    /// `FROM|JOIN t [AS] a` followed by the end of the table item.
    fn table_references(&mut self) {
        for i in 0..self.tokens.len() {
            if !self.kind(i).and_then(TokenKind::keyword).is_some_and(Keyword::introduces_table) {
                continue;
            }
            let Some(table) = self.ident(i + 1).filter(|w| !is_placeholder(w) && !looks_numeric(w))
            else {
                continue;
            };

            let explicit = self.is_keyword(i + 2, Keyword::As);
            let alias_at = if explicit { i + 3 } else { i + 2 };
            if self.word(alias_at).is_some() && self.ends_table_item(alias_at + 1) {
                self.out.tables.insert(table.to_string());
                if let Some(alias) = self.name(alias_at) {
                    self.out.bind_alias(alias, table);
                }
            } else if !explicit && self.ends_table_item(i + 2) {
                self.out.tables.insert(table.to_string());
            }
        }
    }

    /// `expr AS name` outside of table references.
    fn column_aliases(&mut self) {
        for i in 0..self.tokens.len() {
            if !self.is_keyword(i, Keyword::As) {
                continue;
            }
            let Some(alias) = self.name(i + 1) else {
                continue;
            };
            let followed = match self.kind(i + 2) {
                None => true,
                Some(TokenKind::Comma | TokenKind::ParenClose | TokenKind::Semicolon) => true,
                Some(TokenKind::Keyword(_)) => true,
                Some(TokenKind::Ident(w)) => w.starts_with(|c: char| c.is_alphabetic() || c == '_'),
                Some(_) => false,
            };
            if followed && !self.out.table_aliases.contains(alias) {
                self.out.column_aliases.insert(alias);
            }
        }
    }

    /// `q.c`: `c` is a column, a `q` that is neither a table nor a table alias
    /// is an alias nobody declared. A column alias used as a qualifier (the
    /// `AS sub` of a derived table) becomes a table alias as well.
    fn qualified_references(&mut self) {
        let mut i = 0;
        while i + 2 < self.tokens.len() {
            if !self.abutting_dot(i) {
                i += 1;
                continue;
            }
            // `2.5`: the fraction of a number, not a column
            let qualifier_is_name = self
                .kind(i)
                .and_then(TokenKind::ident)
                .is_some_and(|q| !looks_numeric(q));
            if let Some(column) = self.word(i + 2)
                && qualifier_is_name
                && !is_placeholder(column)
                && !looks_numeric(column)
            {
                self.out.columns.insert(column.to_string());
            }
            if let Some(qualifier) = self.name(i)
                && !self.out.tables.contains(qualifier)
                && !self.out.table_aliases.contains(qualifier)
            {
                self.out.table_aliases.insert(qualifier);
            }
            i += 3;
        }
    }

    /// Every other plain identifier that is not a function call.
    fn bare_columns(&mut self) {
        let tokens = self.tokens;
        for (i, token) in tokens.iter().enumerate() {
            let TokenKind::Ident(word) = &token.kind else {
                continue;
            };
            if is_reserved_word(word)
                || is_placeholder(word)
                || (self.raw && word.starts_with(|c: char| c.is_ascii_digit()))
                || self.out.is_known(word)
                || self.kind(i + 1) == Some(&TokenKind::ParenOpen)
            {
                continue;
            }
            self.out.columns.insert(word.clone());
        }
    }
}
