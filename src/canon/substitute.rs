//! Identifier substitution over literal-normalized code.

use super::*;
use std::{borrow::Cow, ops::Range};

/// One identifier rewrite, in template coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// Byte range of `replacement` inside the template.
    pub range: Range<usize>,
    pub original: String,
    pub replacement: String,
}

/// Rewrites the words of a code span according to a [`Resolution`].
///
/// For each word, first match wins:
/// 1. placeholders are left alone;
/// 2. unqualified keywords and reserved words are left alone;
/// 3. `q.col` with a known schema type for `(table of q, col)` becomes the type tag;
/// 4. table alias → numbered table alias placeholder;
/// 5. column alias → numbered column alias placeholder;
/// 6. table → `table_name`;
/// 7. column → its unique schema type tag, else `col_name`.
#[derive(Debug, Clone, Copy)]
pub struct Substituter<'a> {
    resolution: &'a Resolution,
    vocabulary: Vocabulary,
    schema: Option<&'a Database>,
}

impl<'a> Substituter<'a> {
    /// `schema`: consulted for type tags; pass `None` to emit only `col_name`.
    pub fn new(
        resolution: &'a Resolution,
        vocabulary: Vocabulary,
        schema: Option<&'a Database>,
    ) -> Self {
        Self {
            resolution,
            vocabulary,
            schema,
        }
    }

    /// Append the rewritten `code` to `template`, recording every rewrite.
    pub fn apply(&self, code: &str, template: &mut String, substitutions: &mut Vec<Substitution>) {
        let tokens = tokenize(code);
        let mut copied = 0;
        for (i, token) in tokens.iter().enumerate() {
            if !token.kind.is_word() {
                continue;
            }
            let Some(replacement) = self.replacement(&tokens, i, code) else {
                continue;
            };
            template.push_str(&code[copied..token.start]);
            let start = template.len();
            template.push_str(&replacement);
            substitutions.push(Substitution {
                range: start..template.len(),
                original: token.text(code).to_string(),
                replacement: replacement.into_owned(),
            });
            copied = token.end;
        }
        template.push_str(&code[copied..]);
    }

    fn replacement(&self, tokens: &[Token], i: usize, code: &str) -> Option<Cow<'static, str>> {
        let token = &tokens[i];
        let word = token.text(code);
        if is_placeholder(word) {
            return None;
        }
        let qualifier = qualifier_of(tokens, i, code);
        if qualifier.is_none() && (token.kind.keyword().is_some() || is_reserved_word(word)) {
            return None;
        }

        if let (Some(q), Some(schema)) = (qualifier, self.schema)
            && let Some(ty) = self
                .resolution
                .table_of(q)
                .and_then(|table| schema.column_type(table, word))
        {
            return Some(ty.tag().into());
        }

        let r = self.resolution;
        if let Some(index) = r.table_aliases.position(word) {
            Some(self.vocabulary.table_alias(index).into())
        } else if let Some(index) = r.column_aliases.position(word) {
            Some(self.vocabulary.column_alias(index).into())
        } else if r.tables.contains(word) {
            Some(self.vocabulary.table.into())
        } else if r.columns.contains(word) {
            let tag = self
                .schema
                .and_then(|schema| schema.unique_column_type(word))
                .map_or(self.vocabulary.column, ColumnType::tag);
            Some(tag.into())
        } else {
            None
        }
    }
}

/// The word directly qualifying `tokens[i]` (`q` in `q.col`), if any.
fn qualifier_of<'c>(tokens: &[Token], i: usize, code: &'c str) -> Option<&'c str> {
    let dot = tokens.get(i.checked_sub(1)?)?;
    let qualifier = tokens.get(i.checked_sub(2)?)?;
    (dot.kind == TokenKind::Dot
        && qualifier.kind.is_word()
        && qualifier.abuts(dot)
        && dot.abuts(&tokens[i]))
    .then(|| qualifier.text(code))
}
