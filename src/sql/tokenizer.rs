use crate::sql::{keyword::Keyword, token::Token, token_kind::TokenKind};

/// True for characters that belong to a word (identifier, keyword or number).
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lenient SQL tokenizer producing a flat stream of `Token`s.
///
/// Scope / Intent:
/// - Feeds the identifier resolver and the substitution pass of the canonicalizer.
/// - Accepts incomplete / syntactically invalid SQL and raw text that still
///   contains quotes (each quote becomes `Other('\'')`).
///
/// Behavior:
/// - Skips whitespace; callers recover it from the gaps between token spans.
/// - Aggregates runs of alphanumeric characters and `_` (Unicode aware) into a
///   single word, preserving original case. Digits are word characters, so
///   `3.14` yields `3`, `.`, `14`.
/// - Lowercases a word once to attempt keyword classification.
/// - Emits single-character tokens for comma, dot, parentheses and semicolon;
///   everything else is `Other(char)`.
///
/// Guarantees:
/// - Never panics; every span lies on char boundaries.
/// - Never returns an error (malformed constructs still yield tokens).
///
/// Complexity:
/// - O(n) time, O(t) space where `t` is number of tokens.
pub fn tokenize(sql: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let mut chars = sql.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }

        // Word path
        if is_word_char(c) {
            let mut end = start + c.len_utf8();
            while let Some(&(idx, cc)) = chars.peek() {
                if !is_word_char(cc) {
                    break;
                }
                end = idx + cc.len_utf8();
                chars.next();
            }
            let text = &sql[start..end];
            let kind = Keyword::from_lower(&text.to_ascii_lowercase())
                .map(TokenKind::Keyword)
                .unwrap_or_else(|| TokenKind::Ident(text.to_string()));
            out.push(Token::new(kind, start, end));
            continue;
        }

        // Single-character tokens
        let kind = match c {
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '(' => TokenKind::ParenOpen,
            ')' => TokenKind::ParenClose,
            ';' => TokenKind::Semicolon,
            other => TokenKind::Other(other),
        };
        out.push(Token::new(kind, start, start + c.len_utf8()));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::keyword::Keyword;
    use crate::sql::token_kind::TokenKind;

    #[test]
    fn basic_select_sequence() {
        let toks = tokenize("SELECT a, b FROM t");
        assert!(toks[0].is_keyword(Keyword::Select));
        assert_eq!(toks[1].ident(), Some("a"));
        assert_eq!(toks[2].kind, TokenKind::Comma);
        assert_eq!(toks[3].ident(), Some("b"));
        assert!(toks[4].is_keyword(Keyword::From));
        assert_eq!(toks[5].ident(), Some("t"));
        assert_eq!(toks.len(), 6);
    }

    #[test]
    fn preserves_case_for_identifiers() {
        let sql = "From MyTable";
        let toks = tokenize(sql);
        assert!(toks[0].is_keyword(Keyword::From));
        assert_eq!(toks[0].text(sql), "From");
        assert_eq!(toks[1].ident(), Some("MyTable"));
    }

    #[test]
    fn qualified_reference_abuts() {
        let toks = tokenize("T1.movie_title");
        assert_eq!(toks.len(), 3);
        assert!(toks[0].abuts(&toks[1]));
        assert!(toks[1].abuts(&toks[2]));
        assert_eq!(toks[2].ident(), Some("movie_title"));
    }

    #[test]
    fn numbers_are_words() {
        let toks = tokenize("x = 3.14");
        let words: Vec<_> = toks.iter().filter_map(|t| t.ident()).collect();
        assert_eq!(words, vec!["x", "3", "14"]);
    }

    #[test]
    fn unicode_spans_are_char_aligned() {
        let sql = "SELECT café, 'naïve' FROM t";
        let toks = tokenize(sql);
        assert_eq!(toks[1].text(sql), "café");
        assert!(toks.iter().any(|t| t.text(sql) == "naïve"));
        assert!(toks.iter().any(|t| matches!(t.kind, TokenKind::Other('\''))));
    }

    #[test]
    fn punctuation_tokens() {
        let toks = tokenize("(a.b,c);");
        assert!(toks.iter().any(|t| matches!(t.kind, TokenKind::ParenOpen)));
        assert!(toks.iter().any(|t| matches!(t.kind, TokenKind::Dot)));
        assert!(toks.iter().any(|t| matches!(t.kind, TokenKind::Comma)));
        assert!(toks.iter().any(|t| matches!(t.kind, TokenKind::ParenClose)));
        assert!(toks.iter().any(|t| matches!(t.kind, TokenKind::Semicolon)));
    }

    #[test]
    fn other_characters() {
        let toks = tokenize("SELECT * FROM t WHERE a >= 1");
        assert!(toks.iter().any(|t| matches!(t.kind, TokenKind::Other('*'))));
        assert!(toks.iter().any(|t| matches!(t.kind, TokenKind::Other('>'))));
        assert!(toks.iter().any(|t| matches!(t.kind, TokenKind::Other('='))));
    }

    #[test]
    fn empty_and_whitespace_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \n\t ").is_empty());
    }
}
