//! Literal normalization: dates, strings and numbers become type tags.

use super::*;
use regex::{Captures, NoExpand, Replacer};
use std::borrow::Cow;

static DATE_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:DATE|TIMESTAMP|TIME|INTERVAL)\s*'(?:[^']|'')*'").expect("valid regex")
});
static SINGLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'(?:[^']|'')*'").expect("valid regex"));
static DOUBLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(?:[^"\\]|\\.)*""#).expect("valid regex"));
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+\.?\d*(?:[eE][-+]?\d+)?\b").expect("valid regex"));
static LEADING_DOT_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\B\.\d+(?:[eE][-+]?\d+)?\b").expect("valid regex"));

static BOOLEAN_AFTER_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<reference>[\w.]+)(?P<op>\s*=\s*)(?P<literal>\d+\b|'(?:[^']|'')*')")
        .expect("valid regex")
});
static BOOLEAN_BEFORE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<literal>\b\d+|'(?:[^']|'')*')(?P<op>\s*=\s*)(?P<reference>[\w.]+)")
        .expect("valid regex")
});

/// Column references known to hold booleans, in every spelling the query may
/// use: `table.col`, `alias.col` and, for tables the query mentions, bare `col`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BooleanRefs(HashSet<String>);

impl BooleanRefs {
    pub fn build(schema: &Database, resolution: &Resolution) -> Self {
        let mut refs = HashSet::new();
        for (table, column) in schema
            .columns()
            .filter(|(_, c)| c.column_type == ColumnType::Boolean)
        {
            refs.insert(format!("{table}.{}", column.name));
            for alias in resolution.aliases_of(table) {
                refs.insert(format!("{alias}.{}", column.name));
            }
            if resolution.tables.contains(table) {
                refs.insert(column.name.clone());
            }
        }
        Self(refs)
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.0.contains(reference)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `a.b.flag` matches `a.b.flag`, `b.flag` or `flag`.
    fn matches_tail(&self, reference: &str) -> bool {
        self.contains(reference)
            || reference
                .match_indices('.')
                .any(|(i, _)| self.contains(&reference[i + 1..]))
    }

    /// `t.flag.x` matches `t.flag.x`, `t.flag` or `t`.
    fn matches_head(&self, reference: &str) -> bool {
        self.contains(reference)
            || reference
                .match_indices('.')
                .any(|(i, _)| self.contains(&reference[..i]))
    }
}

impl<S: Into<String>> FromIterator<S> for BooleanRefs {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Rewrites literals of a code span to the vocabulary's type tags.
///
/// Passes run in a fixed order: boolean comparisons (when refs are set), date
/// literals, single-quoted strings, double-quoted strings, leading-dot
/// decimals, numbers.
#[derive(Debug, Clone, Copy)]
pub struct LiteralNormalizer<'r> {
    vocabulary: Vocabulary,
    booleans: Option<&'r BooleanRefs>,
}

impl<'r> LiteralNormalizer<'r> {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            booleans: None,
        }
    }

    /// Tag literals compared against any of `refs` as `boolean`.
    pub fn with_boolean_refs<'b>(self, refs: &'b BooleanRefs) -> LiteralNormalizer<'b> {
        LiteralNormalizer {
            vocabulary: self.vocabulary,
            booleans: (!refs.is_empty()).then_some(refs),
        }
    }

    pub fn normalize<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let mut out = Cow::Borrowed(text);
        if let Some(refs) = self.booleans {
            out = replace(out, &BOOLEAN_AFTER_REFERENCE, |caps: &Captures| {
                tag_boolean(caps, refs.matches_tail(&caps["reference"]), false)
            });
            out = replace(out, &BOOLEAN_BEFORE_REFERENCE, |caps: &Captures| {
                tag_boolean(caps, refs.matches_head(&caps["reference"]), true)
            });
        }
        out = replace(out, &DATE_LITERAL, NoExpand(self.vocabulary.date));
        out = replace(out, &SINGLE_QUOTED, NoExpand(self.vocabulary.string));
        out = replace(out, &DOUBLE_QUOTED, NoExpand(self.vocabulary.string));
        out = replace(out, &LEADING_DOT_NUMBER, NoExpand(self.vocabulary.num));
        replace(out, &NUMBER, NoExpand(self.vocabulary.num))
    }
}

fn tag_boolean(caps: &Captures, hit: bool, reversed: bool) -> String {
    match (hit, reversed) {
        (false, _) => caps[0].to_string(),
        (true, false) => format!("{}{}{BOOLEAN_TAG}", &caps["reference"], &caps["op"]),
        (true, true) => format!("{BOOLEAN_TAG}{}{}", &caps["op"], &caps["reference"]),
    }
}

fn replace<'t>(text: Cow<'t, str>, re: &Regex, rep: impl Replacer) -> Cow<'t, str> {
    match text {
        Cow::Borrowed(s) => re.replace_all(s, rep),
        Cow::Owned(s) => Cow::Owned(re.replace_all(&s, rep).into_owned()),
    }
}

/// Blank out the contents of quoted literals, keeping every byte offset, so
/// words inside strings never reach identifier resolution.
pub fn mask_quoted(text: &str) -> Cow<'_, str> {
    let blank = |caps: &Captures| " ".repeat(caps[0].len());
    let out = replace(Cow::Borrowed(text), &SINGLE_QUOTED, blank);
    replace(out, &DOUBLE_QUOTED, blank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn generic(text: &str) -> String {
        LiteralNormalizer::new(Vocabulary::GENERIC)
            .normalize(text)
            .into_owned()
    }

    fn typed(text: &str, refs: &BooleanRefs) -> String {
        LiteralNormalizer::new(Vocabulary::TYPED)
            .with_boolean_refs(refs)
            .normalize(text)
            .into_owned()
    }

    #[rstest]
    #[case("x = 'abc'", "x = STR")]
    #[case("x = 'it''s'", "x = STR")]
    #[case(r#"x = "a \" b""#, "x = STR")]
    #[case("x = 42", "x = NUM")]
    #[case("x > 3.14", "x > NUM")]
    #[case("x > 1e10", "x > NUM")]
    #[case("x > 2.5E-3", "x > NUM")]
    #[case("x > .5", "x > NUM")]
    #[case("d = DATE '2020-01-01'", "d = DATE")]
    #[case("d < timestamp'2020-01-01 10:00'", "d < DATE")]
    #[case("d > NOW() - INTERVAL '3 days'", "d > NOW() - DATE")]
    #[case("x = 'abc123'", "x = STR")]
    #[case("LIMIT 10 OFFSET 20", "LIMIT NUM OFFSET NUM")]
    fn generic_literals(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(generic(text), expected);
    }

    #[rstest]
    #[case("t1.col = 1", "t1.col = NUM")]
    #[case("col2 = 3", "col2 = NUM")]
    #[case("table_alias_placeholder0.x", "table_alias_placeholder0.x")]
    #[case("x = 0.5", "x = NUM")]
    fn digits_inside_words_survive(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(generic(text), expected);
    }

    #[test]
    fn typed_vocabulary() {
        assert_eq!(
            typed("a = 'x' AND b = 2 AND c = DATE '2020-01-01'", &BooleanRefs::default()),
            "a = string AND b = num AND c = date"
        );
    }

    #[test]
    fn untouched_text_is_borrowed() {
        let normalizer = LiteralNormalizer::new(Vocabulary::GENERIC);
        assert!(matches!(
            normalizer.normalize("SELECT a FROM t"),
            Cow::Borrowed(_)
        ));
    }

    #[rstest]
    #[case("T1.user_trialist = 1", "T1.user_trialist = boolean")]
    #[case("user_trialist=0", "user_trialist=boolean")]
    #[case("ratings.user_trialist = 'yes'", "ratings.user_trialist = boolean")]
    #[case("1 = T1.user_trialist", "boolean = T1.user_trialist")]
    #[case("T1.critic_likes = 1", "T1.critic_likes = num")]
    #[case("T2.user_trialist = 1", "T2.user_trialist = boolean")]
    #[case("x = 1 AND T1.user_trialist = 0", "x = num AND T1.user_trialist = boolean")]
    fn boolean_comparisons(#[case] text: &str, #[case] expected: &str) {
        let refs: BooleanRefs = ["ratings.user_trialist", "T1.user_trialist", "user_trialist"]
            .into_iter()
            .collect();
        assert_eq!(typed(text, &refs), expected);
    }

    #[test]
    fn qualified_ref_needs_matching_qualifier() {
        let refs: BooleanRefs = ["T1.user_trialist"].into_iter().collect();
        assert_eq!(typed("T2.user_trialist = 1", &refs), "T2.user_trialist = num");
    }

    #[test]
    fn boolean_refs_from_schema() {
        let mut db = Database::new("movie_platform");
        db.insert_column("ratings", Column::new("user_trialist", ColumnType::Boolean));
        db.insert_column("ratings", Column::new("critic_likes", ColumnType::Num));
        db.insert_column("lists", Column::new("list_public", ColumnType::Boolean));

        let resolution = Resolver::new(true).resolve("SELECT * FROM ratings AS T1");
        let refs = BooleanRefs::build(&db, &resolution);
        assert!(refs.contains("ratings.user_trialist"));
        assert!(refs.contains("T1.user_trialist"));
        assert!(refs.contains("user_trialist"));
        assert!(refs.contains("lists.list_public"));
        assert!(!refs.contains("list_public"));
        assert!(!refs.contains("T1.critic_likes"));
        assert_eq!(refs.len(), 4);
    }

    #[test]
    fn masks_quoted_contents() {
        let text = r#"SELECT a FROM t WHERE b = 'x.y AS z' AND c = "q""#;
        let masked = mask_quoted(text);
        assert_eq!(masked.len(), text.len());
        assert!(!masked.contains("x.y"));
        assert!(masked.starts_with("SELECT a FROM t WHERE b = "));
    }
}
