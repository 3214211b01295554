use super::*;

const ALIAS: &str = r"table_alias(?:_placeholder)?(\d+)";

/// Alias indexes at or above this are not table slots.
pub const MAX_TABLE_SLOTS: usize = 64;

static ALIAS_INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\b{ALIAS}\b")).expect("valid regex"));
static SUM_OR_AVG_OF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b(?:avg|sum)\s*\(\s*{ALIAS}\.col_name\b")).expect("valid regex")
});
static MIN_OR_MAX_OF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b(?:min|max)\s*\(\s*{ALIAS}\.col_name\b")).expect("valid regex")
});
static COMPARED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b{ALIAS}\.col_name\s*(?P<op>=|like)\s*(?P<tag>string|str|num|boolean)\b"
    ))
    .expect("valid regex")
});
static SUM_OR_AVG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:avg|sum)\s*\(").expect("valid regex"));
static ANY_COMPARED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<op>=|\blike)\s*(?P<tag>string|str|num|boolean)\b").expect("valid regex")
});
static SUBSTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bsubstr\s*\(").expect("valid regex"));

/// What the template says about the column of one slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Evidence {
    aggregated: bool,
    min_max: bool,
    substr: bool,
    equals_string: bool,
    equals_num: bool,
    equals_boolean: bool,
    like_string: bool,
}

impl Evidence {
    fn record_comparison(&mut self, op: &str, tag: &str) {
        match (op, tag) {
            ("=", "string" | "str") => self.equals_string = true,
            ("=", "num") => self.equals_num = true,
            ("=", "boolean") => self.equals_boolean = true,
            ("like", "string" | "str") => self.like_string = true,
            _ => {}
        }
    }

    fn constrained(self) -> bool {
        self.aggregated
            || self.equals_string
            || self.equals_num
            || self.equals_boolean
            || self.like_string
    }

    /// Narrow the unconstrained set; the fallback sets (`MIN`/`MAX`,
    /// `SUBSTR`) only apply when nothing before them constrained the slot.
    fn allowed(self) -> BTreeSet<ColumnType> {
        use ColumnType::*;
        let mut allowed: Option<BTreeSet<ColumnType>> = None;
        let mut narrow = |set: &[ColumnType]| {
            let set: BTreeSet<_> = set.iter().copied().collect();
            allowed = Some(match allowed.take() {
                Some(current) => current.intersection(&set).copied().collect(),
                None => set,
            });
        };
        if self.aggregated {
            narrow(&[Num]);
        }
        if self.min_max && !self.aggregated {
            narrow(&[Num, Date]);
        }
        if self.equals_string {
            narrow(&[String]);
        }
        if self.equals_num {
            narrow(&[Num]);
        }
        if self.equals_boolean {
            narrow(&[Boolean]);
        }
        if self.like_string {
            narrow(&[String]);
        }
        if self.substr && !self.constrained() {
            narrow(&[String, Date]);
        }
        allowed.unwrap_or_else(TemplateSlots::unconstrained)
    }
}

/// Table slots of a template and the column types each slot admits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSlots {
    /// One allowed-type set per table slot.
    pub column_types: Vec<BTreeSet<ColumnType>>,
}

impl TemplateSlots {
    /// The types a slot admits when the template says nothing about it.
    pub fn unconstrained() -> BTreeSet<ColumnType> {
        [
            ColumnType::Num,
            ColumnType::String,
            ColumnType::Date,
            ColumnType::Boolean,
        ]
        .into_iter()
        .collect()
    }

    /// Read the slots of a canonical template of either mode.
    ///
    /// The slot count is one more than the highest table alias index below
    /// [`MAX_TABLE_SLOTS`], or 1 when the template has no such alias. Each
    /// slot's types are narrowed by how `<alias>.col_name` is used: under
    /// `AVG`/`SUM` it must be numeric, under `MIN`/`MAX` numeric or a date,
    /// compared with a tag it must have that tag's type. A single-slot template applies these checks to the
    /// whole text, plus `SUBSTR(` for strings and dates.
    pub fn parse(template: &str) -> Self {
        let lower = template.to_lowercase();
        let slots = ALIAS_INDEX
            .captures_iter(&lower)
            .filter_map(|caps| caps[1].parse::<usize>().ok())
            .filter(|&index| {
                let ok = index < MAX_TABLE_SLOTS;
                if !ok {
                    debug!("Ignoring table alias index {index} in template");
                }
                ok
            })
            .max()
            .map_or(1, |max| max + 1);

        if slots == 1 {
            let mut evidence = Evidence {
                aggregated: SUM_OR_AVG.is_match(&lower),
                substr: SUBSTR.is_match(&lower),
                ..Default::default()
            };
            for caps in ANY_COMPARED.captures_iter(&lower) {
                evidence.record_comparison(&caps["op"], &caps["tag"]);
            }
            return Self {
                column_types: vec![evidence.allowed()],
            };
        }

        let mut evidence = vec![Evidence::default(); slots];
        let slot_of = |caps: &regex::Captures| caps[1].parse::<usize>().ok().filter(|&i| i < slots);
        for caps in SUM_OR_AVG_OF.captures_iter(&lower) {
            if let Some(i) = slot_of(&caps) {
                evidence[i].aggregated = true;
            }
        }
        for caps in MIN_OR_MAX_OF.captures_iter(&lower) {
            if let Some(i) = slot_of(&caps) {
                evidence[i].min_max = true;
            }
        }
        for caps in COMPARED.captures_iter(&lower) {
            if let Some(i) = slot_of(&caps) {
                evidence[i].record_comparison(&caps["op"], &caps["tag"]);
            }
        }
        Self {
            column_types: evidence.into_iter().map(Evidence::allowed).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.column_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.column_types.is_empty()
    }

    pub fn allowed(&self, slot: usize) -> Option<&BTreeSet<ColumnType>> {
        self.column_types.get(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use ColumnType::*;

    fn set(types: &[ColumnType]) -> BTreeSet<ColumnType> {
        types.iter().copied().collect()
    }

    #[test]
    fn slot_count_follows_highest_alias() {
        let slots = TemplateSlots::parse(
            "SELECT table_alias2.col_name FROM table_name AS table_alias0 JOIN table_name AS table_alias2",
        );
        assert_eq!(slots.len(), 3);
        assert!(slots.column_types.iter().all(|s| *s == TemplateSlots::unconstrained()));
    }

    #[test]
    fn generic_alias_family_counts_too() {
        let slots = TemplateSlots::parse(
            "SELECT AVG(table_alias_placeholder1.col_name) FROM table_name AS table_alias_placeholder0 \
             JOIN table_name AS table_alias_placeholder1",
        );
        assert_eq!(slots.len(), 2);
        assert_eq!(slots.allowed(1), Some(&set(&[Num])));
        assert_eq!(slots.allowed(0), Some(&TemplateSlots::unconstrained()));
    }

    #[rstest]
    #[case("SELECT SUM(table_alias0.col_name) FROM table_name AS table_alias0 JOIN table_name AS table_alias1", &[Num])]
    #[case("SELECT MAX(table_alias0.col_name) FROM table_name AS table_alias0 JOIN table_name AS table_alias1", &[Num, Date])]
    #[case("SELECT AVG(table_alias0.col_name), MIN(table_alias0.col_name) FROM table_name AS table_alias0 JOIN table_name AS table_alias1", &[Num])]
    #[case("SELECT * FROM table_name AS table_alias0 JOIN table_name AS table_alias1 WHERE table_alias0.col_name = string", &[String])]
    #[case("SELECT * FROM table_name AS table_alias0 JOIN table_name AS table_alias1 WHERE table_alias0.col_name LIKE string", &[String])]
    #[case("SELECT * FROM table_name AS table_alias0 JOIN table_name AS table_alias1 WHERE table_alias0.col_name = boolean", &[Boolean])]
    #[case("SELECT MAX(table_alias0.col_name) FROM table_name AS table_alias0 JOIN table_name AS table_alias1 WHERE table_alias0.col_name = num", &[Num])]
    #[case("SELECT * FROM table_name AS table_alias0 JOIN table_name AS table_alias1 WHERE table_alias0.col_name = num AND table_alias0.col_name = string", &[])]
    fn first_slot_constraints(#[case] template: &str, #[case] expected: &[ColumnType]) {
        let slots = TemplateSlots::parse(template);
        assert_eq!(slots.len(), 2);
        assert_eq!(slots.allowed(0), Some(&set(expected)));
        assert_eq!(slots.allowed(1), Some(&TemplateSlots::unconstrained()));
    }

    #[rstest]
    #[case("SELECT table_alias4000000000.col_name FROM table_name AS table_alias4000000000", 1)]
    #[case("SELECT table_alias99999999999999999999999.col_name FROM table_name", 1)]
    #[case("SELECT table_alias64.col_name FROM table_name AS table_alias1", 2)]
    #[case("SELECT table_alias63.col_name FROM table_name AS table_alias63", 64)]
    fn huge_alias_indexes_are_capped(#[case] template: &str, #[case] expected: usize) {
        assert_eq!(TemplateSlots::parse(template).len(), expected);
    }

    #[rstest]
    #[case("SELECT col_name FROM table_name", &[Num, String, Date, Boolean])]
    #[case("SELECT AVG(col_name) FROM table_name", &[Num])]
    #[case("SELECT col_name FROM table_name WHERE col_name = STR", &[String])]
    #[case("SELECT col_name FROM table_name WHERE col_name=boolean", &[Boolean])]
    #[case("SELECT SUBSTR(col_name, num, num) FROM table_name", &[String, Date])]
    #[case("SELECT SUBSTR(col_name, num, num) FROM table_name WHERE col_name = num", &[Num])]
    #[case("SELECT MAX(col_name) FROM table_name", &[Num, String, Date, Boolean])]
    fn single_slot_uses_whole_template(#[case] template: &str, #[case] expected: &[ColumnType]) {
        let slots = TemplateSlots::parse(template);
        assert_eq!(slots.column_types, vec![set(expected)]);
    }
}
