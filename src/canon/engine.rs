use super::*;
use itertools::Itertools as _;

/// Result of one canonicalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canonical {
    pub template: String,
    pub resolution: Resolution,
    /// Identifier rewrites in template order.
    pub substitutions: Vec<Substitution>,
}

impl Canonical {
    fn unchanged(sql: &str) -> Self {
        Self {
            template: sql.to_string(),
            resolution: Resolution::default(),
            substitutions: Vec::new(),
        }
    }

    /// Put the original identifiers back into the template. Literal tags stay.
    pub fn restore(&self) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut copied = 0;
        for substitution in &self.substitutions {
            out.push_str(&self.template[copied..substitution.range.start]);
            out.push_str(&substitution.original);
            copied = substitution.range.end;
        }
        out.push_str(&self.template[copied..]);
        out
    }

    /// Number of table alias placeholders in the template.
    pub fn table_slots(&self) -> usize {
        self.resolution.table_aliases.len()
    }
}

/// SQL → template engine.
///
/// ```rust
/// use canonsql::{Canonicalizer, Policy};
///
/// let canonical = Canonicalizer::new(Policy::GENERIC)
///     .canonicalize("SELECT name FROM users WHERE age > 30");
/// assert_eq!(canonical.template, "SELECT col_name FROM table_name WHERE col_name > NUM");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Canonicalizer<'s> {
    policy: Policy,
    schema: Option<&'s Database>,
}

impl<'s> Canonicalizer<'s> {
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            schema: None,
        }
    }

    pub fn with_schema(self, schema: Option<&'s Database>) -> Self {
        Self { schema, ..self }
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Canonicalize `sql`; comments come back byte-for-byte, code spans have
    /// their literals and identifiers replaced.
    pub fn canonicalize(&self, sql: &str) -> Canonical {
        if sql.trim().is_empty() {
            return Canonical::unchanged(sql);
        }
        let segments = segment(sql);
        let code = segments
            .iter()
            .filter(|s| !s.is_comment())
            .map(|s| s.text)
            .join(" ");
        if code.trim().is_empty() {
            return Canonical::unchanged(sql);
        }

        let vocabulary = self.policy.vocabulary;
        let literals = LiteralNormalizer::new(vocabulary);
        let resolution = if self.policy.resolve_raw {
            Resolver::new(true).resolve(&code)
        } else {
            Resolver::new(false).resolve(&literals.normalize(&code))
        };

        let booleans = match self.schema {
            Some(schema) if self.policy.boolean_literals => BooleanRefs::build(schema, &resolution),
            _ => BooleanRefs::default(),
        };
        let literals = literals.with_boolean_refs(&booleans);
        let typing = self.schema.filter(|_| self.policy.schema_typing);
        let substituter = Substituter::new(&resolution, vocabulary, typing);

        let mut template = String::with_capacity(sql.len());
        let mut substitutions = Vec::new();
        for segment in &segments {
            if segment.is_comment() {
                template.push_str(segment.text);
            } else {
                substituter.apply(
                    &literals.normalize(segment.text),
                    &mut template,
                    &mut substitutions,
                );
            }
        }
        debug!(
            "Canonicalized {} segments: {} tables, {} aliases, {} substitutions",
            segments.len(),
            resolution.tables.len(),
            resolution.table_aliases.len(),
            substitutions.len()
        );

        Canonical {
            template,
            resolution,
            substitutions,
        }
    }
}

/// Generic-mode template of `sql`, with schema typing when `schema` is given.
pub fn canonicalize(sql: &str, schema: Option<&Database>) -> String {
    Canonicalizer::new(Policy::GENERIC)
        .with_schema(schema)
        .canonicalize(sql)
        .template
}

/// Typed-mode template of `sql`; `db_id` picks the boolean columns from `catalog`.
pub fn canonicalize_typed(sql: &str, db_id: &str, catalog: &Catalog) -> String {
    let schema = catalog.get(db_id);
    if schema.is_none() && !db_id.is_empty() {
        debug!("Database `{db_id}` not in catalog; no boolean columns known");
    }
    Canonicalizer::new(Policy::TYPED)
        .with_schema(schema)
        .canonicalize(sql)
        .template
}
