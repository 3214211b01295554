use super::*;

/// The two canonicalization presets.
///
/// - `Generic`: upper-case literal tags (`NUM`, `STR`, `DATE`), verbose alias
///   families, schema types substituted for columns when a schema is supplied.
/// - `Typed`: lower-case tags (`num`, `string`, `date`), short alias families,
///   and literals compared against schema-known boolean columns become `boolean`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display, clap::ValueEnum,
)]
pub enum Mode {
    #[display("generic")]
    Generic,
    #[default]
    #[display("typed")]
    Typed,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic" => Ok(Mode::Generic),
            "typed" => Ok(Mode::Typed),
            other => Err(Error::InvalidMode(other.to_string())),
        }
    }
}

/// Substitution policy of one engine run.
///
/// Both presets share the segmenter, resolver and substitution pass; only these
/// switches differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    pub vocabulary: Vocabulary,
    /// Rewrite column references to their schema type tag when unambiguous.
    pub schema_typing: bool,
    /// Tag literals compared against boolean columns as `boolean`.
    pub boolean_literals: bool,
    /// Resolve identifiers on the raw code rather than the literal-normalized code.
    pub resolve_raw: bool,
}

impl Policy {
    pub const GENERIC: Self = Self {
        vocabulary: Vocabulary::GENERIC,
        schema_typing: true,
        boolean_literals: false,
        resolve_raw: false,
    };

    pub const TYPED: Self = Self {
        vocabulary: Vocabulary::TYPED,
        schema_typing: false,
        boolean_literals: true,
        resolve_raw: true,
    };
}

impl From<Mode> for Policy {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Generic => Policy::GENERIC,
            Mode::Typed => Policy::TYPED,
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Mode::default().into()
    }
}
