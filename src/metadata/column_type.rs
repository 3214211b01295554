use super::*;

/// Semantic type tag of a schema column. Rendered as the lowercase tag that also
/// appears in canonical templates (`num`, `string`, ...).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[display("num")]
    Num,
    #[display("string")]
    String,
    #[display("date")]
    Date,
    #[display("boolean")]
    Boolean,
    #[display("binary")]
    Binary,
}

impl ColumnType {
    pub const ALL: [Self; 5] = [
        ColumnType::Num,
        ColumnType::String,
        ColumnType::Date,
        ColumnType::Boolean,
        ColumnType::Binary,
    ];

    /// The tag written into templates for a column of this type.
    pub const fn tag(self) -> &'static str {
        match self {
            ColumnType::Num => "num",
            ColumnType::String => "string",
            ColumnType::Date => "date",
            ColumnType::Boolean => "boolean",
            ColumnType::Binary => "binary",
        }
    }
}

impl FromStr for ColumnType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "num" => Ok(ColumnType::Num),
            "string" => Ok(ColumnType::String),
            "date" => Ok(ColumnType::Date),
            "boolean" | "bool" => Ok(ColumnType::Boolean),
            "binary" => Ok(ColumnType::Binary),
            _ => Err(Error::UnknownColumnType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("num", ColumnType::Num)]
    #[case(" String ", ColumnType::String)]
    #[case("DATE", ColumnType::Date)]
    #[case("bool", ColumnType::Boolean)]
    #[case("boolean", ColumnType::Boolean)]
    #[case("binary", ColumnType::Binary)]
    fn parses_tags(#[case] raw: &str, #[case] expected: ColumnType) {
        assert_eq!(raw.parse::<ColumnType>().unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_tag() {
        let err = "varchar".parse::<ColumnType>().unwrap_err();
        assert!(matches!(err, Error::UnknownColumnType(ref s) if s == "varchar"));
    }

    #[test]
    fn display_matches_tag() {
        for ty in ColumnType::ALL {
            assert_eq!(ty.to_string(), ty.tag());
        }
    }
}
