use super::*;
use std::{fs::File, io::Read, path::Path};

/// One schema row: the type of `table_name.column_name` in `database`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SchemaRow {
    pub database: String,
    pub table_name: String,
    pub column_name: String,
    pub column_type: String,
}

impl Catalog {
    /// Build a catalog from schema rows.
    ///
    /// Values are trimmed; rows with an empty field are skipped. An unknown
    /// column type aborts the load, as does a schema without a single column.
    pub fn from_rows(rows: impl IntoIterator<Item = SchemaRow>) -> Result<Self> {
        let mut catalog = Catalog::new();
        for row in rows {
            let (database, table, column, column_type) = (
                row.database.trim(),
                row.table_name.trim(),
                row.column_name.trim(),
                row.column_type.trim(),
            );
            if database.is_empty() || table.is_empty() || column.is_empty() || column_type.is_empty() {
                warn!("Skipping incomplete schema row {row:?}");
                continue;
            }
            let column_type = column_type.parse::<ColumnType>()?;
            catalog.insert_column(database, table, Column::new(column, column_type));
        }

        if catalog.column_count() == 0 {
            return Err(Error::Schema("schema contains no columns".to_string()));
        }
        debug!(
            "Loaded {} columns across {} databases",
            catalog.column_count(),
            catalog.len()
        );
        Ok(catalog)
    }

    /// Read schema rows given either as a JSON array or as JSON lines.
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;
        let rows = if raw.trim_start().starts_with('[') {
            serde_json::from_str::<Vec<SchemaRow>>(&raw)?
        } else {
            serde_json::Deserializer::from_str(&raw)
                .into_iter::<SchemaRow>()
                .collect::<std::result::Result<Vec<_>, _>>()?
        };
        Self::from_rows(rows)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading schema from {}", path.display());
        Self::from_reader(File::open(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_json_lines() {
        let raw = r#"
{"database": "movie_platform", "table_name": "movies", "column_name": "movie_title", "column_type": "string"}
{"database": "movie_platform", "table_name": "ratings", "column_name": "critic_likes", "column_type": "num"}
{"database": "movie_platform", "table_name": "ratings", "column_name": "user_trialist", "column_type": "bool"}
"#;
        let catalog = Catalog::from_reader(raw.as_bytes()).expect("valid schema");
        let db = catalog.get("movie_platform").expect("database");
        assert_eq!(db.column_type("movies", "movie_title"), Some(ColumnType::String));
        assert_eq!(
            db.column_type("ratings", "user_trialist"),
            Some(ColumnType::Boolean)
        );
    }

    #[test]
    fn loads_json_array_and_trims() {
        let raw = r#"[{"database": " db ", "table_name": " t ", "column_name": " c ", "column_type": " DATE "}]"#;
        let catalog = Catalog::from_reader(raw.as_bytes()).expect("valid schema");
        assert_eq!(
            catalog.get("db").and_then(|db| db.column_type("t", "c")),
            Some(ColumnType::Date)
        );
    }

    #[test]
    fn skips_incomplete_rows() {
        let rows = vec![
            SchemaRow {
                database: "db".into(),
                table_name: "".into(),
                column_name: "c".into(),
                column_type: "num".into(),
            },
            SchemaRow {
                database: "db".into(),
                table_name: "t".into(),
                column_name: "c".into(),
                column_type: "num".into(),
            },
        ];
        let catalog = Catalog::from_rows(rows).expect("one usable row");
        assert_eq!(catalog.column_count(), 1);
    }

    #[test]
    fn empty_schema_is_an_error() {
        let err = Catalog::from_reader("".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }

    #[test]
    fn unknown_type_is_an_error() {
        let raw = r#"{"database": "db", "table_name": "t", "column_name": "c", "column_type": "blob"}"#;
        let err = Catalog::from_reader(raw.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::UnknownColumnType(ref t) if t == "blob"));
    }
}
