//! JSON-lines batch canonicalization.

use crate::*;
use serde_json::{Map, Value};
use std::io::{BufRead, Write};

/// Names of the record fields read and written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFields {
    pub sql: String,
    pub sql_fallback: String,
    pub db: String,
    pub output: String,
}

impl Default for RecordFields {
    fn default() -> Self {
        Self {
            sql: "SQL".to_string(),
            sql_fallback: "sql".to_string(),
            db: "db_id".to_string(),
            output: "canonical_sql".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub records: usize,
    /// Records with neither SQL field; they get an empty template.
    pub missing_sql: usize,
    /// Records whose database is not in the catalog.
    pub missing_schema: usize,
}

/// Adds a canonical template to every record of a JSON-lines stream.
///
/// Records are independent; the catalog is only read.
#[derive(Debug, Clone)]
pub struct BatchProcessor<'c> {
    policy: Policy,
    catalog: Option<&'c Catalog>,
    fields: RecordFields,
}

impl<'c> BatchProcessor<'c> {
    pub fn new(policy: Policy, fields: RecordFields) -> Self {
        Self {
            policy,
            catalog: None,
            fields,
        }
    }

    pub fn with_catalog(self, catalog: Option<&'c Catalog>) -> Self {
        Self { catalog, ..self }
    }

    /// Write the template of the record's SQL into its output field.
    pub fn canonicalize_record(&self, record: &mut Map<String, Value>, stats: &mut BatchStats) {
        stats.records += 1;
        let sql = [&self.fields.sql, &self.fields.sql_fallback]
            .into_iter()
            .find_map(|field| record.get(field.as_str()).and_then(Value::as_str))
            .unwrap_or_else(|| {
                stats.missing_sql += 1;
                warn!("Record {} has no SQL field", stats.records);
                ""
            });
        let db_id = record
            .get(&self.fields.db)
            .and_then(Value::as_str)
            .unwrap_or_default();
        let schema = self.catalog.and_then(|catalog| catalog.get(db_id));
        if self.catalog.is_some() && schema.is_none() {
            stats.missing_schema += 1;
            debug!("Database `{db_id}` not in catalog");
        }

        let template = Canonicalizer::new(self.policy)
            .with_schema(schema)
            .canonicalize(sql)
            .template;
        record.insert(self.fields.output.clone(), Value::String(template));
    }

    /// Canonicalize every record of `reader`, writing one JSON object per
    /// line to `writer`. Blank lines are skipped; a line that is not a JSON
    /// object aborts the run.
    pub fn run(&self, reader: impl BufRead, mut writer: impl Write) -> Result<BatchStats> {
        let mut stats = BatchStats::default();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let mut record: Map<String, Value> = serde_json::from_str(&line)?;
            self.canonicalize_record(&mut record, &mut stats);
            serde_json::to_writer(&mut writer, &record)?;
            writeln!(writer)?;
        }
        writer.flush()?;
        info!(
            "Canonicalized {} records ({} without SQL, {} without schema)",
            stats.records, stats.missing_sql, stats.missing_schema
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    fn output(bytes: &[u8]) -> Vec<Value> {
        std::str::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[rstest]
    fn typed_batch(sample_catalog: Catalog) {
        let input = r#"{"db_id": "movie_platform", "SQL": "SELECT movie_title FROM movies WHERE movie_release_year = 1945"}

{"db_id": "shop", "sql": "SELECT * FROM orders WHERE paid = 1"}
{"db_id": "nowhere", "question": "no sql here"}
"#;
        let processor = BatchProcessor::new(Policy::TYPED, RecordFields::default())
            .with_catalog(Some(&sample_catalog));
        let mut out = Vec::new();
        let stats = processor.run(input.as_bytes(), &mut out).unwrap();

        assert_eq!(
            stats,
            BatchStats {
                records: 3,
                missing_sql: 1,
                missing_schema: 1
            }
        );
        let records = output(&out);
        assert_eq!(
            records[0]["canonical_sql"],
            "SELECT col_name FROM table_name WHERE col_name = num"
        );
        assert_eq!(
            records[1]["canonical_sql"],
            "SELECT * FROM table_name WHERE col_name = boolean"
        );
        assert_eq!(records[2]["canonical_sql"], "");
        assert_eq!(records[2]["question"], "no sql here");
    }

    #[test]
    fn custom_fields_without_catalog() {
        let fields = RecordFields {
            sql: "query".to_string(),
            output: "template".to_string(),
            ..Default::default()
        };
        let processor = BatchProcessor::new(Policy::GENERIC, fields);
        let mut out = Vec::new();
        let stats = processor
            .run(r#"{"query": "SELECT a FROM t WHERE b = 'x'"}"#.as_bytes(), &mut out)
            .unwrap();
        assert_eq!(stats.missing_schema, 0);
        assert_eq!(
            output(&out)[0]["template"],
            "SELECT col_name FROM table_name WHERE col_name = STR"
        );
    }

    #[test]
    fn non_object_line_is_an_error() {
        let processor = BatchProcessor::new(Policy::GENERIC, RecordFields::default());
        let err = processor.run("[1, 2]".as_bytes(), Vec::new()).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
