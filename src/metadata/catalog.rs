use super::*;
use itertools::Itertools as _;

/// Every known database schema, keyed by database id.
///
/// Built once before canonicalization starts and read-only afterwards; share it
/// by reference across worker threads.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    pub databases: HashMap<String, Database>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or create) database/table and insert the column.
    pub fn insert_column(
        &mut self,
        database: impl Into<String>,
        table: impl Into<String>,
        column: Column,
    ) {
        let database = database.into();
        self.databases
            .entry(database.clone())
            .or_insert_with(|| Database::new(database))
            .insert_column(table, column);
    }

    /// Insert (or overwrite) a database.
    pub fn insert_database(&mut self, database: Database) {
        self.databases.insert(database.name.clone(), database);
    }

    pub fn get(&self, database: &str) -> Option<&Database> {
        self.databases.get(database)
    }

    /// Database ids in sorted order.
    pub fn database_ids(&self) -> Vec<&str> {
        self.databases.keys().map(String::as_str).sorted().collect()
    }

    pub fn len(&self) -> usize {
        self.databases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.databases.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.databases.values().map(Database::column_count).sum()
    }
}
