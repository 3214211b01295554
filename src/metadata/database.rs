use super::*;
use itertools::Itertools as _;

/// Column-type schema of one database: `(table, column) → ColumnType`.
///
/// Keys are case-sensitive, exactly as they appear in the SQL being
/// canonicalized. Besides the tables themselves, a per-column-name index of
/// every type the name carries is kept so the "unique bare column" lookup is O(1).
#[derive(Debug, Default, Clone)]
pub struct Database {
    pub name: String,
    pub tables: HashMap<String, Table>,
    column_types: HashMap<String, BTreeSet<ColumnType>>,
}

impl Database {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add (or create) the table and insert the column.
    pub fn insert_column(&mut self, table_name: impl Into<String>, column: Column) {
        let table_name = table_name.into();
        let table = self
            .tables
            .entry(table_name.clone())
            .or_insert_with(|| Table::new(table_name)); // Create/return table
        let retyped = table
            .column_type(&column.name)
            .is_some_and(|old| old != column.column_type);
        self.column_types
            .entry(column.name.clone())
            .or_default()
            .insert(column.column_type);
        table.insert_column(column); // Insert / overwrite column
        // An overwrite may have dropped the last column carrying the old type.
        if retyped {
            self.rebuild_index();
        }
    }

    /// Insert (or overwrite) a whole table.
    pub fn insert_table(&mut self, table: Table) {
        self.tables.insert(table.name.clone(), table);
        self.rebuild_index();
    }

    fn rebuild_index(&mut self) {
        self.column_types.clear();
        for column in self.tables.values().flat_map(|t| t.columns.values()) {
            self.column_types
                .entry(column.name.clone())
                .or_default()
                .insert(column.column_type);
        }
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Type of `table.column`, if the schema knows the pair.
    pub fn column_type(&self, table: &str, column: &str) -> Option<ColumnType> {
        self.tables.get(table)?.column_type(column)
    }

    /// The type of a bare column name when every table using that name agrees on
    /// it. Ambiguous (or unknown) names yield `None`.
    pub fn unique_column_type(&self, column: &str) -> Option<ColumnType> {
        self.column_types
            .get(column)
            .filter(|types| types.len() == 1)
            .and_then(|types| types.first().copied())
    }

    /// Table names in sorted order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).sorted().collect()
    }

    /// Every `(table, column)` pair, tables sorted, columns in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.tables
            .values()
            .sorted_by(|a, b| a.name.cmp(&b.name))
            .flat_map(|t| t.ordered_columns().map(move |c| (t.name.as_str(), c)))
    }

    pub fn column_count(&self) -> usize {
        self.tables.values().map(Table::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.column_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn database() -> Database {
        let mut db = Database::new("shop");
        db.insert_table(Table::new_with_ordered(
            "t1",
            [("code", ColumnType::String), ("id", ColumnType::Num)],
        ));
        db.insert_table(Table::new_with_ordered(
            "t2",
            [("code", ColumnType::Num), ("id", ColumnType::Num)],
        ));
        db
    }

    #[test]
    fn qualified_lookup() {
        let db = database();
        assert_eq!(db.column_type("t1", "code"), Some(ColumnType::String));
        assert_eq!(db.column_type("t2", "code"), Some(ColumnType::Num));
        assert_eq!(db.column_type("t3", "code"), None);
        assert_eq!(db.column_type("t1", "missing"), None);
    }

    #[test]
    fn unique_type_requires_agreement() {
        let db = database();
        assert_eq!(db.unique_column_type("id"), Some(ColumnType::Num));
        assert_eq!(db.unique_column_type("code"), None);
        assert_eq!(db.unique_column_type("missing"), None);
    }

    #[test]
    fn overwriting_a_column_refreshes_the_index() {
        let mut db = database();
        db.insert_column("t1", Column::new("code", ColumnType::Num));
        assert_eq!(db.unique_column_type("code"), Some(ColumnType::Num));
    }

    #[test]
    fn insert_column_creates_table() {
        let mut db = Database::new("x");
        assert!(db.is_empty());
        db.insert_column("users", Column::new("is_active", ColumnType::Boolean));
        assert!(db.contains_table("users"));
        assert_eq!(db.column_count(), 1);
        assert_eq!(db.table_names(), vec!["users"]);
    }

    #[test]
    fn columns_are_sorted_by_table() {
        let db = database();
        let pairs: Vec<_> = db
            .columns()
            .map(|(t, c)| format!("{t}.{}", c.name))
            .collect();
        assert_eq!(pairs, vec!["t1.code", "t1.id", "t2.code", "t2.id"]);
    }
}
