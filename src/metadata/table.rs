use super::*;

#[derive(Debug, Default, Clone)]
pub struct Table {
    pub name: String,
    pub columns: HashMap<String, Column>,
    // Preserve insertion order of columns as provided at construction time.
    pub column_order: Vec<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Construct a table with an explicit ordered list of (name, ColumnType) pairs.
    /// This preserves the ordering exactly as provided.
    pub fn new_with_ordered(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = (impl Into<String>, ColumnType)>,
    ) -> Self {
        let mut table = Self::new(name);
        for (column_name, column_type) in columns {
            table.insert_column(Column::new(column_name, column_type));
        }
        table
    }

    /// Insert (or overwrite) a column. Overwriting keeps the original position.
    pub fn insert_column(&mut self, column: Column) {
        if !self.columns.contains_key(&column.name) {
            self.column_order.push(column.name.clone());
        }
        self.columns.insert(column.name.clone(), column);
    }

    pub fn column_type(&self, column: &str) -> Option<ColumnType> {
        self.columns.get(column).map(|c| c.column_type)
    }

    /// Columns in preserved insertion order.
    pub fn ordered_columns(&self) -> impl Iterator<Item = &Column> {
        self.column_order
            .iter()
            .filter_map(|name| self.columns.get(name))
    }

    /// Names of the columns whose type is in `allowed`, in insertion order.
    pub fn columns_of_type<'a>(
        &'a self,
        allowed: &'a BTreeSet<ColumnType>,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.ordered_columns()
            .filter(|c| allowed.contains(&c.column_type))
            .map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
