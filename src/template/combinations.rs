use super::*;
use itertools::Itertools as _;

/// One concrete instantiation of a template's slots.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Combination<'c> {
    pub db_id: &'c str,
    /// Table of each slot.
    pub tables: Vec<&'c str>,
    /// Column of each slot, drawn from the slot's table.
    pub columns: Vec<&'c str>,
}

/// Every way to fill `slots` from `catalog`.
///
/// Databases come in id order and tables in name order; a table may fill
/// several slots. Column `i` belongs to table `i` and has one of slot `i`'s
/// allowed types. The product is produced lazily; it grows with
/// `tables^slots`, so callers usually `take` what they need.
pub fn combinations<'c>(
    slots: &'c TemplateSlots,
    catalog: &'c Catalog,
) -> impl Iterator<Item = Combination<'c>> + 'c {
    catalog
        .database_ids()
        .into_iter()
        .filter_map(move |db_id| catalog.get(db_id).map(|db| (db_id, db)))
        .flat_map(move |(db_id, db)| {
            let tables = db.table_names();
            slots
                .column_types
                .iter()
                .map(move |_| tables.clone())
                .multi_cartesian_product()
                .flat_map(move |chosen| {
                    let columns = chosen
                        .iter()
                        .zip(&slots.column_types)
                        .map(|(table, allowed)| {
                            db.table(table)
                                .map(|t| t.columns_of_type(allowed).collect_vec())
                                .unwrap_or_default()
                        })
                        .collect_vec();
                    columns
                        .into_iter()
                        .multi_cartesian_product()
                        .map(move |columns| Combination {
                            db_id,
                            tables: chosen.clone(),
                            columns,
                        })
                })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        for (db, table, column, column_type) in [
            ("b_db", "t", "x", ColumnType::Num),
            ("a_db", "u", "name", ColumnType::String),
            ("a_db", "u", "age", ColumnType::Num),
            ("a_db", "v", "score", ColumnType::Num),
            ("a_db", "v", "blob", ColumnType::Binary),
        ] {
            catalog.insert_column(db, table, Column::new(column, column_type));
        }
        catalog
    }

    #[test]
    fn single_slot_walks_every_column() {
        let catalog = catalog();
        let slots = TemplateSlots::parse("SELECT col_name FROM table_name");
        let found = combinations(&slots, &catalog)
            .map(|c| (c.db_id, c.tables[0], c.columns[0]))
            .collect_vec();
        assert_eq!(
            found,
            vec![
                ("a_db", "u", "name"),
                ("a_db", "u", "age"),
                ("a_db", "v", "score"),
                ("b_db", "t", "x"),
            ]
        );
    }

    #[test]
    fn slot_types_filter_columns() {
        let catalog = catalog();
        let slots = TemplateSlots::parse(
            "SELECT AVG(table_alias0.col_name) FROM table_name AS table_alias0 \
             JOIN table_name AS table_alias1 ON table_alias1.col_name = string",
        );
        let found = combinations(&slots, &catalog).collect_vec();
        assert!(found.iter().all(|c| c.tables.len() == 2 && c.columns.len() == 2));
        let a_db = found.iter().filter(|c| c.db_id == "a_db").collect_vec();
        assert_eq!(
            a_db.iter()
                .map(|c| (c.tables.clone(), c.columns.clone()))
                .collect_vec(),
            vec![
                (vec!["u", "u"], vec!["age", "name"]),
                (vec!["v", "u"], vec!["score", "name"]),
            ]
        );
        // b_db has no string column for the second slot.
        assert!(found.iter().all(|c| c.db_id != "b_db"));
    }

    #[test]
    fn is_lazy() {
        let mut catalog = Catalog::new();
        for t in 0..50 {
            for c in 0..20 {
                catalog.insert_column("big", format!("t{t}"), Column::new(format!("c{c}"), ColumnType::Num));
            }
        }
        let slots = TemplateSlots::parse(
            "SELECT * FROM table_name AS table_alias0, table_name AS table_alias1, table_name AS table_alias2",
        );
        assert_eq!(combinations(&slots, &catalog).take(3).count(), 3);
    }
}
