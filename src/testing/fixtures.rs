use crate::testing::*;
use crate::*;
use rand::{Rng, seq::IndexedRandom};

fn table(name: &str, columns: &[(&str, ColumnType)]) -> Table {
    Table::new_with_ordered(name, columns.iter().copied())
}

/// A small movie-rating schema with one boolean column per fact table.
#[fixture]
pub fn movie_platform() -> Database {
    common_init();
    let mut db = Database::new("movie_platform");
    db.insert_table(table(
        "movies",
        &[
            ("movie_id", ColumnType::Num),
            ("movie_title", ColumnType::String),
            ("movie_release_year", ColumnType::Num),
            ("director_name", ColumnType::String),
        ],
    ));
    db.insert_table(table(
        "ratings",
        &[
            ("movie_id", ColumnType::Num),
            ("rating_score", ColumnType::Num),
            ("rating_timestamp_utc", ColumnType::Date),
            ("critic", ColumnType::String),
            ("user_trialist", ColumnType::Boolean),
        ],
    ));
    db.insert_table(table(
        "lists",
        &[
            ("list_id", ColumnType::Num),
            ("list_title", ColumnType::String),
            ("list_followers", ColumnType::Num),
            ("list_public", ColumnType::Boolean),
        ],
    ));
    db
}

#[fixture]
pub fn shop() -> Database {
    let mut db = Database::new("shop");
    db.insert_table(table(
        "customers",
        &[("id", ColumnType::Num), ("name", ColumnType::String)],
    ));
    db.insert_table(table(
        "orders",
        &[
            ("id", ColumnType::Num),
            ("customer_id", ColumnType::Num),
            ("placed", ColumnType::Date),
            ("paid", ColumnType::Boolean),
        ],
    ));
    db
}

#[fixture]
pub fn sample_catalog(movie_platform: Database, shop: Database) -> Catalog {
    let mut catalog = Catalog::new();
    catalog.insert_database(movie_platform);
    catalog.insert_database(shop);
    catalog
}

const SELECT_LISTS: &[&str] = &[
    "*",
    "T1.movie_title",
    "COUNT(*) AS cnt",
    "AVG(T2.rating_score)",
    "movie_title, director_name",
    "T1.movie_title AS title",
];
const FROM_CLAUSES: &[&str] = &[
    "movies",
    "movies AS T1",
    "movies AS T1 INNER JOIN ratings AS T2 ON T1.movie_id = T2.movie_id",
    "ratings T2",
    "(SELECT movie_id FROM ratings) AS sub",
];
const PREDICATES: &[&str] = &[
    "",
    " WHERE T2.rating_score > 4.5",
    " WHERE T1.movie_title = 'Pulp Fiction'",
    " WHERE T2.user_trialist = 1",
    " WHERE T2.rating_timestamp_utc < DATE '2020-01-01'",
    " WHERE director_name LIKE '%Nolan%' AND movie_release_year BETWEEN 1990 AND 2000",
];
const TAILS: &[&str] = &[
    "",
    " ORDER BY cnt DESC LIMIT 5",
    " GROUP BY T1.movie_title",
    ";",
];
const COMMENTS: &[&str] = &[
    "-- top movies\n",
    "/* T1.movie_title = 'x' */",
    "-- it's fine\n",
    "/* unterminated",
];

fn pick(rng: &mut impl Rng, options: &[&'static str]) -> &'static str {
    options.choose(rng).copied().unwrap_or_default()
}

/// A random, loosely valid query over [`movie_platform`].
pub fn random_query(rng: &mut impl Rng) -> String {
    format!(
        "SELECT {} FROM {}{}{}",
        pick(rng, SELECT_LISTS),
        pick(rng, FROM_CLAUSES),
        pick(rng, PREDICATES),
        pick(rng, TAILS)
    )
}

/// `sql` with comments spliced in before random words outside string literals
/// and, sometimes, one more at the very end.
pub fn sprinkle_comments(sql: &str, rng: &mut impl Rng) -> String {
    let mut out = String::with_capacity(sql.len() * 2);
    let mut quoted = false;
    for (i, word) in sql.split(' ').enumerate() {
        if i > 0 {
            out.push(' ');
        }
        if !quoted && !word.starts_with('\'') && rng.random_bool(0.2) {
            out.push_str(pick(rng, &COMMENTS[..3]));
        }
        out.push_str(word);
        quoted ^= word.matches('\'').count() % 2 == 1;
    }
    if !quoted && rng.random_bool(0.3) {
        out.push_str(pick(rng, COMMENTS));
    }
    out
}
