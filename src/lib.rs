//! SQL canonicalization: rewrite queries into structural templates where
//! literals become type tags and identifiers become positional placeholders,
//! so structurally identical queries compare equal.
//!
//! ```rust
//! use canonsql::canonicalize;
//!
//! assert_eq!(
//!     canonicalize("SELECT T1.name FROM users AS T1 WHERE T1.age > 30", None),
//!     "SELECT table_alias_placeholder0.col_name FROM table_name AS table_alias_placeholder0 \
//!      WHERE table_alias_placeholder0.col_name > NUM"
//! );
//! ```

#[macro_export]
macro_rules! reexport {
    ($module:ident) => {
        $crate::reexport!($module, false);
    };
    ($module:ident, test) => {
        $crate::reexport!($module, true);
    };
    ($module:ident, $is_test:literal) => {
        #[cfg_attr($is_test, cfg(test))]
        mod $module;
        #[cfg_attr($is_test, cfg(test))]
        #[allow(unused_imports)]
        #[allow(ambiguous_glob_reexports)]
        pub use $module::*;
    };
}

pub mod sql;

reexport!(testing, test);
reexport!(error);
reexport!(config);
reexport!(metadata);
reexport!(canon);
reexport!(template);
reexport!(batch);

#[allow(unused_imports)]
pub(crate) use tracing::{debug, error, info, trace, warn};
