//! The canonicalization engine: SQL text in, placeholder template out.
//!
//! One pipeline serves both modes; a [`Policy`] decides the placeholder
//! spellings and whether schema typing and boolean detection run.
//!
//! - `segment`     : comment-preserving split of the input.
//! - `literal`     : literal → type tag rewriting, boolean comparisons.
//! - `resolve`     : table / alias / column classification.
//! - `substitute`  : identifier rewriting of one code span.
//! - `engine`      : drives the above and assembles the template.

crate::reexport!(placeholder);
crate::reexport!(policy);
crate::reexport!(segment);
crate::reexport!(literal);
crate::reexport!(resolve);
crate::reexport!(substitute);
crate::reexport!(engine);
crate::reexport!(engine_tests, test);

use crate::{sql::*, *};
use regex::Regex;
use std::{
    collections::{BTreeSet, HashMap, HashSet},
    str::FromStr,
    sync::LazyLock,
};
