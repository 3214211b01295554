//! Template analytics on canonicalized corpora: frequency ranking, slot
//! typing and schema-driven re-expansion.

crate::reexport!(frequency);
crate::reexport!(slots);
crate::reexport!(combinations);

use crate::*;
use regex::Regex;
use std::{
    collections::{BTreeSet, HashMap},
    sync::LazyLock,
};
