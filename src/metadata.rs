crate::reexport!(column_type);
crate::reexport!(column);
crate::reexport!(table);
crate::reexport!(database);
crate::reexport!(catalog);
crate::reexport!(loader);

use crate::*;
use std::{
    collections::{BTreeSet, HashMap},
    str::FromStr,
};
