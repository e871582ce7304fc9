//! Join evaluator.
//!
//! No algorithmic obligations of its own: parses each pattern's variables
//! and delegates to the store's join facility. How duplicate variable
//! occurrences across patterns are resolved is the store's contract, not
//! this crate's.

use crate::store::{Binding, Store};
use std::collections::BTreeSet;

/// Runs a multi-pattern join. Any pattern component starting with `?` is a
/// variable; the deduplicated variable set across all patterns is collected
/// before delegating to [`Store::join`].
pub fn search_join<'a>(store: &'a dyn Store, patterns: &[[String; 3]]) -> Box<dyn Iterator<Item = Binding> + 'a> {
    let mut variables = BTreeSet::new();
    for pattern in patterns {
        for component in pattern {
            if component.starts_with('?') {
                variables.insert(component.clone());
            }
        }
    }
    log::debug!("join over {} patterns, {} variables", patterns.len(), variables.len());
    store.join(patterns)
}
