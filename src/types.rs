//! Type filter: groups seeds by their `rdf:type` edges.

use crate::ids::{ContinuousId, DictCounts, NativeId, RawId, Role};
use crate::store::{Store, TripleId};
use std::collections::HashMap;

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// Groups `seeds` by which of `classes` they have an `rdf:type` edge to.
/// Output order matches `classes`' input order. Seed ids are always subject
/// ids, which are identical in native and continuous space, so only
/// `classes` needs translating when `continuous_mode` is set.
pub fn filter_types(store: &dyn Store, seeds: &[RawId], classes: &[RawId], continuous_mode: bool) -> Vec<Vec<RawId>> {
    let counts = store.dict_counts();
    let native_classes = translate_classes(&counts, classes, continuous_mode);

    let mut class_to_seeds: HashMap<RawId, Vec<RawId>> = HashMap::new();
    for &class in &native_classes {
        class_to_seeds.entry(class).or_default();
    }

    let type_pred = store.id_of(RDF_TYPE, Role::Predicate);
    if !type_pred.is_unbound() {
        for &seed in seeds {
            let pattern = TripleId::new(NativeId(seed), type_pred, NativeId::UNBOUND);
            let mut it = store.search(pattern);
            while let Some(t) = it.next() {
                if let Some(list) = class_to_seeds.get_mut(&t.o.0) {
                    list.push(seed);
                }
            }
        }
    }

    native_classes.into_iter().map(|c| class_to_seeds.remove(&c).unwrap_or_default()).collect()
}

/// A class id translated to `0` (out of range) is silently ignored: it
/// simply never matches a real `rdf:type` object, so its output list is
/// empty rather than the whole call being aborted.
fn translate_classes(counts: &DictCounts, classes: &[RawId], continuous_mode: bool) -> Vec<RawId> {
    classes
        .iter()
        .map(|&c| if continuous_mode { counts.object_continuous_to_native(ContinuousId(c)).0 } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemStore;

    #[test]
    fn groups_seeds_by_class_in_requested_order() {
        let store = MemStore::new(vec![("e3".into(), RDF_TYPE.into(), "c9".into()), ("e4".into(), RDF_TYPE.into(), "c10".into())]);
        let e3 = store.id_of("e3", Role::Subject).0;
        let e4 = store.id_of("e4", Role::Subject).0;
        let c9 = store.id_of("c9", Role::Object).0;
        let c10 = store.id_of("c10", Role::Object).0;

        let result = filter_types(&store, &[e3, e4], &[c9, c10], false);
        assert_eq!(result, vec![vec![e3], vec![e4]]);
    }

    #[test]
    fn unmatched_class_yields_empty_list() {
        let store = MemStore::new(vec![("e1".into(), RDF_TYPE.into(), "c1".into())]);
        let e1 = store.id_of("e1", Role::Subject).0;
        let result = filter_types(&store, &[e1], &[999_999], false);
        assert_eq!(result, vec![Vec::<RawId>::new()]);
    }
}
