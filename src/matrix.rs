//! Matrix builder — turns a flat triple set into a per-predicate adjacency
//! matrix over a locally renumbered vertex set, the shape `outputMatrix()`
//! produces in `hdt_document_memory.cpp`.
//!
//! The matrix is a pure id-space structure: [`HopMatrix::vertices`] holds
//! continuous ids and [`PredicateEdges::predicate`] holds native predicate
//! ids, never resolved strings. A caller wanting labels resolves them
//! afterward through [`Store::string_of`]; that's a display concern, not
//! part of what this module hands back.

use crate::ids::{ContinuousId, DictCounts, NativeId, Role};
use crate::store::{Store, TripleId};
use std::collections::{HashMap, HashSet};

/// One predicate's edges, as pairs of local vertex indices into
/// [`HopMatrix::vertices`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateEdges {
    pub predicate: NativeId,
    pub edges: Vec<(usize, usize)>,
}

/// The renumbered adjacency matrix produced by [`build`]. `vertices[i]` is
/// the continuous id assigned local index `i`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HopMatrix {
    pub vertices: Vec<ContinuousId>,
    pub predicates: Vec<PredicateEdges>,
}

/// Builds a [`HopMatrix`] from a hop-engine result. Triples are sorted by
/// `(predicate, subject, object)` before the per-predicate edge lists are
/// flushed, so each predicate's edges appear once, in subject/object order.
/// Objects are shifted into continuous space (subjects never are) before
/// vertex renumbering so a shared term used as both a subject and an object
/// in the same result collapses to one local vertex.
pub fn build(store: &dyn Store, triples: &HashSet<TripleId>, continuous_mode: bool) -> HopMatrix {
    let counts = store.dict_counts();
    let mut sorted: Vec<TripleId> = triples.iter().copied().collect();
    sorted.sort_by_key(|t| (t.p, t.s, t.o));

    let mut vertex_ids: HashMap<ContinuousId, usize> = HashMap::new();
    let mut vertices: Vec<ContinuousId> = Vec::new();
    let mut predicates: Vec<PredicateEdges> = Vec::new();

    let mut local = |counts: &DictCounts, id: NativeId, role: Role| -> usize {
        let continuous = match role {
            Role::Object if continuous_mode => counts.object_native_to_continuous(id),
            _ => ContinuousId(id.0),
        };
        *vertex_ids.entry(continuous).or_insert_with(|| {
            vertices.push(continuous);
            vertices.len() - 1
        })
    };

    let mut current_predicate: Option<NativeId> = None;
    for t in &sorted {
        if current_predicate != Some(t.p) {
            predicates.push(PredicateEdges { predicate: t.p, edges: Vec::new() });
            current_predicate = Some(t.p);
        }
        let s_local = local(&counts, t.s, Role::Subject);
        let o_local = local(&counts, t.o, Role::Object);
        predicates.last_mut().expect("pushed above on predicate change").edges.push((s_local, o_local));
    }

    HopMatrix { vertices, predicates }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hop::{compute_hops, HopConfig};
    use crate::store::MemStore;

    #[test]
    fn groups_edges_by_predicate_in_sorted_order() {
        let store = MemStore::new(vec![
            ("s".into(), "knows".into(), "o1".into()),
            ("s".into(), "likes".into(), "o2".into()),
        ]);
        let mut it = store.search(TripleId::new(NativeId::UNBOUND, NativeId::UNBOUND, NativeId::UNBOUND));
        let mut triples = HashSet::new();
        while let Some(t) = it.next() {
            triples.insert(t);
        }
        let matrix = build(&store, &triples, true);
        assert_eq!(matrix.predicates.len(), 2);
        assert_eq!(matrix.predicates[0].predicate, store.id_of("knows", Role::Predicate));
        assert_eq!(matrix.predicates[1].predicate, store.id_of("likes", Role::Predicate));
    }

    #[test]
    fn shared_vertex_collapses_to_one_local_id() {
        // "mid" is both a subject and an object; it must get one local id.
        let store = MemStore::new(vec![("a".into(), "p".into(), "mid".into()), ("mid".into(), "p".into(), "end".into())]);
        let config = HopConfig { num_hops: 2, ..HopConfig::default() };
        let seed = store.id_of("a", Role::Subject).0;
        let out = compute_hops(&store, &config, &[seed], 0, 0);
        let matrix = build(&store, &out, true);
        assert_eq!(matrix.vertices.len(), 3);
    }

    #[test]
    fn vertices_are_the_continuous_id_multiset_of_the_result() {
        let store = MemStore::new(vec![("subj-only".into(), "p".into(), "obj-only".into())]);
        let seed = store.id_of("subj-only", Role::Subject).0;
        let out = compute_hops(&store, &HopConfig { num_hops: 1, ..HopConfig::default() }, &[seed], 0, 0);
        let matrix = build(&store, &out, true);
        let counts = store.dict_counts();
        let t = *out.iter().next().unwrap();
        let expected: HashSet<ContinuousId> =
            [counts.subject_native_to_continuous(t.s), counts.object_native_to_continuous(t.o)].into_iter().collect();
        let got: HashSet<ContinuousId> = matrix.vertices.into_iter().collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn empty_input_yields_empty_matrix() {
        let store = MemStore::new(Vec::<(String, String, String)>::new());
        let matrix = build(&store, &HashSet::new(), true);
        assert!(matrix.vertices.is_empty());
        assert!(matrix.predicates.is_empty());
    }
}
