//! Hop engine — bounded, symmetric neighborhood expansion from a seed set.
//!
//! Recursive traversal with predicate/prefix filtering, a triple-count
//! limit/offset tracked across the whole recursion, and term-level dedup so
//! no term is expanded twice in one call.

use crate::ids::{DictCounts, NativeId, RawId, Role};
use crate::prefix::PrefixConfig;
use crate::store::{Store, TripleId};
use std::collections::HashSet;

/// Immutable snapshot installed by `HdtDocument::configure_hops`: reconfiguring
/// builds a new snapshot and swaps it in wholesale rather than mutating a
/// live one's fields.
#[derive(Debug, Clone)]
pub struct HopConfig {
    pub num_hops: u32,
    pub pred_allow: HashSet<NativeId>,
    pub prefix_config: Option<PrefixConfig>,
    pub include_literals: bool,
    pub continuous_mode: bool,
}

impl Default for HopConfig {
    /// Matches the constructor defaults in `hdt_document_memory.cpp`:
    /// one hop, no predicate/prefix filter, continuous dictionary on.
    fn default() -> Self {
        HopConfig { num_hops: 1, pred_allow: HashSet::new(), prefix_config: None, include_literals: false, continuous_mode: true }
    }
}

/// Runs `compute_hops` with `limit` forced to `store.total_triples()` and
/// `offset = 0` — expanding across the whole store is the degenerate case of
/// a bounded hop call with an unreachably large limit.
pub fn compute_all_hops(store: &dyn Store, config: &HopConfig, seeds: &[RawId]) -> HashSet<TripleId> {
    compute_hops(store, config, seeds, store.total_triples(), 0)
}

/// `compute_hops(seeds, limit, offset)`. `limit == 0` is shorthand for
/// `store.total_triples()`. Seeds are read as continuous ids when
/// `config.continuous_mode` is set, native ids (ambiguous role) otherwise.
pub fn compute_hops(store: &dyn Store, config: &HopConfig, seeds: &[RawId], limit: usize, offset: usize) -> HashSet<TripleId> {
    let counts = store.dict_counts();
    let effective_limit = if limit == 0 { store.total_triples() } else { limit };
    let mut ctx = HopContext {
        store,
        config,
        counts,
        limit: effective_limit,
        offset,
        processed_terms: HashSet::new(),
        out: HashSet::new(),
        skipped: HashSet::new(),
        processed_triples: 0,
        read_triples: 0,
    };

    if config.num_hops >= 1 {
        for &seed in seeds {
            if config.continuous_mode {
                let (term, role) = if seed > counts.n_subjects_total {
                    (NativeId(seed - counts.delta()), Role::Object)
                } else {
                    (NativeId(seed), Role::Subject)
                };
                if !term.is_unbound() {
                    ctx.addhop(term, 1, role);
                }
            } else {
                // Without a continuous dictionary a non-shared id could be
                // either a subject-only or an object-only term, so both
                // roles are tried.
                let term = NativeId(seed);
                if !term.is_unbound() {
                    ctx.addhop(term, 1, Role::Subject);
                    ctx.addhop(term, 1, Role::Object);
                }
            }
        }
    }
    ctx.out
}

struct HopContext<'a> {
    store: &'a dyn Store,
    config: &'a HopConfig,
    counts: DictCounts,
    limit: usize,
    offset: usize,
    processed_terms: HashSet<NativeId>,
    out: HashSet<TripleId>,
    skipped: HashSet<TripleId>,
    processed_triples: usize,
    read_triples: usize,
}

impl HopContext<'_> {
    fn passes_predicate(&self, p: NativeId) -> bool {
        self.config.pred_allow.is_empty() || self.config.pred_allow.contains(&p)
    }

    fn passes_prefix_subject_branch(&self, o: NativeId) -> bool {
        match &self.config.prefix_config {
            None => true,
            Some(pc) => {
                (self.config.include_literals && o.0 < pc.literal_end_id) || pc.so_range.contains(o.0) || pc.obj_range.contains(o.0)
            }
        }
    }

    /// The object branch's prefix filter compares the *subject* against the
    /// ranges, but checks the lower bound against `o` and the upper bound
    /// against `s` — an asymmetry carried over verbatim from
    /// `hdt_document_memory.cpp` rather than corrected, since it changes
    /// which triples a configured prefix admits and "fixing" it would be a
    /// behavior change, not a faithful port.
    fn passes_prefix_object_branch(&self, s: NativeId, o: NativeId) -> bool {
        match &self.config.prefix_config {
            None => true,
            Some(pc) => {
                (self.config.include_literals && o.0 < pc.literal_end_id)
                    || (o.0 >= pc.so_range.start && s.0 <= pc.so_range.end)
                    || (o.0 >= pc.subj_range.start && s.0 <= pc.subj_range.end)
            }
        }
    }

    /// Records `triple` as either skipped-for-offset or collected output.
    /// `out` and `skipped` are always disjoint: a triple already in
    /// `skipped` is never later added to `out`, even once the offset budget
    /// is exhausted. Returns whether the triple was added to `out` — callers
    /// recurse into the triple's far term only when it was, so a triple
    /// consumed by the offset never expands the frontier.
    fn record(&mut self, triple: TripleId) -> bool {
        if self.skipped.contains(&triple) {
            return false;
        }
        if self.read_triples < self.offset {
            self.skipped.insert(triple);
            self.read_triples += 1;
            false
        } else {
            self.out.insert(triple);
            self.processed_triples = self.out.len();
            true
        }
    }

    fn addhop(&mut self, term_id: NativeId, current_hop: u32, role: Role) {
        if self.processed_triples >= self.limit {
            return;
        }
        self.processed_terms.insert(term_id);

        if (role == Role::Subject || term_id.0 <= self.counts.n_shared) && term_id.0 <= self.store.max_subject_id() {
            self.subject_branch(term_id, current_hop);
        }
        if (role == Role::Object || term_id.0 <= self.counts.n_shared) && term_id.0 <= self.store.max_object_id() {
            self.object_branch(term_id, current_hop);
        }
    }

    fn subject_branch(&mut self, term_id: NativeId, current_hop: u32) {
        let store = self.store;
        let mut it = store.search(TripleId::new(term_id, NativeId::UNBOUND, NativeId::UNBOUND));
        while let Some(t) = it.next() {
            if !self.passes_predicate(t.p) {
                continue;
            }
            if !self.passes_prefix_subject_branch(t.o) {
                continue;
            }
            if self.processed_triples >= self.limit {
                break;
            }
            if self.record(t) && current_hop + 1 <= self.config.num_hops && !self.processed_terms.contains(&t.o) {
                self.addhop(t.o, current_hop + 1, Role::Object);
            }
        }
    }

    fn object_branch(&mut self, term_id: NativeId, current_hop: u32) {
        let store = self.store;
        let mut it = store.search(TripleId::new(NativeId::UNBOUND, NativeId::UNBOUND, term_id));
        while let Some(t) = it.next() {
            if term_id.0 <= self.counts.n_shared && t.s == t.o {
                continue;
            }
            if !self.passes_predicate(t.p) {
                continue;
            }
            if !self.passes_prefix_object_branch(t.s, t.o) {
                continue;
            }
            if self.processed_triples >= self.limit {
                break;
            }
            if self.record(t) && current_hop + 1 <= self.config.num_hops && !self.processed_terms.contains(&t.s) {
                self.addhop(t.s, current_hop + 1, Role::Subject);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ContinuousId;
    use crate::store::MemStore;

    fn store_with(triples: Vec<(&str, &str, &str)>) -> MemStore {
        MemStore::new(triples.into_iter().map(|(s, p, o)| (s.to_string(), p.to_string(), o.to_string())))
    }

    fn cfg(num_hops: u32) -> HopConfig {
        HopConfig { num_hops, ..HopConfig::default() }
    }

    /// A single hop from a subject-only seed lands on an object-only term,
    /// which must come back shifted into continuous space.
    #[test]
    fn single_hop_from_subject_only_seed_shifts_the_object() {
        let store = store_with(vec![("subj-only", "p1", "obj-only")]);
        let seed = store.id_of("subj-only", Role::Subject).0; // subject-only id, same in continuous space
        let out = compute_hops(&store, &cfg(1), &[seed], 0, 0);
        assert_eq!(out.len(), 1);
        let t = *out.iter().next().unwrap();
        let counts = store.dict_counts();
        let o_continuous = counts.object_native_to_continuous(t.o);
        assert!(counts.is_shifted_object(o_continuous));
    }

    /// "alpha" and "gamma" are picked so their independently-numbered
    /// subject-only and object-only ids collide (both land on native id 1),
    /// demonstrating the role guard prevents the collision from producing a
    /// false match: the object branch must never fire for a non-shared seed,
    /// so a reverse edge landing on that colliding id is not found.
    #[test]
    fn non_shared_seed_is_one_directional_in_continuous_mode() {
        let store = store_with(vec![("alpha", "p1", "zeta"), ("beta", "p2", "gamma")]);
        assert_eq!(store.n_shared(), 0);
        let alpha = store.id_of("alpha", Role::Subject);
        let gamma = store.id_of("gamma", Role::Object);
        assert_eq!(alpha.0, gamma.0, "fixture must collide subject-only and object-only ids");
        let out = compute_hops(&store, &cfg(1), &[alpha.0], 0, 0);
        assert_eq!(out.len(), 1, "reverse edge into a subject-only seed must not be found via the object branch");
    }

    /// A shared seed must traverse both outgoing and incoming edges.
    #[test]
    fn shared_seed_is_symmetric() {
        let store = store_with(vec![("shared", "p1", "obj-only"), ("other-subj", "p2", "shared")]);
        assert_eq!(store.n_shared(), 1);
        let seed = store.id_of("shared", Role::Subject).0;
        let out = compute_hops(&store, &cfg(1), &[seed], 0, 0);
        assert_eq!(out.len(), 2);
    }

    /// limit=1, offset=1 over two candidate triples sharing the same
    /// subject: the first is consumed by the offset, the second lands in the
    /// output.
    #[test]
    fn limit_and_offset_across_dedup() {
        let store = store_with(vec![("subj-only", "p1", "obj-a"), ("subj-only", "p1", "obj-b")]);
        let seed = store.id_of("subj-only", Role::Subject).0;
        let out = compute_hops(&store, &cfg(1), &[seed], 1, 1);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn offset_skipped_triple_does_not_expand_the_frontier() {
        // Two hops would be possible from "mid" if the first edge weren't
        // consumed by the offset; since it is, the second hop must not run.
        let store = store_with(vec![("a", "p", "mid"), ("mid", "p", "end")]);
        let config = HopConfig { num_hops: 2, ..HopConfig::default() };
        let seed = store.id_of("a", Role::Subject).0;
        let out = compute_hops(&store, &config, &[seed], 0, 1);
        assert!(out.is_empty());
    }

    #[test]
    fn predicate_filter_restricts_output() {
        crate::test_support::init();
        let store = store_with(vec![("s", "p1", "o1"), ("s", "p2", "o2")]);
        let seed = store.id_of("s", Role::Subject).0;
        let p1 = store.id_of("p1", Role::Predicate);
        let mut config = cfg(1);
        config.pred_allow.insert(p1);
        let out = compute_hops(&store, &config, &[seed], 0, 0);
        assert_eq!(out.len(), 1);
        assert_eq!(out.into_iter().next().unwrap().p, p1);
    }

    #[test]
    fn out_and_skipped_never_overlap_and_respect_limit() {
        let store = store_with(vec![("s", "p", "o1"), ("s", "p", "o2"), ("s", "p", "o3")]);
        let seed = store.id_of("s", Role::Subject).0;
        let out = compute_hops(&store, &cfg(1), &[seed], 2, 1);
        assert!(out.len() <= 2);
    }

    #[test]
    fn zero_seed_is_skipped_not_a_panic() {
        let store = store_with(vec![("s", "p", "o")]);
        let out = compute_hops(&store, &cfg(1), &[0], 0, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn num_hops_zero_yields_no_expansion() {
        let store = store_with(vec![("s", "p", "o")]);
        let seed = store.id_of("s", Role::Subject).0;
        let out = compute_hops(&store, &cfg(0), &[seed], 0, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn compute_all_hops_uses_total_triples_as_limit() {
        let store = store_with(vec![("s", "p", "o1"), ("s", "p", "o2")]);
        let seed = store.id_of("s", Role::Subject).0;
        let out = compute_all_hops(&store, &cfg(1), &[seed]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn two_hop_recursion_reaches_second_neighbor() {
        let store = store_with(vec![("a", "p", "mid"), ("mid", "p", "end")]);
        let seed = ContinuousId(store.id_of("a", Role::Subject).0).0;
        let out = compute_hops(&store, &cfg(2), &[seed], 0, 0);
        assert_eq!(out.len(), 2);
    }
}
