//! Public facade composing the store adapter, id translator and prefix
//! configurator behind one query surface: pattern search, joins, type
//! filtering, and bounded k-hop neighborhood expansion with its matrix
//! output.

use crate::error::{Error, Result};
use crate::hop::{self, HopConfig};
use crate::ids::{ContinuousId, NativeId, RawId, Role};
use crate::join;
use crate::matrix::{self, HopMatrix};
use crate::prefix;
use crate::search::{self, LimitedIter};
use crate::store::{Binding, Store, TripleId};
use crate::types;
use std::collections::HashSet;

/// Read-only query layer over a [`Store`]: triple patterns, joins, type
/// filtering and bounded k-hop neighborhood expansion. Owns the current hop
/// configuration; reconfiguring swaps it out wholesale rather than mutating
/// it in place.
#[derive(Debug)]
pub struct HdtDocument<S: Store> {
    store: S,
    hop_config: HopConfig,
}

impl<S: Store> HdtDocument<S> {
    pub fn new(store: S) -> Self {
        HdtDocument { store, hop_config: HopConfig::default() }
    }

    /// Builds a new [`HopConfig`] from scratch and installs it atomically.
    /// `pred_allow` entries that don't resolve to a dictionary id are
    /// dropped, not treated as errors.
    pub fn configure_hops(&mut self, num_hops: u32, pred_allow: &[String], prefix_tag: &str, include_literals: bool, continuous_mode: bool) {
        let pred_allow: HashSet<NativeId> = pred_allow
            .iter()
            .map(|p| self.store.id_of(p, Role::Predicate))
            .filter(|id| !id.is_unbound())
            .collect();
        let prefix_config = if prefix_tag.is_empty() { None } else { Some(prefix::configure(&self.store, prefix_tag)) };
        log::debug!("configure_hops: num_hops={num_hops} predicates={} prefix_tag='{prefix_tag}'", pred_allow.len());
        self.hop_config = HopConfig { num_hops, pred_allow, prefix_config, include_literals, continuous_mode };
    }

    /// Triple-pattern search over term strings; `""` is a wildcard. Returns
    /// the matches plus the store's cardinality estimate for the pattern.
    pub fn search<'a>(&'a self, s: &str, p: &str, o: &str, limit: usize, offset: usize) -> (impl Iterator<Item = [String; 3]> + 'a, usize) {
        search::search(&self.store, s, p, o, limit, offset)
    }

    /// Triple-pattern search over already-resolved native ids.
    pub fn search_ids(&self, s: RawId, p: RawId, o: RawId, limit: usize, offset: usize) -> (LimitedIter<'_>, usize) {
        search::search_ids(&self.store, NativeId(s), NativeId(p), NativeId(o), limit, offset)
    }

    /// Multi-pattern join; `?`-prefixed components are variables.
    pub fn search_join<'a>(&'a self, patterns: &[[String; 3]]) -> Box<dyn Iterator<Item = Binding> + 'a> {
        join::search_join(&self.store, patterns)
    }

    /// Bounded k-hop neighborhood expansion from `seeds` under the current
    /// hop configuration. `limit == 0` means "use the whole store".
    pub fn compute_hops(&self, seeds: &[RawId], limit: usize, offset: usize) -> HashSet<TripleId> {
        hop::compute_hops(&self.store, &self.hop_config, seeds, limit, offset)
    }

    /// `compute_hops` with the limit forced to the whole store and no
    /// offset.
    pub fn compute_all_hops(&self, seeds: &[RawId]) -> HashSet<TripleId> {
        hop::compute_all_hops(&self.store, &self.hop_config, seeds)
    }

    /// Runs [`Self::compute_hops`] and renumbers the result into a
    /// per-predicate adjacency matrix.
    pub fn compute_hops_matrix(&self, seeds: &[RawId], limit: usize, offset: usize) -> HopMatrix {
        let triples = self.compute_hops(seeds, limit, offset);
        matrix::build(&self.store, &triples, self.hop_config.continuous_mode)
    }

    /// Groups `seeds` by which of `classes` they have an `rdf:type` edge to,
    /// in `classes`' input order.
    pub fn filter_types(&self, seeds: &[RawId], classes: &[RawId]) -> Vec<Vec<RawId>> {
        types::filter_types(&self.store, seeds, classes, self.hop_config.continuous_mode)
    }

    pub fn id_to_string(&self, id: RawId, role: Role) -> Option<String> {
        self.store.string_of(NativeId(id), role)
    }

    pub fn string_to_id(&self, term: &str, role: Role) -> RawId {
        self.store.id_of(term, role).0
    }

    /// Translates a continuous object-role id straight to its string,
    /// without an intermediate native id exposed to the caller.
    pub fn global_id_to_string(&self, id: RawId) -> Option<String> {
        let counts = self.store.dict_counts();
        let native = counts.object_continuous_to_native(ContinuousId(id));
        self.store.string_of(native, Role::Object)
    }

    /// Translates an object-role term string straight to its continuous id;
    /// `0` if the term is not in the dictionary.
    pub fn string_to_global_id(&self, term: &str) -> RawId {
        let native = self.store.id_of(term, Role::Object);
        if native.is_unbound() {
            return 0;
        }
        self.store.dict_counts().object_native_to_continuous(native).0
    }

    /// Resolves a full `(s, p, o)` id triple to its three term strings. Unlike
    /// a search pattern, `0` here is not a wildcard: all three ids must
    /// resolve or this returns [`Error::UnresolvedId`].
    pub fn ids_to_string_triple(&self, s: RawId, p: RawId, o: RawId) -> Result<[String; 3]> {
        let s_str = self.store.string_of(NativeId(s), Role::Subject).ok_or(Error::UnresolvedId(s))?;
        let p_str = self.store.string_of(NativeId(p), Role::Predicate).ok_or(Error::UnresolvedId(p))?;
        let o_str = self.store.string_of(NativeId(o), Role::Object).ok_or(Error::UnresolvedId(o))?;
        Ok([s_str, p_str, o_str])
    }

    pub fn n_triples(&self) -> usize {
        self.store.total_triples()
    }

    pub fn n_subjects(&self) -> RawId {
        self.store.n_subjects_total()
    }

    pub fn n_predicates(&self) -> RawId {
        self.store.n_predicates()
    }

    pub fn n_objects(&self) -> RawId {
        self.store.n_objects_total()
    }

    pub fn n_shared(&self) -> RawId {
        self.store.n_shared()
    }
}
