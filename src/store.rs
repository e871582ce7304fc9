//! Store adapter and its one in-memory backing.
//!
//! [`Store`] is the contract this crate puts on "the external triple and
//! dictionary container" — loading and decoding an actual on-disk HDT file
//! is out of scope here, so this crate treats the container as something
//! that already exists and merely needs wrapping. [`MemStore`] is the one
//! concrete implementation shipped here: it builds its dictionary and index
//! from a plain triple list. A production deployment backed by a real HDT
//! file would supply its own [`Store`] impl; nothing downstream (ids,
//! prefix, search, hop, matrix, types, join) depends on how the triples got
//! there.

use crate::ids::{DictCounts, NativeId, RawId, Role};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

/// A triple of native dictionary ids. `NativeId::UNBOUND` (0) in a pattern
/// component means "wildcard".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TripleId {
    pub s: NativeId,
    pub p: NativeId,
    pub o: NativeId,
}

impl TripleId {
    pub const fn new(s: NativeId, p: NativeId, o: NativeId) -> Self {
        TripleId { s, p, o }
    }
}

/// A triple pattern: `NativeId::UNBOUND` means wildcard in that position.
pub type TriplePattern = TripleId;

/// A resolved, lazily-produced triple-pattern match iterator: the only
/// blocking points in the whole core.
pub trait PatternIter {
    fn has_next(&mut self) -> bool;
    fn next(&mut self) -> Option<TripleId>;
    /// Advance past `k` results, returning how many were actually skipped
    /// (a store is allowed to refuse to skip past its own estimate).
    fn skip(&mut self, k: usize) -> usize;
    fn estimated_cardinality(&self) -> usize;
}

/// A variable binding produced by [`Store::join`]: variable name (including
/// the leading `?`) to resolved term string.
pub type Binding = BTreeMap<String, String>;

/// The store adapter contract.
pub trait Store: fmt::Debug {
    fn id_of(&self, term: &str, role: Role) -> NativeId;
    fn string_of(&self, id: NativeId, role: Role) -> Option<String>;

    fn n_shared(&self) -> RawId;
    fn n_subjects_total(&self) -> RawId;
    fn n_objects_total(&self) -> RawId;
    fn n_predicates(&self) -> RawId;
    fn max_subject_id(&self) -> RawId;
    fn max_object_id(&self) -> RawId;
    fn total_triples(&self) -> usize;

    fn search(&self, pattern: TriplePattern) -> Box<dyn PatternIter + '_>;

    /// Ids of terms whose string begins with `prefix`, ascending by id.
    fn id_suggestions<'a>(&'a self, prefix: &str, role: Role) -> Box<dyn Iterator<Item = NativeId> + 'a>;

    /// Object terms in ascending object-id order (used only for literal
    /// cutoff detection).
    fn objects_iter(&self) -> Box<dyn Iterator<Item = String> + '_>;

    /// `patterns` are string triples where a leading `?` marks a variable.
    fn join<'a>(&'a self, patterns: &[[String; 3]]) -> Box<dyn Iterator<Item = Binding> + 'a>;

    fn dict_counts(&self) -> DictCounts {
        DictCounts {
            n_shared: self.n_shared(),
            n_subjects_total: self.n_subjects_total(),
            n_objects_total: self.n_objects_total(),
            n_predicates: self.n_predicates(),
        }
    }
}

/// A linear-scan, entirely in-memory [`Store`] built from a plain triple
/// list. Not an index — it exists to exercise the rest of this crate
/// against known data.
#[derive(Debug)]
pub struct MemStore {
    triples: Vec<TripleId>,
    shared: Vec<String>,
    subjects_only: Vec<String>,
    objects_only: Vec<String>,
    predicates: Vec<String>,
    subject_ids: HashMap<String, NativeId>,
    object_ids: HashMap<String, NativeId>,
    predicate_ids: HashMap<String, NativeId>,
    max_subject_id: RawId,
    max_object_id: RawId,
}

impl MemStore {
    /// Build a store from `(subject, predicate, object)` string triples.
    /// Dictionary partitioning follows HDT's rule: terms used as both
    /// subject and object anywhere in the graph become "shared" and get one
    /// id; pure subjects and pure objects get ids starting right after the
    /// shared range, each counted from `n_shared` independently. Ids within
    /// each section are assigned in lexicographic order, matching the
    /// teacher's `DictSectPFC::compress` (sorted `BTreeSet`).
    pub fn new(triples: impl IntoIterator<Item = (String, String, String)>) -> Self {
        let triples: Vec<(String, String, String)> = triples.into_iter().collect();

        let mut subj_set: BTreeSet<String> = BTreeSet::new();
        let mut obj_set: BTreeSet<String> = BTreeSet::new();
        let mut pred_set: BTreeSet<String> = BTreeSet::new();
        for (s, p, o) in &triples {
            subj_set.insert(s.clone());
            obj_set.insert(o.clone());
            pred_set.insert(p.clone());
        }

        let shared: BTreeSet<String> = subj_set.intersection(&obj_set).cloned().collect();
        let subjects_only: Vec<String> = subj_set.difference(&shared).cloned().collect();
        let objects_only: Vec<String> = obj_set.difference(&shared).cloned().collect();
        let shared: Vec<String> = shared.into_iter().collect();
        let predicates: Vec<String> = pred_set.into_iter().collect();

        let n_shared = shared.len() as RawId;

        let mut subject_ids = HashMap::new();
        for (i, t) in shared.iter().enumerate() {
            subject_ids.insert(t.clone(), NativeId(i as RawId + 1));
        }
        for (i, t) in subjects_only.iter().enumerate() {
            subject_ids.insert(t.clone(), NativeId(n_shared + i as RawId + 1));
        }

        let mut object_ids = HashMap::new();
        for (i, t) in shared.iter().enumerate() {
            object_ids.insert(t.clone(), NativeId(i as RawId + 1));
        }
        for (i, t) in objects_only.iter().enumerate() {
            object_ids.insert(t.clone(), NativeId(n_shared + i as RawId + 1));
        }

        let mut predicate_ids = HashMap::new();
        for (i, t) in predicates.iter().enumerate() {
            predicate_ids.insert(t.clone(), NativeId(i as RawId + 1));
        }

        let max_subject_id = subject_ids.values().map(|id| id.0).max().unwrap_or(0);
        let max_object_id = object_ids.values().map(|id| id.0).max().unwrap_or(0);

        let mut tids: Vec<TripleId> = triples
            .iter()
            .map(|(s, p, o)| {
                TripleId::new(
                    *subject_ids.get(s).expect("subject was collected into subj_set"),
                    *predicate_ids.get(p).expect("predicate was collected into pred_set"),
                    *object_ids.get(o).expect("object was collected into obj_set"),
                )
            })
            .collect();
        tids.sort();
        tids.dedup();

        MemStore {
            triples: tids,
            shared,
            subjects_only,
            objects_only,
            predicates,
            subject_ids,
            object_ids,
            predicate_ids,
            max_subject_id,
            max_object_id,
        }
    }

    fn shared_or_section(&self, id: NativeId, section: &[String]) -> Option<String> {
        let id = id.0;
        if id == 0 {
            return None;
        }
        if id <= self.shared.len() as RawId {
            return self.shared.get(id as usize - 1).cloned();
        }
        let offset = id - self.shared.len() as RawId - 1;
        section.get(offset as usize).cloned()
    }
}

struct MemPatternIter {
    matches: Vec<TripleId>,
    pos: usize,
}

impl PatternIter for MemPatternIter {
    fn has_next(&mut self) -> bool {
        self.pos < self.matches.len()
    }

    fn next(&mut self) -> Option<TripleId> {
        let t = self.matches.get(self.pos).copied();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn skip(&mut self, k: usize) -> usize {
        let actual = k.min(self.matches.len().saturating_sub(self.pos));
        self.pos += actual;
        actual
    }

    fn estimated_cardinality(&self) -> usize {
        self.matches.len()
    }
}

impl Store for MemStore {
    fn id_of(&self, term: &str, role: Role) -> NativeId {
        let map = match role {
            Role::Subject => &self.subject_ids,
            Role::Object => &self.object_ids,
            Role::Predicate => &self.predicate_ids,
        };
        map.get(term).copied().unwrap_or(NativeId::UNBOUND)
    }

    fn string_of(&self, id: NativeId, role: Role) -> Option<String> {
        match role {
            Role::Subject => self.shared_or_section(id, &self.subjects_only),
            Role::Object => self.shared_or_section(id, &self.objects_only),
            Role::Predicate => {
                if id.0 == 0 {
                    return None;
                }
                self.predicates.get(id.0 as usize - 1).cloned()
            }
        }
    }

    fn n_shared(&self) -> RawId {
        self.shared.len() as RawId
    }

    fn n_subjects_total(&self) -> RawId {
        self.n_shared() + self.subjects_only.len() as RawId
    }

    fn n_objects_total(&self) -> RawId {
        self.n_shared() + self.objects_only.len() as RawId
    }

    fn n_predicates(&self) -> RawId {
        self.predicates.len() as RawId
    }

    fn max_subject_id(&self) -> RawId {
        self.max_subject_id
    }

    fn max_object_id(&self) -> RawId {
        self.max_object_id
    }

    fn total_triples(&self) -> usize {
        self.triples.len()
    }

    fn search(&self, pattern: TriplePattern) -> Box<dyn PatternIter + '_> {
        let matches: Vec<TripleId> = self
            .triples
            .iter()
            .copied()
            .filter(|t| {
                (pattern.s.is_unbound() || pattern.s == t.s)
                    && (pattern.p.is_unbound() || pattern.p == t.p)
                    && (pattern.o.is_unbound() || pattern.o == t.o)
            })
            .collect();
        Box::new(MemPatternIter { matches, pos: 0 })
    }

    fn id_suggestions<'a>(&'a self, prefix: &str, role: Role) -> Box<dyn Iterator<Item = NativeId> + 'a> {
        let prefix = prefix.to_owned();
        match role {
            Role::Subject => {
                let mut ids: Vec<NativeId> = self
                    .shared
                    .iter()
                    .chain(self.subjects_only.iter())
                    .filter(|t| t.starts_with(&prefix))
                    .map(|t| self.subject_ids[t])
                    .collect();
                ids.sort();
                Box::new(ids.into_iter())
            }
            Role::Object => {
                let mut ids: Vec<NativeId> = self
                    .shared
                    .iter()
                    .chain(self.objects_only.iter())
                    .filter(|t| t.starts_with(&prefix))
                    .map(|t| self.object_ids[t])
                    .collect();
                ids.sort();
                Box::new(ids.into_iter())
            }
            Role::Predicate => {
                let mut ids: Vec<NativeId> = self
                    .predicates
                    .iter()
                    .filter(|t| t.starts_with(&prefix))
                    .map(|t| self.predicate_ids[t])
                    .collect();
                ids.sort();
                Box::new(ids.into_iter())
            }
        }
    }

    fn objects_iter(&self) -> Box<dyn Iterator<Item = String> + '_> {
        Box::new(self.shared.iter().cloned().chain(self.objects_only.iter().cloned()))
    }

    fn join<'a>(&'a self, patterns: &[[String; 3]]) -> Box<dyn Iterator<Item = Binding> + 'a> {
        let patterns = patterns.to_vec();
        let mut bindings = vec![Binding::new()];
        for pattern in &patterns {
            let mut next_bindings = Vec::new();
            for binding in &bindings {
                let resolved: Vec<Option<String>> = pattern
                    .iter()
                    .map(|component| {
                        if component.starts_with('?') {
                            binding.get(component).cloned()
                        } else {
                            Some(component.clone())
                        }
                    })
                    .collect();
                for t in &self.triples {
                    let strs = [
                        self.string_of(t.s, Role::Subject).unwrap_or_default(),
                        self.string_of(t.p, Role::Predicate).unwrap_or_default(),
                        self.string_of(t.o, Role::Object).unwrap_or_default(),
                    ];
                    if resolved.iter().zip(&strs).any(|(want, have)| matches!(want, Some(w) if w != have)) {
                        continue;
                    }
                    let mut candidate = binding.clone();
                    for (component, value) in pattern.iter().zip(&strs) {
                        if component.starts_with('?') {
                            candidate.insert(component.clone(), value.clone());
                        }
                    }
                    next_bindings.push(candidate);
                }
            }
            bindings = next_bindings;
        }
        Box::new(bindings.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemStore {
        // Shared ids 1-2, subject-only 3-4, object-only 5-6 (native numbering).
        MemStore::new(vec![
            ("shared1".into(), "p1".into(), "obj-only-a".into()),
            ("subj-only-a".into(), "p1".into(), "shared1".into()),
        ])
    }

    #[test]
    fn dictionary_partitioning() {
        let s = store();
        assert_eq!(s.n_shared(), 1); // "shared1" is both subject and object
        assert_eq!(s.id_of("shared1", Role::Subject), s.id_of("shared1", Role::Object));
    }

    #[test]
    fn search_pattern_wildcards() {
        let s = store();
        let sid = s.id_of("subj-only-a", Role::Subject);
        let mut it = s.search(TripleId::new(sid, NativeId::UNBOUND, NativeId::UNBOUND));
        assert_eq!(it.estimated_cardinality(), 1);
        assert!(it.has_next());
        let t = it.next().unwrap();
        assert_eq!(s.string_of(t.o, Role::Object).unwrap(), "shared1");
        assert!(!it.has_next());
    }

    #[test]
    fn unknown_term_is_id_zero() {
        let s = store();
        assert_eq!(s.id_of("does-not-exist", Role::Subject), NativeId::UNBOUND);
    }
}
