//! Prefix/filter configurator.
//!
//! Precomputes the id ranges a hop-engine prefix filter checks against, plus
//! the literal/non-literal boundary id, so the hop engine's inner loop never
//! has to touch strings.

use crate::ids::{RawId, Role};
use crate::store::Store;

/// An inclusive id range; `start == 0` means "unset" (matches nothing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IdRange {
    pub start: RawId,
    pub end: RawId,
}

impl IdRange {
    pub const EMPTY: IdRange = IdRange { start: 0, end: 0 };

    pub fn contains(&self, id: RawId) -> bool {
        self.start != 0 && id >= self.start && id <= self.end
    }
}

/// Hard-coded ranges for the two well-known prefix tags, a speed hack for
/// dictionaries too large to scan for a prefix range.
const DBPEDIA_TAG: &str = "predef-dbpedia2016-04";
const WIKIDATA_TAG: &str = "predef-wikidata2020-03-all";

/// Immutable snapshot produced by [`configure`]: reconfiguring builds a new
/// snapshot rather than mutating fields of a live one.
#[derive(Debug, Clone, Default)]
pub struct PrefixConfig {
    pub so_range: IdRange,
    pub subj_range: IdRange,
    pub obj_range: IdRange,
    pub literal_end_id: RawId,
}

/// Builds a [`PrefixConfig`] for `prefix_tag`. An empty tag should admit
/// everything; the hop engine's `prefix_config.is_none()` check (no
/// configurator invoked at all) already guarantees that, so this function is
/// only ever called when `prefix_tag` is non-empty.
pub fn configure(store: &dyn Store, prefix_tag: &str) -> PrefixConfig {
    if prefix_tag == DBPEDIA_TAG {
        return PrefixConfig {
            so_range: IdRange { start: 2_979_755, end: 24_597_521 },
            subj_range: IdRange { start: 50_097_212, end: 52_750_736 },
            obj_range: IdRange { start: 151_243_949, end: 153_168_015 },
            literal_end_id: 147_777_579,
        };
    }
    if prefix_tag == WIKIDATA_TAG {
        return PrefixConfig { so_range: IdRange::EMPTY, subj_range: IdRange::EMPTY, obj_range: IdRange::EMPTY, literal_end_id: 1_924_886_681 };
    }

    let n_shared = store.n_shared();
    let (so_range, subj_range) = scan_subject_ranges(store, prefix_tag, n_shared);
    let obj_range = scan_object_range(store, prefix_tag, so_range.end);
    let literal_end_id = literal_cutoff(store);

    log::debug!(
        "prefix '{prefix_tag}' resolved to so_range={so_range:?} subj_range={subj_range:?} \
         obj_range={obj_range:?} literal_end_id={literal_end_id}"
    );

    PrefixConfig { so_range, subj_range, obj_range, literal_end_id }
}

/// Port of `hdt_document_memory.cpp`'s first `getIDSuggestions(..., SUBJECT)`
/// loop: walks ids in ascending order, splitting them into the SO-range
/// (ids ≤ `n_shared`) that precedes the subject-only range (ids > `n_shared`).
fn scan_subject_ranges(store: &dyn Store, prefix: &str, n_shared: RawId) -> (IdRange, IdRange) {
    let mut so_range = IdRange::EMPTY;
    let mut subj_range = IdRange::EMPTY;
    let mut so_zone = true;
    let mut prev = 0;
    let mut last = 0;
    let mut first = true;

    for id in store.id_suggestions(prefix, Role::Subject) {
        let sol = id.0;
        if first {
            if sol <= n_shared {
                so_range.start = sol;
            } else {
                subj_range.start = sol;
                so_zone = false;
            }
            first = false;
        } else if so_zone && sol > n_shared {
            so_range.end = prev;
            subj_range.start = sol;
            so_zone = false;
        }
        prev = sol;
        last = sol;
    }

    if so_zone {
        so_range.end = last;
    } else {
        subj_range.end = last;
    }
    (so_range, subj_range)
}

/// Port of the second `getIDSuggestions(..., OBJECT)` loop: the object-only
/// range starts at the first id past `preffixEndSO` and ends at whatever the
/// last suggested id was.
fn scan_object_range(store: &dyn Store, prefix: &str, so_range_end: RawId) -> IdRange {
    let mut obj_range = IdRange::EMPTY;
    let mut in_zone = false;
    let mut last = 0;

    for id in store.id_suggestions(prefix, Role::Object) {
        let sol = id.0;
        if !in_zone && sol > so_range_end {
            obj_range.start = sol;
            in_zone = true;
        }
        last = sol;
    }
    if in_zone {
        obj_range.end = last;
    }
    obj_range
}

/// Scans `objects_iter()` from the first object-only id until a non-literal
/// term is found (one that does not start with `"`).
fn literal_cutoff(store: &dyn Store) -> RawId {
    let mut cutoff = store.n_shared();
    for term in store.objects_iter().skip(store.n_shared() as usize) {
        cutoff += 1;
        if !term.starts_with('"') {
            break;
        }
    }
    cutoff
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemStore;

    #[test]
    fn empty_prefix_not_invoked_means_everything_passes() {
        // the hop engine itself skips configurator invocation when
        // prefix_tag == "", see hop.rs.
        let cfg = PrefixConfig::default();
        assert!(!cfg.so_range.contains(1));
    }

    #[test]
    fn predefined_dbpedia_tag_is_hardcoded() {
        crate::test_support::init();
        let store = MemStore::new(Vec::<(String, String, String)>::new());
        let cfg = configure(&store, DBPEDIA_TAG);
        assert_eq!(cfg.literal_end_id, 147_777_579);
        assert!(cfg.so_range.contains(3_000_000));
    }

    #[test]
    fn literal_cutoff_stops_at_first_non_literal() {
        let store = MemStore::new(vec![
            ("s".into(), "p".into(), "\"a literal\"".into()),
            ("s".into(), "p".into(), "http://example.org/not-a-literal".into()),
        ]);
        let cutoff = literal_cutoff(&store);
        // one literal object-only term precedes the non-literal one
        assert_eq!(cutoff, store.n_shared() + 1);
    }
}
