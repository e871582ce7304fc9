//! Triple-pattern search with cardinality estimation and offset skipping.

use crate::ids::{NativeId, Role};
use crate::store::{PatternIter, Store, TripleId, TriplePattern};

/// Wraps a store's [`PatternIter`], applying offset skipping once up front
/// and capping the number of yielded results at `limit` (`0` = unbounded).
pub struct LimitedIter<'a> {
    inner: Box<dyn PatternIter + 'a>,
    remaining: Option<usize>,
}

impl Iterator for LimitedIter<'_> {
    type Item = TripleId;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(remaining) = self.remaining {
            if remaining == 0 {
                return None;
            }
        }
        let item = self.inner.next()?;
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= 1;
        }
        Some(item)
    }
}

/// Applies the offset-skip algorithm to an opened iterator: skip straight to
/// `offset` when the store's own cardinality
/// estimate covers it, otherwise skip as far as the store allows and step
/// through the remainder one result at a time (the store may refuse to
/// skip past its own estimate).
fn apply_offset(it: &mut (dyn PatternIter + '_), offset: usize, cardinality: usize) {
    if offset == 0 {
        return;
    }
    if offset < cardinality {
        it.skip(offset);
    } else {
        it.skip(cardinality.saturating_sub(1));
        let mut remaining = offset - cardinality + 1;
        while remaining > 0 && it.has_next() {
            it.next();
            remaining -= 1;
        }
    }
}

/// `search_ids(s, p, o, limit, offset)`: `s`/`p`/`o` are already-resolved
/// native ids, `NativeId::UNBOUND` meaning wildcard. Returns the limited,
/// offset iterator plus the store's cardinality estimate for the pattern
/// (computed before the offset is applied).
pub fn search_ids<'a>(
    store: &'a dyn Store, s: NativeId, p: NativeId, o: NativeId, limit: usize, offset: usize,
) -> (LimitedIter<'a>, usize) {
    let pattern = TriplePattern::new(s, p, o);
    let mut it = store.search(pattern);
    let cardinality = it.estimated_cardinality();
    apply_offset(it.as_mut(), offset, cardinality);
    let remaining = if limit == 0 { None } else { Some(limit) };
    (LimitedIter { inner: it, remaining }, cardinality)
}

/// `search(s, p, o, limit, offset)`: each of `s`/`p`/`o` is an empty string
/// (wildcard) or a term string. Resolves to ids, then re-materializes each
/// matched triple back into strings via the dictionary.
pub fn search<'a>(
    store: &'a dyn Store, s: &str, p: &str, o: &str, limit: usize, offset: usize,
) -> (impl Iterator<Item = [String; 3]> + 'a, usize) {
    let sid = if s.is_empty() { NativeId::UNBOUND } else { store.id_of(s, Role::Subject) };
    let pid = if p.is_empty() { NativeId::UNBOUND } else { store.id_of(p, Role::Predicate) };
    let oid = if o.is_empty() { NativeId::UNBOUND } else { store.id_of(o, Role::Object) };
    let (iter, cardinality) = search_ids(store, sid, pid, oid, limit, offset);
    let resolved = iter.map(move |t| {
        [
            store.string_of(t.s, Role::Subject).unwrap_or_default(),
            store.string_of(t.p, Role::Predicate).unwrap_or_default(),
            store.string_of(t.o, Role::Object).unwrap_or_default(),
        ]
    });
    (resolved, cardinality)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemStore;

    fn store() -> MemStore {
        MemStore::new(vec![
            ("s".into(), "p".into(), "o1".into()),
            ("s".into(), "p".into(), "o2".into()),
            ("s".into(), "p".into(), "o3".into()),
        ])
    }

    #[test]
    fn limit_zero_is_unbounded() {
        let s = store();
        let (it, card) = search(&s, "s", "p", "", 0, 0);
        assert_eq!(card, 3);
        assert_eq!(it.count(), 3);
    }

    #[test]
    fn offset_within_cardinality_skips_exactly() {
        let s = store();
        let (it, _card) = search(&s, "s", "p", "", 0, 2);
        assert_eq!(it.count(), 1);
    }

    #[test]
    fn offset_beyond_cardinality_exhausts_iterator() {
        let s = store();
        let (it, _card) = search(&s, "s", "p", "", 0, 10);
        assert_eq!(it.count(), 0);
    }

    #[test]
    fn wildcard_pattern_is_empty_string() {
        let s = store();
        let (it, card) = search(&s, "", "", "", 0, 0);
        assert_eq!(card, 3);
        assert_eq!(it.count(), 3);
    }

    #[test]
    fn unknown_term_yields_no_results() {
        let s = store();
        let (it, card) = search(&s, "does-not-exist", "", "", 0, 0);
        assert_eq!(card, 0);
        assert_eq!(it.count(), 0);
    }
}
