//! Id-space translator.
//!
//! The store's *native* dictionary keeps three disjoint ranges: shared
//! subject/object terms, subject-only terms, and object-only terms, where
//! object-only ids alias the same numbers as subject-only ids for different
//! terms. The *continuous* id space used at the external boundary instead
//! shifts object-only ids above the subject range so every id denotes
//! exactly one term.
//!
//! Native and continuous ids are modeled as distinct types so that mixing
//! them is a type error instead of an informal convention.

use std::fmt;

/// The raw numeric id, shared by both id spaces.
pub type RawId = u64;

/// An id in the role it plays in a triple (subjects and objects share one id
/// space below `n_shared`; predicates are always a separate space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Subject,
    Predicate,
    Object,
}

/// An id as the store's dictionary natively assigns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NativeId(pub RawId);

/// An id in the dense, externally-facing continuous space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContinuousId(pub RawId);

impl fmt::Display for NativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ContinuousId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl NativeId {
    pub const UNBOUND: NativeId = NativeId(0);

    pub const fn is_unbound(self) -> bool {
        self.0 == 0
    }
}

impl ContinuousId {
    pub const UNBOUND: ContinuousId = ContinuousId(0);

    pub const fn is_unbound(self) -> bool {
        self.0 == 0
    }
}

/// The four dictionary partition counts a store exposes, plus the derived
/// shift `delta = n_subjects_total - n_shared` used by every translation in
/// this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictCounts {
    pub n_shared: RawId,
    pub n_subjects_total: RawId,
    pub n_objects_total: RawId,
    pub n_predicates: RawId,
}

impl DictCounts {
    /// `Δ = N_subjects_total − N_shared`, the amount object-only ids are
    /// shifted by when crossing into continuous space.
    pub const fn delta(&self) -> RawId {
        self.n_subjects_total - self.n_shared
    }

    /// continuous→native for an id known to be in the object role.
    /// `id > n_subjects_total` marks it as a shifted object-only id.
    pub fn object_continuous_to_native(&self, id: ContinuousId) -> NativeId {
        if id.0 > self.n_subjects_total { NativeId(id.0 - self.delta()) } else { NativeId(id.0) }
    }

    /// native→continuous for an id known to be in the object role.
    /// `id > n_shared` marks it as an object-only native id needing a shift.
    pub fn object_native_to_continuous(&self, id: NativeId) -> ContinuousId {
        if id.0 > self.n_shared { ContinuousId(id.0 + self.delta()) } else { ContinuousId(id.0) }
    }

    /// Subject and shared ids occupy the same numbers in both spaces, so
    /// translation is the identity — kept as a function for call-site
    /// symmetry and so the role is never silently assumed at the call site.
    pub const fn subject_native_to_continuous(&self, id: NativeId) -> ContinuousId {
        ContinuousId(id.0)
    }

    pub const fn subject_continuous_to_native(&self, id: ContinuousId) -> NativeId {
        NativeId(id.0)
    }

    /// True if a continuous id denotes a term that is only ever an object
    /// (i.e. it was shifted above `n_subjects_total`).
    pub const fn is_shifted_object(&self, id: ContinuousId) -> bool {
        id.0 > self.n_subjects_total
    }
}
